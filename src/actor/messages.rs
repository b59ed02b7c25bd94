//! Actor Message Definitions
//!
//! ```text
//! FsActor --Run(pipeline)--> BuildActor
//! FsActor --Reload---------> WsActor
//! ```

use std::net::TcpStream;

use crate::pipeline::Pipeline;

/// Messages to Build Actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMsg {
    /// Run a named pipeline (coalesced with other queued requests)
    Run(Pipeline),
    /// Shutdown
    Shutdown,
}

/// Messages to WebSocket Actor
#[derive(Debug)]
pub enum WsMsg {
    /// Reload every connected page
    Reload { reason: String },
    /// Add client (handshake pending)
    AddClient(TcpStream),
    /// Shutdown
    Shutdown,
}
