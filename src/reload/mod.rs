//! Live reload channel.
//!
//! ```text
//! FsActor (dest change) -> WsActor -> browser script -> location.reload()
//! ```
//!
//! - `message` - JSON messages sent to clients
//! - `server` - WebSocket listener feeding clients to the `WsActor`

pub mod message;
pub mod server;
