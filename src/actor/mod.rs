//! Actor System for the watch loop
//!
//! Message-passing concurrency for `inlay dev`:
//!
//! ```text
//! FsActor ──rebuild──► BuildActor ──writes──► dest tree
//!    │                                           │
//!    └◄──────────────── dest change ◄────────────┘
//!    │
//!    └──reload──► WsActor ──► browsers
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher with debouncing and watch bindings
//! - `builder` - Runs pipelines one at a time, coalescing requests
//! - `ws` - WebSocket broadcast
//! - `coordinator` - Wires up and runs actors

pub mod builder;
pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod ws;

pub use coordinator::Coordinator;
