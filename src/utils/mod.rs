//! Shared utilities.

pub mod mime;
pub mod path;
mod plural;
pub mod write;

pub use plural::plural_count;
