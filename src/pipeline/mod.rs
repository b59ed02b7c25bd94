//! Build pipeline.
//!
//! ```text
//! BuildSettings ──► BuildContext ──► Pipeline ──► TaskGraph
//!                   (+ compiler,                    │
//!                      inliner)         clean, styles, html, images, cleanup
//! ```
//!
//! Tasks read from the source root and write the mirrored destination tree.
//! Nothing here holds process-wide state: everything a task needs arrives in
//! the [`BuildContext`].

mod clean;
mod compose;
mod context;
mod graph;
mod html;
mod images;
mod inline;
mod settings;
mod styles;
pub mod transform;

pub use clean::clean;
pub use compose::{Pipeline, TaskName};
pub use context::BuildContext;
pub use settings::BuildSettings;
