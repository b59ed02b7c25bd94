//! Path utilities.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`)
//! - [`posix`]: Source-relative POSIX paths (`to_posix`, `dirname`, `join`)

pub mod fs;
pub mod posix;

pub use fs::normalize_path;
