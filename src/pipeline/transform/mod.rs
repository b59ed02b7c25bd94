//! Per-asset content transforms (Asset -> Asset).
//!
//! Transforms are pure: they never touch the filesystem and never fail. An
//! asset a transform does not apply to passes through unchanged.

mod cdn;

pub use cdn::{CdnTransform, RewriteRule};

use crate::asset::Asset;

/// A pure per-asset transformation.
pub trait Transform {
    fn apply(&self, asset: Asset) -> Asset;
}
