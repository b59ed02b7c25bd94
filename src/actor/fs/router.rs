use std::path::PathBuf;

use rustc_hash::FxHashMap;

use super::binding::WatchScope;
use super::types::{ChangeKind, WatchAction};
use crate::pipeline::Pipeline;

/// Actions triggered by one debounced batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct Routed {
    /// Pipelines to rebuild, deduplicated, in path order.
    pub(super) rebuilds: Vec<Pipeline>,
    /// First destination path that asked for a reload.
    pub(super) reload: Option<String>,
}

impl Routed {
    pub(super) fn is_empty(&self) -> bool {
        self.rebuilds.is_empty() && self.reload.is_none()
    }
}

/// Route changed paths through every scope's bindings.
pub(super) fn route(changes: FxHashMap<PathBuf, ChangeKind>, scopes: &[WatchScope]) -> Routed {
    let mut paths: Vec<_> = changes.into_iter().collect();
    paths.sort_by(|a, b| a.0.cmp(&b.0));

    let mut routed = Routed::default();
    for (path, kind) in paths {
        for scope in scopes {
            for action in scope.actions_for(&path) {
                crate::debug!("watch"; "{} {} -> {}", kind.label(), path.display(), action);
                match action {
                    WatchAction::Rebuild(pipeline) => {
                        if !routed.rebuilds.contains(&pipeline) {
                            routed.rebuilds.push(pipeline);
                        }
                    }
                    WatchAction::Reload => {
                        if routed.reload.is_none() {
                            let rel = path.strip_prefix(&scope.root).unwrap_or(&path);
                            routed.reload = Some(crate::utils::path::posix::to_posix(rel));
                        }
                    }
                }
            }
        }
    }
    routed
}
