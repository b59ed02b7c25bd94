use anyhow::Result;

use crate::actor::fs::{WatchAction, WatchBinding, WatchScope};
use crate::pipeline::{BuildSettings, Pipeline};
use crate::utils::path::normalize_path;

/// Source-side and destination-side watch scopes for `settings`.
///
/// | Scope       | Patterns                     | Action          |
/// |-------------|------------------------------|-----------------|
/// | source      | `**/*.html`, `**/*.scss`     | rebuild markup  |
/// | source      | `**/<img>/**/*`              | rebuild images  |
/// | destination | `**/*.html`, `**/<img>/**/*` | reload          |
pub(super) fn collect_watch_scopes(settings: &BuildSettings) -> Result<Vec<WatchScope>> {
    let images = format!("**/{}/**/*", settings.conventions.image_dir);
    let source_root = normalize_path(&settings.source_root);

    let source = WatchScope::new(
        source_root.clone(),
        vec![
            WatchBinding::new(
                &["**/*.html", "**/*.scss"],
                WatchAction::Rebuild(Pipeline::Markup),
            )?,
            WatchBinding::new(&[images.as_str()], WatchAction::Rebuild(Pipeline::Images))?,
        ],
    );

    let _ = std::fs::create_dir_all(&settings.dest_root);
    let mut dest = WatchScope::new(
        normalize_path(&settings.dest_root),
        vec![WatchBinding::new(&["**/*.html", images.as_str()], WatchAction::Reload)?],
    )
    .ignoring(source_root);
    if settings.writes_in_place() {
        dest = dest.ignoring(normalize_path(&settings.temp_dir));
    }

    Ok(vec![source, dest])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildMode;
    use crate::pipeline::BuildSettings;
    use crate::config::PipelineConfig;
    use std::fs;
    use tempfile::TempDir;

    fn settings(root: &std::path::Path, mode: BuildMode) -> BuildSettings {
        let mut config = PipelineConfig::default();
        config.set_root(&normalize_path(root));
        BuildSettings::resolve(&config, mode)
    }

    #[test]
    fn test_production_scopes() {
        let temp = TempDir::new().unwrap();
        let root = normalize_path(temp.path());
        fs::create_dir_all(root.join("src")).unwrap();

        let scopes = collect_watch_scopes(&settings(&root, BuildMode::Production)).unwrap();
        let actions = |path: &str| -> Vec<WatchAction> {
            scopes
                .iter()
                .flat_map(|s| s.actions_for(&root.join(path)))
                .collect()
        };

        assert_eq!(actions("src/a.html"), vec![WatchAction::Rebuild(Pipeline::Markup)]);
        assert_eq!(
            actions("src/p/img/a.png"),
            vec![WatchAction::Rebuild(Pipeline::Images)]
        );
        assert_eq!(actions("p/index.html"), vec![WatchAction::Reload]);
        assert!(actions("tmp/p/index.html").is_empty());
    }

    #[test]
    fn test_development_scopes() {
        let temp = TempDir::new().unwrap();
        let root = normalize_path(temp.path());
        fs::create_dir_all(root.join("src")).unwrap();

        let scopes = collect_watch_scopes(&settings(&root, BuildMode::Development)).unwrap();
        let actions = |path: &str| -> Vec<WatchAction> {
            scopes
                .iter()
                .flat_map(|s| s.actions_for(&root.join(path)))
                .collect()
        };

        assert_eq!(actions("tmp/p/index.html"), vec![WatchAction::Reload]);
        assert_eq!(actions("tmp/p/img/a.png"), vec![WatchAction::Reload]);
        assert!(actions("p/index.html").is_empty());
        assert!(root.join("tmp").is_dir());
    }
}
