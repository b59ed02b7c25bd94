//! Named task compositions.
//!
//! | Pipeline  | Graph                                              |
//! |-----------|----------------------------------------------------|
//! | `build`   | clean -> styles -> html, clean -> images (parallel) |
//! | `package` | build, then cleanup after html and images          |
//! | `markup`  | styles -> html                                     |
//! | `images`  | images                                             |

use std::fmt;

use anyhow::Result;

use super::clean::{clean, cleanup};
use super::context::BuildContext;
use super::graph::{GraphError, TaskGraph};
use super::html::finish_html;
use super::images::copy_images;
use super::styles::compile_styles;
use crate::log;
use crate::utils::plural_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskName {
    Clean,
    Styles,
    Html,
    Images,
    Cleanup,
}

impl TaskName {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Styles => "styles",
            Self::Html => "html",
            Self::Images => "images",
            Self::Cleanup => "cleanup",
        }
    }

    /// What the task's count refers to, for log lines.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Clean | Self::Cleanup => "dir",
            Self::Styles => "stylesheet",
            Self::Html => "page",
            Self::Images => "image",
        }
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named composition of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    Build,
    Package,
    /// Styles and html, triggered by markup or stylesheet edits.
    Markup,
    /// Images only, triggered by image edits.
    Images,
}

impl Pipeline {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Package => "package",
            Self::Markup => "markup",
            Self::Images => "images",
        }
    }

    pub fn graph(self) -> Result<TaskGraph, GraphError> {
        use TaskName::*;

        let mut graph = TaskGraph::new();
        match self {
            Self::Build | Self::Package => {
                graph
                    .add(Clean, &[], |ctx| clean(&ctx.settings))?
                    .add(Styles, &[Clean], styles_task)?
                    .add_parallel(Images, &[Clean], copy_images)?
                    .add(Html, &[Styles], finish_html)?;
                if self == Self::Package {
                    graph.add(Cleanup, &[Html, Images], |ctx| cleanup(&ctx.settings))?;
                }
            }
            Self::Markup => {
                graph
                    .add(Styles, &[], styles_task)?
                    .add(Html, &[Styles], finish_html)?;
            }
            Self::Images => {
                graph.add(Images, &[], copy_images)?;
            }
        }
        Ok(graph)
    }

    pub fn run(self, ctx: &BuildContext) -> Result<()> {
        crate::debug!("pipeline"; "{} ({})", self.label(), ctx.settings.mode);
        self.graph()?.run(ctx)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn styles_task(ctx: &BuildContext) -> Result<usize> {
    let report = compile_styles(ctx)?;
    if !report.failed.is_empty() {
        log!(
            "styles";
            "{} of {} failed to compile",
            report.failed.len(),
            plural_count(report.attempted(), "stylesheet")
        );
    }
    Ok(report.compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildMode;
    use crate::pipeline::inline::{CssInlineEngine, CssInliner, InlineError, InlineOptions};
    use crate::pipeline::settings::test_settings;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_site(root: &Path) {
        write(
            root,
            "src/pages/index.html",
            concat!(
                r#"<html><head><link rel="stylesheet" href="styles/main.css"></head>"#,
                r#"<body><p class="lead">hi</p><img src="img/logo.png" alt=""></body></html>"#,
            ),
        );
        write(root, "src/pages/styles/main.scss", "$c: red;\n.lead { color: $c; }\n");
        write(root, "src/pages/img/logo.png", "png");
    }

    /// Fails unless the compiled stylesheet is already on disk.
    struct RequiresStyles;

    impl CssInliner for RequiresStyles {
        fn inline(&self, html: &str, base: &Path, opts: &InlineOptions) -> Result<String, InlineError> {
            assert!(base.join("styles/main.css").exists(), "styles ran after html");
            CssInlineEngine.inline(html, base, opts)
        }
    }

    #[test]
    fn test_graph_shapes() {
        use TaskName::*;
        assert_eq!(
            Pipeline::Build.graph().unwrap().layers(),
            vec![vec![Clean], vec![Styles, Images], vec![Html]]
        );
        assert_eq!(
            Pipeline::Package.graph().unwrap().layers(),
            vec![vec![Clean], vec![Styles, Images], vec![Html], vec![Cleanup]]
        );
        assert_eq!(
            Pipeline::Markup.graph().unwrap().layers(),
            vec![vec![Styles], vec![Html]]
        );
        assert_eq!(Pipeline::Images.graph().unwrap().layers(), vec![vec![Images]]);
    }

    #[test]
    fn test_styles_written_before_html() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        sample_site(root);

        let ctx = BuildContext::new(test_settings(root, BuildMode::Development))
            .with_inliner(RequiresStyles);
        Pipeline::Markup.run(&ctx).unwrap();

        let out = fs::read_to_string(root.join("tmp/pages/index.html")).unwrap();
        assert!(out.contains("red"));
        assert!(out.contains(r#"src="img/logo.png""#));
    }

    #[test]
    fn test_package_production() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");
        sample_site(&root);

        let ctx = BuildContext::new(test_settings(&root, BuildMode::Production));
        Pipeline::Package.run(&ctx).unwrap();

        let out = fs::read_to_string(root.join("pages/index.html")).unwrap();
        assert!(out.contains("https://cdn.example/assets/pages/img/logo.png"));
        assert!(out.contains("red"));
        assert!(!out.contains("class="));
        assert_eq!(fs::read_to_string(root.join("pages/img/logo.png")).unwrap(), "png");

        // Destination-side styles are gone, sources untouched.
        assert!(!root.join("pages/styles").exists());
        assert!(root.join("src/pages/styles/main.scss").exists());
    }

    #[test]
    fn test_build_cleans_temp_dir_first() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");
        sample_site(&root);
        write(&root, "tmp/stale.html", "old");

        let ctx = BuildContext::new(test_settings(&root, BuildMode::Development));
        Pipeline::Build.run(&ctx).unwrap();

        assert!(!root.join("tmp/stale.html").exists());
        assert!(root.join("tmp/pages/index.html").exists());
        assert!(root.join("tmp/pages/styles/main.css").exists());
        assert!(root.join("tmp/pages/img/logo.png").exists());
    }

    #[test]
    fn test_build_on_single_thread_pool() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");
        sample_site(&root);
        write(&root, "tmp/stale.html", "old");

        let ctx = BuildContext::new(test_settings(&root, BuildMode::Development));
        let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        pool.install(|| Pipeline::Build.run(&ctx)).unwrap();

        assert!(!root.join("tmp/stale.html").exists());
        assert!(root.join("tmp/pages/index.html").exists());
        assert!(root.join("tmp/pages/styles/main.css").exists());
        assert!(root.join("tmp/pages/img/logo.png").exists());
    }
}
