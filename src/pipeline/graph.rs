//! Task dependency graph with a layered executor.
//!
//! Nodes are added in dependency order: every predecessor must already be
//! in the graph, which keeps the graph acyclic by construction. Execution
//! walks the graph in layers, where a node's layer is one past the deepest
//! of its predecessors:
//!
//! ```text
//! layer 0   clean
//! layer 1   styles        images (parallel)
//! layer 2   html
//! layer 3   cleanup
//! ```
//!
//! Each layer is a full barrier. Within a layer, serial nodes run one after
//! another while parallel nodes run alongside them on rayon. The first
//! failure stops every later layer.

use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;
use thiserror::Error;

use super::compose::TaskName;
use super::context::BuildContext;
use crate::log;
use crate::utils::plural_count;

/// Task body. Returns the number of files it produced or removed.
pub type TaskFn = Box<dyn Fn(&BuildContext) -> Result<usize> + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("task `{0}` is already in the graph")]
    Duplicate(TaskName),
    #[error("task `{task}` runs after `{missing}`, which is not in the graph")]
    UnknownPredecessor { task: TaskName, missing: TaskName },
}

struct TaskNode {
    name: TaskName,
    after: Vec<TaskName>,
    parallel: bool,
    layer: usize,
    run: TaskFn,
}

#[derive(Default)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a serial task running after `after`.
    pub fn add(
        &mut self,
        name: TaskName,
        after: &[TaskName],
        run: impl Fn(&BuildContext) -> Result<usize> + Send + Sync + 'static,
    ) -> Result<&mut Self, GraphError> {
        self.insert(name, after, false, Box::new(run))
    }

    /// Add a task in the parallel group, running after `after`.
    pub fn add_parallel(
        &mut self,
        name: TaskName,
        after: &[TaskName],
        run: impl Fn(&BuildContext) -> Result<usize> + Send + Sync + 'static,
    ) -> Result<&mut Self, GraphError> {
        self.insert(name, after, true, Box::new(run))
    }

    fn insert(
        &mut self,
        name: TaskName,
        after: &[TaskName],
        parallel: bool,
        run: TaskFn,
    ) -> Result<&mut Self, GraphError> {
        if self.node(name).is_some() {
            return Err(GraphError::Duplicate(name));
        }

        let mut layer = 0;
        for &pred in after {
            let node = self.node(pred).ok_or(GraphError::UnknownPredecessor {
                task: name,
                missing: pred,
            })?;
            layer = layer.max(node.layer + 1);
        }

        self.nodes.push(TaskNode {
            name,
            after: after.to_vec(),
            parallel,
            layer,
            run,
        });
        Ok(self)
    }

    fn node(&self, name: TaskName) -> Option<&TaskNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    #[cfg(test)]
    pub fn contains(&self, name: TaskName) -> bool {
        self.node(name).is_some()
    }

    /// Predecessors of `name`, in insertion order.
    #[cfg(test)]
    pub fn predecessors(&self, name: TaskName) -> Option<&[TaskName]> {
        self.node(name).map(|node| node.after.as_slice())
    }

    /// Task names grouped by execution layer.
    pub fn layers(&self) -> Vec<Vec<TaskName>> {
        self.layered()
            .into_iter()
            .map(|layer| layer.into_iter().map(|node| node.name).collect())
            .collect()
    }

    fn layered(&self) -> Vec<Vec<&TaskNode>> {
        let depth = self.nodes.iter().map(|n| n.layer + 1).max().unwrap_or(0);
        let mut layers: Vec<Vec<&TaskNode>> = (0..depth).map(|_| Vec::new()).collect();
        for node in &self.nodes {
            layers[node.layer].push(node);
        }
        layers
    }

    /// Run every task, layer by layer.
    pub fn run(&self, ctx: &BuildContext) -> Result<()> {
        for layer in self.layered() {
            let (parallel, serial): (Vec<&TaskNode>, Vec<&TaskNode>) =
                layer.into_iter().partition(|node| node.parallel);

            let (serial_result, parallel_result) = rayon::join(
                || serial.iter().try_for_each(|node| run_node(node, ctx)),
                || parallel.par_iter().try_for_each(|node| run_node(node, ctx)),
            );
            serial_result?;
            parallel_result?;
        }
        Ok(())
    }
}

fn run_node(node: &TaskNode, ctx: &BuildContext) -> Result<()> {
    let start = Instant::now();
    let count = (node.run)(ctx).with_context(|| format!("task `{}` failed", node.name))?;
    log!(node.name.label(); "{} in {}ms", plural_count(count, node.name.noun()), start.elapsed().as_millis());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildMode;
    use crate::pipeline::settings::test_settings;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tempfile::TempDir;

    type Trace = Arc<Mutex<Vec<String>>>;

    fn record(trace: &Trace, name: &'static str) -> impl Fn(&BuildContext) -> Result<usize> + use<> {
        let trace = Arc::clone(trace);
        move |_| {
            trace.lock().push(name.to_string());
            Ok(0)
        }
    }

    fn context(temp: &TempDir) -> BuildContext {
        BuildContext::new(test_settings(temp.path(), BuildMode::Development))
    }

    #[test]
    fn test_layers() {
        let trace = Trace::default();
        let mut graph = TaskGraph::new();
        graph.add(TaskName::Clean, &[], record(&trace, "clean")).unwrap();
        graph.add(TaskName::Styles, &[TaskName::Clean], record(&trace, "styles")).unwrap();
        graph.add_parallel(TaskName::Images, &[TaskName::Clean], record(&trace, "images")).unwrap();
        graph.add(TaskName::Html, &[TaskName::Styles], record(&trace, "html")).unwrap();
        graph
            .add(TaskName::Cleanup, &[TaskName::Html, TaskName::Images], record(&trace, "cleanup"))
            .unwrap();

        assert_eq!(
            graph.layers(),
            vec![
                vec![TaskName::Clean],
                vec![TaskName::Styles, TaskName::Images],
                vec![TaskName::Html],
                vec![TaskName::Cleanup],
            ]
        );
        assert_eq!(
            graph.predecessors(TaskName::Cleanup),
            Some(&[TaskName::Html, TaskName::Images][..])
        );
    }

    #[test]
    fn test_run_respects_order() {
        let temp = TempDir::new().unwrap();
        let trace = Trace::default();
        let mut graph = TaskGraph::new();
        graph.add(TaskName::Clean, &[], record(&trace, "clean")).unwrap();
        graph.add(TaskName::Styles, &[TaskName::Clean], record(&trace, "styles")).unwrap();
        graph.add_parallel(TaskName::Images, &[TaskName::Clean], record(&trace, "images")).unwrap();
        graph.add(TaskName::Html, &[TaskName::Styles], record(&trace, "html")).unwrap();

        graph.run(&context(&temp)).unwrap();

        let trace = trace.lock();
        let pos = |name: &str| trace.iter().position(|t| t == name).unwrap();
        assert_eq!(trace.len(), 4);
        assert_eq!(pos("clean"), 0);
        assert!(pos("styles") < pos("html"));
        assert!(pos("images") < pos("html"));
    }

    #[test]
    fn test_forward_reference_rejected() {
        let mut graph = TaskGraph::new();
        let err = graph
            .add(TaskName::Html, &[TaskName::Styles], |_| Ok(0))
            .err()
            .unwrap();
        assert_eq!(
            err,
            GraphError::UnknownPredecessor {
                task: TaskName::Html,
                missing: TaskName::Styles
            }
        );
        assert!(!graph.contains(TaskName::Html));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut graph = TaskGraph::new();
        graph.add(TaskName::Clean, &[], |_| Ok(0)).unwrap();
        let err = graph.add(TaskName::Clean, &[], |_| Ok(0)).err().unwrap();
        assert_eq!(err, GraphError::Duplicate(TaskName::Clean));
    }

    #[test]
    fn test_failure_stops_later_layers() {
        let temp = TempDir::new().unwrap();
        let trace = Trace::default();
        let mut graph = TaskGraph::new();
        graph.add(TaskName::Clean, &[], record(&trace, "clean")).unwrap();
        graph
            .add(TaskName::Styles, &[TaskName::Clean], |_| anyhow::bail!("boom"))
            .unwrap();
        graph.add_parallel(TaskName::Images, &[TaskName::Clean], record(&trace, "images")).unwrap();
        graph.add(TaskName::Html, &[TaskName::Styles], record(&trace, "html")).unwrap();

        let err = graph.run(&context(&temp)).unwrap_err();
        assert!(format!("{err:#}").contains("task `styles` failed"));

        let trace = trace.lock();
        assert!(trace.contains(&"clean".to_string()));
        // Same-layer work finishes, dependents never start.
        assert!(trace.contains(&"images".to_string()));
        assert!(!trace.contains(&"html".to_string()));
    }
}
