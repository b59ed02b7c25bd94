//! Build Actor - runs watch-triggered pipelines one at a time.
//!
//! Requests that arrive while a pipeline is running wait in the channel.
//! When the run finishes, everything queued is drained and coalesced, so a
//! burst of edits never runs the same pipeline twice in a row.

use tokio::sync::mpsc;

use super::messages::BuildMsg;
use crate::logger::{status_error, status_success};
use crate::pipeline::{BuildContext, Pipeline};

pub struct BuildActor {
    rx: mpsc::Receiver<BuildMsg>,
    ctx: BuildContext,
}

impl BuildActor {
    pub fn new(rx: mpsc::Receiver<BuildMsg>, ctx: BuildContext) -> Self {
        Self { rx, ctx }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            let mut queue = Vec::new();
            let mut shutdown = false;
            match msg {
                BuildMsg::Run(pipeline) => queue.push(pipeline),
                BuildMsg::Shutdown => shutdown = true,
            }

            while let Ok(msg) = self.rx.try_recv() {
                match msg {
                    BuildMsg::Run(pipeline) => queue.push(pipeline),
                    BuildMsg::Shutdown => shutdown = true,
                }
            }

            if shutdown {
                crate::debug!("build"; "shutting down");
                break;
            }

            for pipeline in coalesce(queue) {
                self.execute(pipeline).await;
            }
        }
    }

    async fn execute(&self, pipeline: Pipeline) {
        let ctx = self.ctx.clone();
        let result = tokio::task::spawn_blocking(move || pipeline.run(&ctx)).await;

        match result {
            Ok(Ok(())) => status_success(&format!("{pipeline} rebuilt")),
            Ok(Err(e)) => status_error(&format!("{pipeline} failed"), &format!("{e:#}")),
            Err(e) => status_error(&format!("{pipeline} panicked"), &e.to_string()),
        }
    }
}

/// Deduplicate queued requests, keeping first-request order.
///
/// A full build or package already covers the markup and image pipelines.
fn coalesce(queue: Vec<Pipeline>) -> Vec<Pipeline> {
    let full = queue
        .iter()
        .any(|p| matches!(p, Pipeline::Build | Pipeline::Package));

    let mut out: Vec<Pipeline> = Vec::with_capacity(queue.len());
    for pipeline in queue {
        if full && matches!(pipeline, Pipeline::Markup | Pipeline::Images) {
            continue;
        }
        if !out.contains(&pipeline) {
            out.push(pipeline);
        }
    }
    out
}
