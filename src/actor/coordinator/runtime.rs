use std::time::Duration;

use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use crate::actor::builder::BuildActor;
use crate::actor::fs::FsActor;
use crate::actor::messages::{BuildMsg, WsMsg};
use crate::actor::ws::WsActor;

/// Run all actors concurrently until shutdown or until one of them exits.
pub(super) async fn run_actors(
    fs: FsActor,
    builder: BuildActor,
    ws: WsActor,
    build_tx: mpsc::Sender<BuildMsg>,
    ws_tx: mpsc::Sender<WsMsg>,
    shutdown_rx: Option<Receiver<()>>,
) {
    let fs_handle = tokio::spawn(async move { fs.run().await });
    let build_handle = tokio::spawn(async move { builder.run().await });
    let ws_handle = tokio::spawn(async move { ws.run().await });

    let shutdown = async {
        match shutdown_rx {
            Some(rx) => loop {
                if rx.try_recv().is_ok() {
                    crate::debug!("actor"; "shutdown signal received");
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            },
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        _ = shutdown => {}
        _ = fs_handle => {}
    }

    let _ = build_tx.send(BuildMsg::Shutdown).await;
    let _ = ws_tx.send(WsMsg::Shutdown).await;

    // A running build finishes its current pipeline first
    let grace = Duration::from_millis(500);
    let _ = tokio::time::timeout(grace, build_handle).await;
    let _ = tokio::time::timeout(grace, ws_handle).await;
}
