//! FileSystem Actor
//!
//! Watches the source and destination trees and turns debounced changes
//! into rebuild requests and reload notifications.
//!
//! ```text
//! Watcher → Debouncer (pure timing) → Router (bindings) → BuildMsg / WsMsg
//! ```

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use super::messages::{BuildMsg, WsMsg};

// Glob patterns bound to actions, per watched root.
mod binding;
// Pure timing and deduplication.
mod debouncer;
// Debounced changes -> actions.
mod router;
// Shared fs event types.
mod types;
// Watch root attach/re-attach lifecycle.
mod watch_roots;


pub use binding::{WatchBinding, WatchScope};
pub use types::WatchAction;

use debouncer::Debouncer;
use router::route;
use watch_roots::WatchRoots;

/// FileSystem Actor - watches for file changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    watch_roots: WatchRoots,
    scopes: Vec<WatchScope>,
    build_tx: mpsc::Sender<BuildMsg>,
    ws_tx: mpsc::Sender<WsMsg>,
    debouncer: Debouncer,
}

impl FsActor {
    /// Create the actor and start watching every scope root immediately.
    pub fn new(
        scopes: Vec<WatchScope>,
        build_tx: mpsc::Sender<BuildMsg>,
        ws_tx: mpsc::Sender<WsMsg>,
    ) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let mut watch_roots = WatchRoots::new(scopes.iter().map(|s| s.root.clone()).collect());
        watch_roots.attach_existing(&mut watcher)?;

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            scopes,
            build_tx,
            ws_tx,
            debouncer: Debouncer::new(),
        })
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let Self {
            notify_rx,
            mut watcher,
            mut watch_roots,
            scopes,
            build_tx,
            ws_tx,
            mut debouncer,
        } = self;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        // notify is sync; bridge its events onto the async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                event = async_rx.recv() => match event {
                    Some(event) => debouncer.add_event(&event),
                    None => break,
                },
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    watch_roots.maintain(&mut watcher);
                    if process_changes(&mut debouncer, &scopes, &build_tx, &ws_tx).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Route debounced changes to the build and ws actors.
///
/// Returns `Err(())` once a receiving actor shut down.
async fn process_changes(
    debouncer: &mut Debouncer,
    scopes: &[WatchScope],
    build_tx: &mpsc::Sender<BuildMsg>,
    ws_tx: &mpsc::Sender<WsMsg>,
) -> Result<(), ()> {
    let Some(changes) = debouncer.take_if_ready() else {
        return Ok(());
    };

    let routed = route(changes, scopes);
    if routed.is_empty() {
        return Ok(());
    }

    for pipeline in routed.rebuilds {
        crate::debug!("watch"; "rebuild {}", pipeline);
        build_tx.send(BuildMsg::Run(pipeline)).await.map_err(|_| ())?;
    }
    if let Some(reason) = routed.reload {
        ws_tx.send(WsMsg::Reload { reason }).await.map_err(|_| ())?;
    }
    Ok(())
}
