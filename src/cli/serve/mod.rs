//! Development server with live reload support.
//!
//! Serves the destination root over HTTP. When watching, HTML responses get
//! the reload client injected and the actor system runs alongside the
//! request loop.

mod content;
mod lifecycle;
mod path;
mod response;

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use anyhow::{Context, Result};
use crossbeam::channel;
use tiny_http::{Request, Server};

use crate::{config::ServeConfig, debug, log, pipeline::BuildContext};

/// Default WebSocket port for hot reload
pub const DEFAULT_WS_PORT: u16 = 35729;

/// Request handler threads.
const REQUEST_THREADS: usize = 4;

/// Actual WebSocket port (may differ from the configured one if it was in use)
/// Updated by coordinator after WebSocket server binds successfully
static ACTUAL_WS_PORT: AtomicU16 = AtomicU16::new(DEFAULT_WS_PORT);

/// Update the actual WebSocket port (called by coordinator after binding)
pub fn set_actual_ws_port(port: u16) {
    ACTUAL_WS_PORT.store(port, Ordering::Relaxed);
}

/// Get the actual WebSocket port
fn get_actual_ws_port() -> u16 {
    ACTUAL_WS_PORT.load(Ordering::Relaxed)
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    interface: IpAddr,
    ws_port: Option<u16>,
    shutdown_rx: channel::Receiver<()>,
    serve_root: PathBuf,
}

/// Bind the HTTP server on `serve_root` without starting the request loop.
pub fn bind_server(serve_root: &Path, serve: &ServeConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(serve.interface, serve.port)?;
    let server = Arc::new(server);

    let ws_port = serve.watch.then_some(serve.ws_port);
    if let Some(port) = ws_port {
        set_actual_ws_port(port);
        debug!("hotreload"; "ws://{}:{}", serve.interface, port);
    }

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        addr,
        interface: serve.interface,
        ws_port,
        shutdown_rx,
        serve_root: serve_root.to_path_buf(),
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the watch loop (if enabled) and the request loop (blocking).
    pub fn run(self, ctx: BuildContext) -> Result<()> {
        let actor_handle =
            lifecycle::spawn_actors(ctx, self.interface, self.ws_port, self.shutdown_rx);
        let result = run_request_loop(&self.server, &self.serve_root, self.ws_port.is_some());
        lifecycle::wait_for_shutdown(actor_handle);
        result
    }
}

fn run_request_loop(server: &Server, serve_root: &Path, reload: bool) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
        .context("failed to create request thread pool")?;

    let serve_root = Arc::new(serve_root.to_path_buf());
    for request in server.incoming_requests() {
        let serve_root = Arc::clone(&serve_root);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &serve_root, reload) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, serve_root: &Path, reload: bool) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    // The reload client is served from memory so it never collides with site files
    if reload && request.url() == crate::embed::serve::HOTRELOAD_URL {
        return response::respond_hotreload_js(request, get_actual_ws_port());
    }

    if let Some(path) = path::resolve_path(request.url(), serve_root) {
        return response::respond_file(request, &path, reload);
    }

    response::respond_not_found(request, serve_root, reload)
}
