// Server module entry point
// Listener setup, accept loop, per-connection service and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword)
#[path = "loop.rs"]
pub mod server_loop;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::error::{Result, ServerError};

pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::ShutdownSignals;

/// A bound, not yet running, file server
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind the listening socket. Must be called from within a Tokio runtime.
    pub fn bind(addr: SocketAddr, state: Arc<AppState>) -> Result<Self> {
        let listener = create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;
        Ok(Self { listener, state })
    }

    /// Actual bound address (useful after binding port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves, then close the listener
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        start_server_loop(self.listener, self.state, shutdown).await;
    }
}
