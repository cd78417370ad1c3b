// Signal handling module
//
// Shutdown is requested by:
// - SIGINT  (Ctrl+C)
// - SIGTERM (Unix only)
//
// Handlers are installed by `ShutdownSignals::register`, not on first poll, so
// a signal that arrives before the accept loop starts is still observed.

use crate::error::{Result, ServerError};

/// Shutdown signal handlers, installed and waiting to be awaited
#[cfg(unix)]
pub struct ShutdownSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    /// Install the SIGINT and SIGTERM handlers. Must be called from within a Tokio runtime.
    pub fn register() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let interrupt = signal(SignalKind::interrupt())
            .map_err(|source| ServerError::Signal { signal: "SIGINT", source })?;
        let terminate = signal(SignalKind::terminate())
            .map_err(|source| ServerError::Signal { signal: "SIGTERM", source })?;
        Ok(Self { interrupt, terminate })
    }

    /// Resolve when either signal has been delivered since `register`
    pub async fn recv(mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => {}
            _ = self.terminate.recv() => {}
        }
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub struct ShutdownSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(not(unix))]
impl ShutdownSignals {
    pub fn register() -> Result<Self> {
        let ctrl_c = tokio::signal::windows::ctrl_c()
            .map_err(|source| ServerError::Signal { signal: "Ctrl+C", source })?;
        Ok(Self { ctrl_c })
    }

    pub async fn recv(mut self) {
        self.ctrl_c.recv().await;
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_inside_runtime() {
        assert!(ShutdownSignals::register().is_ok());
    }
}
