//! Signal-driven shutdown
//!
//! The watcher runs as its own task and only cancels the shared token; the
//! sequencer observes the token and does the cleanup itself, so nothing is
//! shared between the two tasks but the token.

use std::future::Future;
use std::io;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Spawns a task that cancels `shutdown` on SIGINT or SIGTERM
pub fn spawn_signal_watcher(shutdown: CancellationToken) -> JoinHandle<()> {
    spawn_watcher(shutdown, wait_for_signal())
}

/// Spawns a task that cancels `shutdown` once `signal` resolves with the
/// name of the signal received
///
/// An error from `signal` is logged and leaves the token untouched.
pub fn spawn_watcher<F>(shutdown: CancellationToken, signal: F) -> JoinHandle<()>
where
    F: Future<Output = io::Result<&'static str>> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.cancelled() => {}
            result = signal => match result {
                Ok(signal) => {
                    info!("Received {}, shutting down", signal);
                    shutdown.cancel();
                }
                Err(e) => error!("Failed to listen for termination signals: {}", e),
            }
        }
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|_| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "Ctrl-C")
}
