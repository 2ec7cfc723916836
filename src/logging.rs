use color_eyre::{eyre::eyre, Result};
use tracing::subscriber::DefaultGuard;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::LoggingConfig;

/// Keeps the subscriber installed for as long as it is alive
///
/// The subscriber is scoped to the thread that created the guard, so the
/// binary runs on a current-thread runtime.
pub struct LogGuard {
    _guard: DefaultGuard,
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        info!("Logging shut down");
    }
}

pub fn init(config: &LoggingConfig) -> Result<LogGuard> {
    let level: Level = config
        .level
        .parse()
        .map_err(|e| eyre!("Invalid log level {:?}: {}", config.level, e))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);
    info!("Logging initialized at {}", level);
    Ok(LogGuard { _guard: guard })
}
