//! Logging initialization

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::DebugConfig;

/// Initialize the logging system
///
/// Sets up:
/// - A compact stderr layer (stdout is reserved for command output)
/// - A daily-rotated `portal.log` in `PORTAL_LOG_DIR` when it is set
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the program.
pub fn init(config: &DebugConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("portal=info,warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.is_debug_enabled())
        .compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    let Some(log_dir) = config.log_dir.as_ref() else {
        registry.init();
        return None;
    };

    if let Err(e) = fs::create_dir_all(log_dir) {
        registry.init();
        tracing::warn!(log_dir = %log_dir.display(), error = %e, "Failed to create log directory, file logging disabled");
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, "portal.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI codes in log files

    registry.with(file_layer).init();

    tracing::debug!(log_dir = %log_dir.display(), log_level = %config.log_level, "File logging initialized");
    Some(guard)
}
