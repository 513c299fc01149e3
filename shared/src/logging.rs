//! Shared logging utilities for consistent tracing across the workspace

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Workspace crates whose events pass the default filter
const WORKSPACE_TARGETS: [&str; 3] = ["rotation", "selector", "shared"];

/// Build the env-filter directives for the workspace crates at `log_level`
pub fn filter_directives(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={base_level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` takes precedence when set; otherwise the workspace crates log
/// at `log_level` (default `info`) and everything else is filtered out.
pub fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for rotation-aware info logging
#[macro_export]
macro_rules! rotation_info {
    ($rotation_id:expr, $($arg:tt)*) => {
        tracing::info!(
            rotation = %$rotation_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for rotation-aware warning logging
#[macro_export]
macro_rules! rotation_warn {
    ($rotation_id:expr, $($arg:tt)*) => {
        tracing::warn!(
            rotation = %$rotation_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for rotation-aware error logging
#[macro_export]
macro_rules! rotation_error {
    ($rotation_id:expr, $($arg:tt)*) => {
        tracing::error!(
            rotation = %$rotation_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for rotation-aware debug logging
#[macro_export]
macro_rules! rotation_debug {
    ($rotation_id:expr, $($arg:tt)*) => {
        tracing::debug!(
            rotation = %$rotation_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(timestamp = format_timestamp(), "🚀 Starting {}", details);
}

/// Contextual logging helper for error conditions
pub fn log_error(context: &str, error: &dyn std::fmt::Display) {
    error!(
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(message: &str) {
    info!(timestamp = format_timestamp(), "✅ {}", message);
}
