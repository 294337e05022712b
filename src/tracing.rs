//! Tracing setup for hosts embedding the resolver
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs, including skipped description entries
//! - `RUST_LOG=whichkey::resolver=trace` - one line per resolution
//! - `RUST_LOG=whichkey::policy=debug` - refused unknown sequences
//!
//! Logs are also written to `~/.config/whichkey/logs/whichkey.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. The file layer
/// always logs at debug level. Calling this twice, or after the host has
/// installed its own subscriber, leaves the existing subscriber in place.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "whichkey.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: tracing already initialized: {}", e);
    }
}
