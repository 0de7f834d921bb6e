//! Logging initialization.
//!
//! Logs go to stderr; stdout carries captions and JSON results.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// The RUST_LOG environment variable overrides the level chosen here.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Pick level and format from config, with CLI overrides.
///
/// `show_payload` output is emitted at debug level, so enabling it raises
/// the core crate to debug.
pub fn init_from_config(
    config: &framecap_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    let level = filter_directive(
        &config.logging.level,
        verbose_override,
        config.logging.show_payload,
    );
    let json_format = json_logs_override || config.logging.format == "json";
    init(&level, json_format);
}

fn filter_directive(level: &str, verbose: bool, show_payload: bool) -> String {
    if verbose {
        "debug".to_string()
    } else if show_payload {
        format!("{level},framecap_core=debug")
    } else {
        level.to_string()
    }
}
