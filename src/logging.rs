// Logging module — powered by tracing-subscriber
//
// A compatibility bridge (`tracing_log::LogTracer`) captures all `log::*`
// macro calls from the library crates and routes them through the tracing
// subscriber.

use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Build the `EnvFilter` from the base level plus hardcoded noisy-crate
/// overrides.
fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let mut directives = vec![level.to_string()];

    // Suppress noisy third-party crates
    let noisy: &[(&str, &str)] = &[
        ("actix_server", "warn"),
        ("actix_web", "warn"),
        ("h2", "warn"),
        ("tracing", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{target}={lvl}"));
    }

    let filter = EnvFilter::try_new(directives.join(","))
        .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}"))?;
    Ok(filter)
}

/// Initializes logging to the server log file and, optionally, the console.
pub fn init_logging(level: &str, log_file: &str, log_to_console: bool) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(log_file).parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_filter(build_env_filter(level)?);

    let console_layer = if log_to_console {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(build_env_filter(level)?),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    // Route log::* macros into the subscriber; ignore the error when a
    // logger was already set (repeat init in tests).
    let _ = tracing_log::LogTracer::init();

    Ok(())
}
