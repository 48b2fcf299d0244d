// Frontdesk server entrypoint
//!
//! The heavy lifting (initialization, middleware wiring, server run loop)
//! lives in dedicated modules so this file remains a thin orchestrator.

use frontdesk_server::config::ServerConfig;

mod lifecycle;
mod logging;

use anyhow::Result;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fallback to defaults when config file missing)
    let config_path = "config.toml";
    let config = ServerConfig::load_or_default(config_path)?;

    // Logging before any other side effects
    let server_log_path = format!("{}/server.log", config.logging.logs_path);
    logging::init_logging(
        &config.logging.level,
        &server_log_path,
        config.logging.log_to_console,
    )?;

    info!("Frontdesk server v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    let ctx = lifecycle::bootstrap(&config)?;
    lifecycle::run(&config, ctx).await
}
