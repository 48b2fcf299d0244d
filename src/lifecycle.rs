//! Server lifecycle management helpers.
//!
//! Encapsulates the heavy lifting so `main.rs` stays a thin orchestrator:
//! opening storage, building the application context, seeding, and wiring
//! the HTTP server.

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use frontdesk_core::AppContext;
use frontdesk_server::{config::ServerConfig, middleware};
use frontdesk_store::RocksDbBackend;
use log::info;
use std::sync::Arc;

/// Initialize RocksDB, build the entity stores, and seed on first boot.
pub fn bootstrap(config: &ServerConfig) -> Result<Arc<AppContext>> {
    let phase_start = std::time::Instant::now();

    let db_path = &config.storage.data_path;
    std::fs::create_dir_all(db_path)?;

    let backend = Arc::new(RocksDbBackend::open(db_path)?);
    info!(
        "RocksDB initialized at {} ({:.2}ms)",
        db_path,
        phase_start.elapsed().as_secs_f64() * 1000.0
    );

    let ctx = AppContext::init(backend)?;

    // First boot populates the seed roster; later boots are cheap reads.
    let phase_start = std::time::Instant::now();
    ctx.ensure_seed_all()?;
    info!(
        "Entity stores ready: {} seminar(s), {} attendee(s) ({:.2}ms)",
        ctx.seminars().list()?.len(),
        ctx.attendees().list()?.len(),
        phase_start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(ctx)
}

/// Run the HTTP server until shutdown.
pub async fn run(config: &ServerConfig, ctx: Arc<AppContext>) -> Result<()> {
    let bind_addr = (config.server.host.clone(), config.server.port);
    info!(
        "Listening on http://{}:{} with {} worker(s)",
        config.server.host, config.server.port, config.server.workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(ctx.clone()))
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors())
            .configure(frontdesk_api::configure_routes)
    })
    .workers(config.server.workers)
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
