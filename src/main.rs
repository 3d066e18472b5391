use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::geo::GeoBucketService;
use crate::responses::html_error_response;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod errors;
mod geo;
mod responses;
mod router;
mod seed;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(1);
    }
    tracing::info!(
        grid_size = config.location.grid_size,
        stop_words = ?config.location.stop_words,
        "location config"
    );

    // 1️⃣ Create the database handle and apply the schema
    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let svc = GeoBucketService::new(&config.location);

    // 2️⃣ Optional demo data
    if config.seed_demo {
        if let Err(e) = seed::seed_demo_data(&db, &svc) {
            tracing::error!(error = %e, "seeding demo data failed");
            std::process::exit(1);
        }
    }

    // 3️⃣ Start the server
    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(bind_addr = %config.bind_addr, error = %e, "invalid bind address");
            std::process::exit(1);
        }
    };
    tracing::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(config.max_workers);

    // 4️⃣ Serve requests, passing db + service into the closure
    let result = server.serve(move |req, _info| match handle(req, &db, &svc) {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!(error = %err, "request failed");
            html_error_response(&err)
        }
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("Server shut down cleanly.");
}
