use crate::config::Config;
use astra::Server;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod analysis;
mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod spreadsheets;
mod state;
mod store;
mod templates;
mod upstream;


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::parse();

    let state = match config.build_state() {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    info!("Starting server at http://{}", config.bind);

    let server = Server::bind(config.bind).max_workers(config.workers);

    let result = server.serve(move |req, _info| router::respond(req, &state));

    if let Err(e) = result {
        error!("Server ended with error: {e}");
        std::process::exit(1);
    }

    info!("Server shut down cleanly.");
}
