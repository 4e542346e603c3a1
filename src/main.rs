use axum::{routing::{get, post}, Router};
use log::{debug, error, info};
use simplelog::*;
mod config;
mod controllers;
mod dao;
mod database;
mod errors;
mod models;
use crate::config::Config;
use crate::dao::PieceDao;
use crate::database::Database;

// Shared immutable state. The DAO is created once here and handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pieces: PieceDao,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {

    let config = Config::from_env()?;

    // set up logging facility
    let _ = SimpleLogger::init(config.log_level, simplelog::Config::default());
    info!("Starting..");
    debug!("listen_addr: {}, max_connections: {}", config.listen_addr, config.max_connections);

    let db = Database::connect(&config.database_url, config.max_connections).await?;
    let state = AppState {
        pieces: PieceDao::new(db.clone()),
    };

    // Define routes
    let app = Router::new()
        .route("/room/:room_number/pieces", get(controllers::piece::get_pieces)
            .post(controllers::piece::add_pieces)
            .put(controllers::piece::replace_pieces)
            .delete(controllers::piece::delete_pieces))
        .route("/room/:room_number/reset", post(controllers::piece::reset_room))
        .with_state(state);

    // Start the server
    debug!("Listening on {}", config.listen_addr);
    axum::Server::bind(&config.listen_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let running queries finish before the process goes away
    info!("Shutting down..");
    db.pool().close().await;

    Ok(())

}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for the shutdown signal: {:?}", err);
    }
}
