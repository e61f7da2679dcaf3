use std::sync::Arc;

use mineduel::http::routes::{self, AppState};
use mineduel::room::RoomManager;
use mineduel::{config, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let game = config::game_config()?;
    tracing::info!(?game, "match parameters");
    let state = AppState { rooms: Arc::new(RoomManager::new(game)) };
    let app = routes::router(state);

    let addr = config::server_addr();
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
