//! HTTP routes: health, room stats, the game socket and static assets.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, header};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config;
use crate::room::RoomManager;
use crate::room::manager::RoomStats;
use crate::ws;

#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RoomManager>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/stats", get(stats))
        .route("/ws", get(ws::connection::ws_handler))
        // Serve the client bundle for everything else
        .fallback_service(ServeDir::new(config::static_dir()))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET])
                .allow_headers([header::CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn healthz() -> &'static str { "ok" }

pub async fn stats(State(state): State<AppState>) -> Json<RoomStats> {
    Json(state.rooms.stats())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::game::GameConfig;

    fn app() -> Router {
        router(AppState { rooms: Arc::new(RoomManager::new(GameConfig::default())) })
    }

    #[tokio::test]
    async fn healthz_answers_ok() {
        let res = app().oneshot(Request::get("/healthz").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn stats_start_empty() {
        let res = app().oneshot(Request::get("/stats").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["rooms"], 0);
        assert_eq!(json["waiting"], false);
    }
}
