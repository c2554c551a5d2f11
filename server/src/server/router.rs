use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::api;
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let body_limit = state.max_upload_bytes();
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Composition ---
        .route(
            "/generate-quote-image/",
            post(api::quote::generate_quote_image).layer(DefaultBodyLimit::max(body_limit)),
        )
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler(State(state): State<SharedState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "config": state.config(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;

    #[tokio::test]
    async fn status_reports_ok_and_config() {
        let app = create_router(SharedState::new(ServerConfig::default()));
        let response = app
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["config"]["canvas_width"], 512);
    }
}
