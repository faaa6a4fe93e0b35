//! HTTP routes and handlers for the Headliner daemon API.

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use headliner_core::{GenerateRequest, GenerateResponse};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use super::state::AppState;
use crate::error::Result;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    // OPTIONS on any route is answered here without reaching a handler.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    Router::new()
        .route("/health", get(health))
        .route("/generate-titles", post(generate_titles))
        // Hosted-function path used by existing web clients
        .route("/functions/v1/generate-titles", post(generate_titles))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

// =============================================================================
// Health
// =============================================================================

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "headliner-daemon",
        "model": state.llm.model(),
        "api_key_configured": state.llm.has_api_key(),
        "uptime_seconds": state.uptime_seconds(),
    }))
}

// =============================================================================
// Title generation
// =============================================================================

async fn generate_titles(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>> {
    match handle_generate(&state, &body).await {
        Ok(titles) => Ok(Json(GenerateResponse { titles })),
        Err(e) => {
            error!("Error in generate-titles handler: {}", e);
            Err(e)
        }
    }
}

/// Decode the body and run one upstream round trip.
///
/// The body is decoded by hand so malformed JSON takes the same error path
/// as every other failure.
async fn handle_generate(state: &AppState, body: &[u8]) -> Result<Vec<String>> {
    let request: GenerateRequest = serde_json::from_slice(body)?;
    info!(context_len = request.context.len(), "Received context");
    debug!("Context: {}", request.context);

    state.llm.generate_titles(&request.context).await
}
