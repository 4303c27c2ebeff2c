use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::config::Config;
use crate::envelope::{Envelope, ErrorInfo, Payload};
use crate::error::{Result, TubeFetchError};
use crate::services::search::SearchService;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/", get(api_root))
        .route("/api/sync", get(api_sync))
        .route("/api/search", post(api_search))
        .with_state(state)
}

async fn api_root() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"content": "You haven't specified the API call."})),
    )
}

async fn api_sync() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"content": "Not implemented."})),
    )
}

/// Decode the inbound envelope, run the search, and answer with the
/// converted envelope. Exactly one terminal response per call: each
/// failure branch returns immediately.
async fn api_search(State(state): State<AppState>, body: Bytes) -> Response {
    let envelope: Envelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(err) => {
            // Nothing decoded, so the reply converts a zero envelope.
            let reply = Envelope::default()
                .into_response(Payload::Error(ErrorInfo::new(err.to_string())));
            return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
        }
    };

    if !envelope.validate() {
        let reply =
            envelope.into_response(Payload::Error(ErrorInfo::new("invalid request envelope")));
        return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
    }

    let query = match &envelope.content {
        Some(Payload::Form(form)) => form.request.clone(),
        _ => {
            let reply = envelope.into_response(Payload::Error(ErrorInfo::new(
                "request content is not a search form",
            )));
            return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
        }
    };

    match state.search.search(&query).await {
        Ok(videos) => {
            let reply = envelope.into_response(Payload::Videos(videos));
            (StatusCode::OK, Json(reply)).into_response()
        }
        Err(err) => {
            let reply = envelope.into_response(Payload::Error(ErrorInfo::new(err.to_string())));
            (StatusCode::FORBIDDEN, Json(reply)).into_response()
        }
    }
}

pub async fn run(config: &Config, search: Arc<SearchService>) -> Result<()> {
    run_with_shutdown(config, search, futures::future::pending::<()>()).await
}

pub async fn run_with_shutdown<F>(
    config: &Config,
    search: Arc<SearchService>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(AppState { search });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TubeFetchError::Runtime(e.to_string()))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| TubeFetchError::Runtime(e.to_string()))?;

    Ok(())
}
