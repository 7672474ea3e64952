//! Axum REST API over the indexed event store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db;
use crate::events::EventRecord;

#[derive(Clone)]
struct ApiState {
    pool: SqlitePool,
}

/// Build the API router over a shared database pool.
pub fn router(pool: SqlitePool) -> Router {
    let state = Arc::new(ApiState { pool });
    Router::new()
        .route("/health", get(health))
        .route("/events", get(get_all_events))
        .route("/surveys/:owner/:id/events", get(get_survey_events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SurveyEventsResponse {
    owner: String,
    survey_id: String,
    count: usize,
    events: Vec<EventRecord>,
}

#[derive(Serialize)]
struct AllEventsResponse {
    count: usize,
    events: Vec<EventRecord>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /surveys/:owner/:id/events`
///
/// Returns all indexed events for the given owner-scoped survey.
async fn get_survey_events(
    State(state): State<Arc<ApiState>>,
    Path((owner, survey_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match db::get_events_for_survey(&state.pool, &owner, &survey_id).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(serde_json::json!(SurveyEventsResponse {
                    owner,
                    survey_id,
                    count,
                    events,
                })),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!(ErrorResponse {
                error: e.to_string()
            })),
        )
            .into_response(),
    }
}

/// `GET /events`
///
/// Returns all indexed events across all surveys.
async fn get_all_events(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match db::get_all_events(&state.pool).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(serde_json::json!(AllEventsResponse { count, events })),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!(ErrorResponse {
                error: e.to_string()
            })),
        )
            .into_response(),
    }
}
