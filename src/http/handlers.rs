use super::state::AppState;
use crate::error::Error;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

/// Success envelope wrapping every 200 response
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

/// POST /sessions/:session_id/complete
/// Run the completion pipeline for a session and return its assessment
pub async fn complete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    if Uuid::parse_str(&session_id).is_err() {
        return Error::InvalidArgument(format!("session id must be a UUID: {session_id}"))
            .into_response();
    }

    info!(%session_id, "completing session");

    match state.completion.complete_session(&session_id).await {
        Ok(result) => (StatusCode::OK, Json(SuccessResponse { data: result })).into_response(),
        Err(e) => {
            error!(%session_id, error = %e, "session completion failed");
            e.into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
