//! HTTP API server
//!
//! This module exposes the completion pipeline over REST:
//! - POST /sessions/:session_id/complete - Run the assessment for a session
//! - GET /health - Health check
//!
//! Success bodies are wrapped in `{"data": ...}`; failures serialize as
//! `{"error": {"error_code", "msg"}}` with the status derived from the error
//! class.

mod handlers;
mod routes;
mod state;

pub use handlers::SuccessResponse;
pub use routes::create_router;
pub use state::AppState;
