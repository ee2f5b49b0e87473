use crate::session::SessionCompletion;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The session completion pipeline, ready to run
    pub completion: Arc<SessionCompletion>,
}

impl AppState {
    pub fn new(completion: Arc<SessionCompletion>) -> Self {
        Self { completion }
    }
}
