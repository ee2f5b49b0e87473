//! Relational store collaborator
//!
//! The pipeline consumes exactly two read operations from the relational
//! store; everything else the wider application persists is out of scope
//! here. The [`AnswerStore`] trait keeps the orchestrator testable without a
//! database.

mod postgres;

pub use postgres::PostgresStore;

use crate::error::Error;
use async_trait::async_trait;

/// One recorded answer row, immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub id: i32,
    pub question_id: i32,
    pub session_id: String,
    /// Key of the audio object in the answers bucket
    pub object_key: String,
}

#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// All answers recorded for a session, in the order they were given.
    async fn answers_by_session(&self, session_id: &str) -> Result<Vec<AnswerRecord>, Error>;

    /// The text of a single question.
    async fn question_text(&self, question_id: i32) -> Result<String, Error>;
}
