//! Error taxonomy for the session completion pipeline
//!
//! Every component returns a variant of [`Error`]; the orchestrator wraps the
//! triggering error with its stage name and the HTTP layer maps the result to
//! a status code and a stable numeric error code. Nothing is recovered
//! locally: a failure at any stage yields no assessment.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

// Numeric error codes grouped by failure class, part of the response contract.
const CODE_OBJECT_STORAGE: u16 = 10;
const CODE_DATABASE: u16 = 11;
const CODE_BAD_REQUEST: u16 = 20;
const CODE_NOT_FOUND: u16 = 30;
const CODE_EXTERNAL_SERVICE: u16 = 40;
const CODE_DECODING: u16 = 41;
const CODE_TIMEOUT: u16 = 42;

#[derive(Debug, Error)]
pub enum Error {
    /// The requested resource does not exist (e.g. a session with no answers)
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller supplied a malformed argument (e.g. a non-UUID session id)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Relational store failure (pool exhaustion, query error)
    #[error("database: {0}")]
    Database(String),

    /// The object store could not produce a presigned URL
    #[error("object storage: {0}")]
    ObjectStorage(String),

    /// Transport failure or non-success status from an upstream service
    #[error("{service}: {detail}")]
    ExternalService {
        service: &'static str,
        detail: String,
    },

    /// Upstream response body was malformed or violated the expected schema
    #[error("decoding {context}: {detail}")]
    Decoding {
        context: &'static str,
        detail: String,
    },

    /// An outbound request exceeded its deadline
    #[error("{service}: request timed out")]
    Timeout { service: &'static str },

    /// A pipeline error attributed to the stage that raised it
    #[error("{stage}: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// A transcription error attributed to the answer that raised it
    #[error("answer to question {question_id}: {source}")]
    Answer {
        question_id: i32,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Tag this error with the pipeline stage it surfaced from.
    pub fn at_stage(self, stage: &'static str) -> Self {
        Error::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Tag this error with the answer (by question id) it belongs to.
    pub fn for_question(self, question_id: i32) -> Self {
        Error::Answer {
            question_id,
            source: Box::new(self),
        }
    }

    /// Map a reqwest transport error onto the taxonomy.
    pub fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout { service }
        } else {
            Error::ExternalService {
                service,
                detail: err.to_string(),
            }
        }
    }

    /// The innermost error, unwrapping stage and answer attribution.
    fn root(&self) -> &Error {
        match self {
            Error::Stage { source, .. } | Error::Answer { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.root() {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Error::Database(_) | Error::ObjectStorage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ExternalService { .. } | Error::Decoding { .. } => StatusCode::BAD_GATEWAY,
            Error::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Error::Stage { .. } | Error::Answer { .. } => unreachable!("root() strips wrappers"),
        }
    }

    pub fn error_code(&self) -> u16 {
        match self.root() {
            Error::NotFound(_) => CODE_NOT_FOUND,
            Error::InvalidArgument(_) => CODE_BAD_REQUEST,
            Error::Database(_) => CODE_DATABASE,
            Error::ObjectStorage(_) => CODE_OBJECT_STORAGE,
            Error::ExternalService { .. } => CODE_EXTERNAL_SERVICE,
            Error::Decoding { .. } => CODE_DECODING,
            Error::Timeout { .. } => CODE_TIMEOUT,
            Error::Stage { .. } | Error::Answer { .. } => unreachable!("root() strips wrappers"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error_code: u16,
    pub msg: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                error_code: self.error_code(),
                msg: self.to_string(),
            },
        };

        (self.status_code(), Json(body)).into_response()
    }
}
