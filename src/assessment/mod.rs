//! Linguistic assessment model
//!
//! This module owns everything that shapes or interprets the assessment
//! itself:
//! - The `AssessmentResult` type returned to callers (and expected, as JSON,
//!   from the analysis model)
//! - Deterministic rendering of transcripts into the analysis prompt
//! - Tolerant extraction of the result object from free-form model output

mod extract;
mod prompt;
mod types;

pub use extract::extract_assessment;
pub use prompt::{build_analysis_prompt, AnsweredQuestion};
pub use types::{AssessmentResult, GrammarIssue, RephraseSuggestion, TopWord};
