pub mod analysis;
pub mod assessment;
pub mod config;
pub mod error;
pub mod http;
pub mod media;
pub mod session;
pub mod store;
pub mod transcription;

pub use analysis::{Analyzer, GeminiClient};
pub use assessment::{
    build_analysis_prompt, extract_assessment, AnsweredQuestion, AssessmentResult, GrammarIssue,
    RephraseSuggestion, TopWord,
};
pub use config::Config;
pub use error::Error;
pub use http::{create_router, AppState};
pub use media::{AudioUrlResolver, Bucket, S3MediaStore};
pub use session::SessionCompletion;
pub use store::{AnswerRecord, AnswerStore, PostgresStore};
pub use transcription::{DeepgramClient, Transcriber};
