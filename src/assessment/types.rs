use serde::{Deserialize, Serialize};

/// The structured linguistic evaluation of one completed session.
///
/// This shape does double duty: it is the JSON schema the analysis model is
/// instructed to produce, and the body serialized back to the HTTP caller.
/// `overall_level` is mandatory; the list fields and the feedback default to
/// empty when the model omits them, so a sparse-but-valid object still parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// CEFR-style proficiency estimate, e.g. "B2"
    pub overall_level: String,

    /// Notable vocabulary the learner used, with a level per word
    #[serde(default)]
    pub top_words: Vec<TopWord>,

    /// Grammar problems found in the transcripts
    #[serde(default)]
    pub grammar_issues: Vec<GrammarIssue>,

    /// Suggested more natural phrasings
    #[serde(default)]
    pub rephrase_suggestions: Vec<RephraseSuggestion>,

    /// Free-text summary addressed to the learner
    #[serde(default)]
    pub overall_feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopWord {
    pub word: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub sentence: String,
    pub explanation: String,
    pub corrected_sentence: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RephraseSuggestion {
    pub original: String,
    pub suggestion: String,
}
