// Orchestrator scenarios with the external collaborators mocked out
//
// The pipeline's ports (store, object store, transcriber, analyzer) are
// traits, so every scenario here runs without a database or network.

use async_trait::async_trait;
use serde_json::json;
use speechcoach::{
    Analyzer, AnswerRecord, AnswerStore, AudioUrlResolver, Bucket, Error, SessionCompletion,
    Transcriber,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SESSION: &str = "11111111-2222-3333-4444-555555555555";

fn answer(id: i32, question_id: i32, key: &str) -> AnswerRecord {
    AnswerRecord {
        id,
        question_id,
        session_id: SESSION.to_string(),
        object_key: key.to_string(),
    }
}

struct FixedStore {
    answers: Vec<AnswerRecord>,
    questions: HashMap<i32, String>,
}

#[async_trait]
impl AnswerStore for FixedStore {
    async fn answers_by_session(&self, _session_id: &str) -> Result<Vec<AnswerRecord>, Error> {
        Ok(self.answers.clone())
    }

    async fn question_text(&self, question_id: i32) -> Result<String, Error> {
        self.questions
            .get(&question_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("question {question_id}")))
    }
}

/// Resolves every key to a fake URL; panics if the pipeline ever asks for a
/// bucket other than the answer-audio one.
struct KeyedResolver;

#[async_trait]
impl AudioUrlResolver for KeyedResolver {
    async fn presigned_url(&self, bucket: Bucket, key: &str) -> Result<String, Error> {
        assert_eq!(bucket, Bucket::AnswerAudio);
        Ok(format!("https://media.test/{key}"))
    }
}

/// Maps resolved URLs to canned transcripts, with optional per-URL latency so
/// tests can force out-of-order completion. Unknown URLs fail like an
/// upstream 500.
struct MappedTranscriber {
    transcripts: HashMap<String, String>,
    delays_ms: HashMap<String, u64>,
    calls: Mutex<Vec<String>>,
}

impl MappedTranscriber {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            transcripts: entries
                .iter()
                .map(|(key, text)| (format!("https://media.test/{key}"), text.to_string()))
                .collect(),
            delays_ms: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_delay(mut self, key: &str, ms: u64) -> Self {
        self.delays_ms.insert(format!("https://media.test/{key}"), ms);
        self
    }
}

#[async_trait]
impl Transcriber for MappedTranscriber {
    async fn transcribe(&self, audio_url: &str) -> Result<String, Error> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.push(audio_url.to_string());
        }

        if let Some(ms) = self.delays_ms.get(audio_url) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }

        self.transcripts
            .get(audio_url)
            .cloned()
            .ok_or_else(|| Error::ExternalService {
                service: "deepgram",
                detail: "unexpected status 500".to_string(),
            })
    }
}

/// Records every prompt it is asked to analyze and replies with a fixed body.
struct CapturingAnalyzer {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl CapturingAnalyzer {
    fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Analyzer for CapturingAnalyzer {
    async fn analyze(&self, prompt: &str) -> Result<String, Error> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

fn valid_reply() -> String {
    json!({
        "overall_level": "B1",
        "top_words": [{"word": "nevertheless", "level": "B2"}],
        "grammar_issues": [],
        "rephrase_suggestions": [],
        "overall_feedback": "Keep practicing irregular verbs."
    })
    .to_string()
}

fn pipeline(
    store: FixedStore,
    transcriber: Arc<MappedTranscriber>,
    analyzer: Arc<CapturingAnalyzer>,
) -> SessionCompletion {
    SessionCompletion::new(Arc::new(store), Arc::new(KeyedResolver), transcriber, analyzer, 4)
}

#[tokio::test]
async fn test_session_without_answers_is_not_found() {
    let store = FixedStore {
        answers: Vec::new(),
        questions: HashMap::new(),
    };
    let transcriber = Arc::new(MappedTranscriber::new(&[]));
    let analyzer = Arc::new(CapturingAnalyzer::new(valid_reply()));
    let completion = pipeline(store, transcriber, analyzer.clone());

    let err = completion.complete_session(SESSION).await.unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert!(
        analyzer.prompts.lock().unwrap().is_empty(),
        "analysis must not run for an unanswered session"
    );
}

#[tokio::test]
async fn test_happy_path_feeds_both_transcripts_to_the_analyzer() {
    let store = FixedStore {
        answers: vec![answer(1, 10, "a1.wav"), answer(2, 11, "a2.wav")],
        questions: HashMap::from([
            (10, "What did you do last weekend?".to_string()),
            (11, "Describe your favorite meal.".to_string()),
        ]),
    };
    let transcriber = Arc::new(MappedTranscriber::new(&[
        ("a1.wav", "I goed to the mountains."),
        ("a2.wav", "My favorite meal is pasta."),
    ]));
    let analyzer = Arc::new(CapturingAnalyzer::new(valid_reply()));
    let completion = pipeline(store, transcriber.clone(), analyzer.clone());

    let result = completion.complete_session(SESSION).await.unwrap();

    assert_eq!(result.overall_level, "B1");
    assert_eq!(result.top_words.len(), 1);

    let prompts = analyzer.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1, "exactly one analysis call");
    assert!(prompts[0].contains("I goed to the mountains."));
    assert!(prompts[0].contains("My favorite meal is pasta."));
    assert!(prompts[0].contains("What did you do last weekend?"));

    assert_eq!(transcriber.calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_answer_order_survives_out_of_order_completion() {
    let store = FixedStore {
        answers: vec![answer(1, 10, "slow.wav"), answer(2, 11, "fast.wav")],
        questions: HashMap::from([
            (10, "First question?".to_string()),
            (11, "Second question?".to_string()),
        ]),
    };
    // The first answer finishes last; the prompt must still list it first.
    let transcriber = Arc::new(
        MappedTranscriber::new(&[("slow.wav", "the slow answer"), ("fast.wav", "the fast answer")])
            .with_delay("slow.wav", 50),
    );
    let analyzer = Arc::new(CapturingAnalyzer::new(valid_reply()));
    let completion = pipeline(store, transcriber, analyzer.clone());

    completion.complete_session(SESSION).await.unwrap();

    let prompts = analyzer.prompts.lock().unwrap();
    let prompt = &prompts[0];
    let slow = prompt.find("the slow answer").unwrap();
    let fast = prompt.find("the fast answer").unwrap();
    assert!(slow < fast, "answers must keep their original order");
}

#[tokio::test]
async fn test_failed_transcription_fails_the_session_with_no_partial_result() {
    let store = FixedStore {
        answers: vec![answer(1, 10, "ok.wav"), answer(2, 11, "broken.wav")],
        questions: HashMap::from([
            (10, "First question?".to_string()),
            (11, "Second question?".to_string()),
        ]),
    };
    // Only the first answer transcribes; the second hits an upstream 500.
    let transcriber = Arc::new(MappedTranscriber::new(&[("ok.wav", "fine")]));
    let analyzer = Arc::new(CapturingAnalyzer::new(valid_reply()));
    let completion = pipeline(store, transcriber, analyzer.clone());

    let err = completion.complete_session(SESSION).await.unwrap_err();

    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
    let msg = err.to_string();
    assert!(msg.contains("transcription"), "stage must be named: {msg}");
    assert!(msg.contains("question 11"), "failed answer must be attributed: {msg}");
    assert!(
        analyzer.prompts.lock().unwrap().is_empty(),
        "no analysis call may happen after a failed transcription"
    );
}

#[tokio::test]
async fn test_unparseable_analysis_reply_is_an_extraction_failure() {
    let store = FixedStore {
        answers: vec![answer(1, 10, "a1.wav")],
        questions: HashMap::from([(10, "First question?".to_string())]),
    };
    let transcriber = Arc::new(MappedTranscriber::new(&[("a1.wav", "fine")]));
    let analyzer = Arc::new(CapturingAnalyzer::new("I'd rather not produce JSON today."));
    let completion = pipeline(store, transcriber, analyzer);

    let err = completion.complete_session(SESSION).await.unwrap_err();

    assert!(err.to_string().starts_with("extraction:"), "got: {err}");
    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
}
