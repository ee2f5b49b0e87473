use crate::analysis::Analyzer;
use crate::assessment::{build_analysis_prompt, extract_assessment, AnsweredQuestion, AssessmentResult};
use crate::error::Error;
use crate::media::{AudioUrlResolver, Bucket};
use crate::store::{AnswerRecord, AnswerStore};
use crate::transcription::Transcriber;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{info, warn};

/// Orchestrates the completion of one recording session.
///
/// The run is a one-way chain (collect answers, transcribe each, build the
/// prompt, analyze, extract) and the first failure at any stage aborts the
/// whole thing with the error tagged by stage. No stage is retried here;
/// retry policy belongs in decorators around the [`Transcriber`] and
/// [`Analyzer`] seams.
pub struct SessionCompletion {
    store: Arc<dyn AnswerStore>,
    media: Arc<dyn AudioUrlResolver>,
    transcriber: Arc<dyn Transcriber>,
    analyzer: Arc<dyn Analyzer>,
    max_concurrent_transcriptions: usize,
}

impl SessionCompletion {
    pub fn new(
        store: Arc<dyn AnswerStore>,
        media: Arc<dyn AudioUrlResolver>,
        transcriber: Arc<dyn Transcriber>,
        analyzer: Arc<dyn Analyzer>,
        max_concurrent_transcriptions: usize,
    ) -> Self {
        Self {
            store,
            media,
            transcriber,
            analyzer,
            max_concurrent_transcriptions: max_concurrent_transcriptions.max(1),
        }
    }

    /// Complete a session: transcribe every recorded answer, have the
    /// analysis model assess the transcripts, and return the parsed result.
    ///
    /// A session with no recorded answers cannot be completed and fails with
    /// `NotFound`. A partial result is never returned: if one of the answers
    /// fails to transcribe, or the analysis reply cannot be parsed, the whole
    /// operation fails with the error attributed to its stage.
    pub async fn complete_session(&self, session_id: &str) -> Result<AssessmentResult, Error> {
        let answers = self
            .store
            .answers_by_session(session_id)
            .await
            .map_err(|e| e.at_stage("answers"))?;

        if answers.is_empty() {
            return Err(Error::NotFound(format!(
                "no answers recorded for session {session_id}"
            )));
        }

        info!(session_id, answers = answers.len(), "completing session");

        // Transcriptions are independent network calls; run them through a
        // bounded buffered stream. `buffered` yields results in input order,
        // so the prompt sees answers in the order they were given no matter
        // which transcription finishes first, and the first failure drops the
        // outstanding requests.
        let transcripts: Vec<AnsweredQuestion> =
            stream::iter(answers.into_iter().map(|answer| self.transcribe_answer(answer)))
                .buffered(self.max_concurrent_transcriptions)
                .try_collect()
                .await
                .map_err(|e| e.at_stage("transcription"))?;

        let prompt = build_analysis_prompt(&transcripts);

        let raw_reply = self
            .analyzer
            .analyze(&prompt)
            .await
            .map_err(|e| e.at_stage("analysis"))?;

        let result = extract_assessment(&raw_reply).map_err(|e| e.at_stage("extraction"))?;

        info!(session_id, level = %result.overall_level, "session assessment completed");

        Ok(result)
    }

    /// Resolve, fetch and transcribe a single answer, pairing the transcript
    /// with its question text. Errors carry the question id so a failed
    /// answer is attributable.
    async fn transcribe_answer(&self, answer: AnswerRecord) -> Result<AnsweredQuestion, Error> {
        let question_id = answer.question_id;

        let run = async {
            let question = self.store.question_text(question_id).await?;

            let audio_url = self
                .media
                .presigned_url(Bucket::AnswerAudio, &answer.object_key)
                .await?;

            let transcript = self.transcriber.transcribe(&audio_url).await?;

            Ok(AnsweredQuestion {
                question,
                transcript,
            })
        };

        run.await.map_err(|e: Error| {
            warn!(question_id, error = %e, "answer transcription failed");
            e.for_question(question_id)
        })
    }
}
