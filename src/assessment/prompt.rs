/// One transcribed answer paired with the question it responds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub question: String,
    pub transcript: String,
}

/// Render the ordered transcripts into the analysis prompt.
///
/// Pure and deterministic: the same ordered input always produces the same
/// bytes, so the prompt can be golden-file tested without a live model call.
/// The instructions pin the model to a single JSON object whose field names
/// match [`AssessmentResult`](super::AssessmentResult) exactly, because the
/// extractor parses the reply as that schema.
pub fn build_analysis_prompt(answers: &[AnsweredQuestion]) -> String {
    let mut prompt = String::from(
        "You are an English language examiner. A learner answered the \
         following interview questions out loud; the answers below are \
         verbatim speech-to-text transcripts.\n\n",
    );

    for (i, answer) in answers.iter().enumerate() {
        prompt.push_str(&format!("Question {}: {}\n", i + 1, answer.question));
        prompt.push_str(&format!("Answer {}: {}\n\n", i + 1, answer.transcript));
    }

    prompt.push_str(
        "Assess the learner's spoken English across all answers:\n\
         1. Estimate the overall proficiency level (CEFR scale: A1-C2).\n\
         2. List the most notable vocabulary the learner used, with a CEFR level per word.\n\
         3. List grammar issues: the original sentence, an explanation of the mistake, and a corrected sentence.\n\
         4. Suggest more natural rephrasings of awkward sentences.\n\
         5. Give short overall feedback addressed to the learner.\n\n\
         Reply with a single JSON object and nothing else, exactly in this shape:\n\
         {\n\
         \x20 \"overall_level\": \"B1\",\n\
         \x20 \"top_words\": [{\"word\": \"...\", \"level\": \"...\"}],\n\
         \x20 \"grammar_issues\": [{\"sentence\": \"...\", \"explanation\": \"...\", \"corrected_sentence\": \"...\"}],\n\
         \x20 \"rephrase_suggestions\": [{\"original\": \"...\", \"suggestion\": \"...\"}],\n\
         \x20 \"overall_feedback\": \"...\"\n\
         }\n",
    );

    prompt
}
