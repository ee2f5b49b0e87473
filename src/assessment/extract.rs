use super::types::AssessmentResult;
use crate::error::Error;

/// Parse the analysis model's free-form reply into an [`AssessmentResult`].
///
/// The model is instructed to answer with bare JSON but routinely wraps the
/// object in prose or a ```json code fence, so this is a tolerant parser
/// rather than a strict decoder: every top-level `{...}` candidate in the
/// text is tried against the schema and the first one that conforms wins.
/// Text with no conforming object is a decoding failure, never a default.
pub fn extract_assessment(raw: &str) -> Result<AssessmentResult, Error> {
    for candidate in json_object_candidates(raw) {
        if let Ok(result) = serde_json::from_str::<AssessmentResult>(candidate) {
            return Ok(result);
        }
    }

    Err(Error::Decoding {
        context: "analysis reply",
        detail: "no JSON object matching the assessment schema found".to_string(),
    })
}

/// Locate every top-level balanced `{...}` span in `raw`.
///
/// The scan is string- and escape-aware so braces inside JSON string values
/// do not confuse the depth count. Unterminated objects are dropped.
fn json_object_candidates(raw: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut start = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in raw.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        candidates.push(&raw[s..=i]);
                    }
                }
            }
            _ => {}
        }
    }

    candidates
}
