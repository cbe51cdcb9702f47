// src/generation/parser.rs
//! Extracts the JSON value from the model's text answer.
//!
//! Even when asked for bare JSON, models sometimes wrap it in a Markdown
//! code fence or surround it with a sentence of prose.

use crate::error::{preview_body, AppError, GenerationStage};
use serde_json::Value;

/// Parses the model's answer into a JSON value.
pub fn parse_model_json(text: &str) -> Result<Value, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::generation(
            GenerationStage::EmptyResponse,
            "model returned no text",
        ));
    }

    let unfenced = strip_code_fence(trimmed);
    match serde_json::from_str::<Value>(unfenced) {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Some(value) = outermost_object(unfenced)
                .and_then(|slice| serde_json::from_str::<Value>(slice).ok())
            {
                log::debug!("Recovered JSON object from surrounding model text");
                return Ok(value);
            }
            log::error!("Model output is not JSON: {}", err);
            Err(AppError::generation(
                GenerationStage::NotJson,
                format!("{} (output: {})", err, preview_body(trimmed)),
            ))
        }
    }
}

/// Removes a surrounding Markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// The slice from the first `{` to the last `}`.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
