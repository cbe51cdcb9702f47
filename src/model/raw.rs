// src/model/raw.rs
//! The model's parsed output before sanitization.
//!
//! Models wrap the deck in different envelopes depending on how they read
//! the format instructions. Each envelope is a variant here; anything else
//! is kept verbatim in `Unrecognized` for diagnostics.

use crate::constants::UNTITLED_PRESENTATION;
use crate::error::ShapeError;
use serde_json::{Map, Value};

/// A recognized (or explicitly unrecognized) top-level response shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawGeneration {
    /// `{ "slides": { "presentation_title": ..., "slides": [...] } }`
    Nested {
        presentation_title: Option<String>,
        slides: Vec<Value>,
    },
    /// `{ "presentation_title": ..., "slides": [...] }`
    Direct {
        presentation_title: String,
        slides: Vec<Value>,
    },
    /// `{ "slides": [...] }` without a usable presentation title.
    BareSlides { slides: Vec<Value> },
    /// Matched none of the above.
    Unrecognized { reason: String, payload: Value },
}

impl RawGeneration {
    /// Classifies a parsed response by inspecting its structure.
    pub fn classify(value: Value) -> Self {
        let mut root = match value {
            Value::Object(root) => root,
            other => return Self::unrecognized("top-level value is not an object", other),
        };

        match root.remove("slides") {
            Some(Value::Object(mut inner)) => match inner.remove("slides") {
                Some(Value::Array(slides)) => Self::Nested {
                    presentation_title: string_field(&inner, "presentation_title"),
                    slides,
                },
                other => {
                    if let Some(slides) = other {
                        inner.insert("slides".to_string(), slides);
                    }
                    root.insert("slides".to_string(), Value::Object(inner));
                    Self::unrecognized(
                        "nested 'slides' object has no 'slides' list",
                        Value::Object(root),
                    )
                }
            },
            Some(Value::Array(slides)) => match string_field(&root, "presentation_title") {
                Some(presentation_title) => Self::Direct {
                    presentation_title,
                    slides,
                },
                None => Self::BareSlides { slides },
            },
            Some(other) => {
                root.insert("slides".to_string(), other);
                Self::unrecognized("'slides' is neither a list nor an object", Value::Object(root))
            }
            None => Self::unrecognized("no 'slides' field", Value::Object(root)),
        }
    }

    /// Short name of the shape, for logging.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Nested { .. } => "nested",
            Self::Direct { .. } => "direct",
            Self::BareSlides { .. } => "bare-slides",
            Self::Unrecognized { .. } => "unrecognized",
        }
    }

    /// Splits into the presentation title and the raw slide entries.
    ///
    /// Missing or blank titles fall back to `Untitled Presentation`.
    pub fn into_parts(self) -> Result<(String, Vec<Value>), ShapeError> {
        let (title, slides) = match self {
            Self::Nested {
                presentation_title,
                slides,
            } => (presentation_title, slides),
            Self::Direct {
                presentation_title,
                slides,
            } => (Some(presentation_title), slides),
            Self::BareSlides { slides } => (None, slides),
            Self::Unrecognized { reason, payload } => {
                return Err(ShapeError { reason, payload });
            }
        };

        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_PRESENTATION.to_string());

        Ok((title, slides))
    }

    fn unrecognized(reason: &str, payload: Value) -> Self {
        Self::Unrecognized {
            reason: reason.to_string(),
            payload,
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_nested_envelope() {
        let raw = RawGeneration::classify(json!({
            "slides": {"presentation_title": "Rust", "slides": [{"title": "a", "content": "b"}]}
        }));
        assert_eq!(raw.shape_name(), "nested");
        let (title, slides) = raw.into_parts().unwrap();
        assert_eq!(title, "Rust");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn classifies_direct_and_bare_lists() {
        let direct = RawGeneration::classify(json!({"presentation_title": "T", "slides": []}));
        assert_eq!(direct.shape_name(), "direct");

        let bare = RawGeneration::classify(json!({"slides": [{"title": "a", "content": "b"}]}));
        assert_eq!(bare.shape_name(), "bare-slides");
        let (title, _) = bare.into_parts().unwrap();
        assert_eq!(title, UNTITLED_PRESENTATION);
    }

    #[test]
    fn unknown_shapes_keep_their_payload() {
        let raw = RawGeneration::classify(json!({"foo": "bar"}));
        let err = raw.into_parts().unwrap_err();
        assert_eq!(err.payload, json!({"foo": "bar"}));

        for value in [
            json!([1, 2]),
            json!({"slides": "nope"}),
            json!({"slides": {"presentation_title": "x"}}),
            json!({"slides": {"slides": "x"}}),
        ] {
            match RawGeneration::classify(value.clone()) {
                RawGeneration::Unrecognized { payload, .. } => assert_eq!(payload, value),
                other => panic!("expected unrecognized shape, got {}", other.shape_name()),
            }
        }
    }

    #[test]
    fn blank_titles_fall_back_to_untitled() {
        let raw = RawGeneration::classify(json!({"presentation_title": "  ", "slides": []}));
        let (title, _) = raw.into_parts().unwrap();
        assert_eq!(title, UNTITLED_PRESENTATION);
    }
}
