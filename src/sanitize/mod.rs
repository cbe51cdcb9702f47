// src/sanitize/mod.rs
//! Turns the model's parsed output into a canonical, title-free `Deck`.
//!
//! The shape is resolved first (a bad shape fails the whole deck), then every
//! slide entry is cleaned on its own. Entries without a usable title or
//! content are dropped and reported, never fatal.

pub mod normalize;
mod title;

pub use title::strip_title_echo;

use crate::error::{ShapeError, SlideFieldError};
use crate::model::{Deck, RawGeneration, Slide};
use serde_json::{Map, Value};

/// A sanitized deck plus what was dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedDeck {
    pub deck: Deck,
    /// Envelope the model used, for diagnostics.
    pub shape: &'static str,
    pub skipped: Vec<SlideFieldError>,
}

/// Classifies and sanitizes a parsed model response.
pub fn sanitize_value(value: Value) -> Result<SanitizedDeck, ShapeError> {
    sanitize(RawGeneration::classify(value))
}

/// Sanitizes an already classified response, preserving slide order.
pub fn sanitize(raw: RawGeneration) -> Result<SanitizedDeck, ShapeError> {
    let shape = raw.shape_name();
    let (presentation_title, entries) = raw.into_parts()?;

    log::debug!(
        "Sanitizing {} slide entries from a {} response",
        entries.len(),
        shape
    );

    let mut slides = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        match sanitize_slide(index, entry) {
            Ok(slide) => slides.push(slide),
            Err(err) => {
                log::warn!("Skipping invalid slide: {}", err);
                skipped.push(err);
            }
        }
    }

    Ok(SanitizedDeck {
        deck: Deck::new(presentation_title, slides),
        shape,
        skipped,
    })
}

/// Cleans a single slide entry.
pub fn sanitize_slide(index: usize, entry: &Value) -> Result<Slide, SlideFieldError> {
    let object = entry
        .as_object()
        .ok_or(SlideFieldError::NotAnObject { index })?;

    let title = string_field(object, index, "title")?;
    let content = string_field(object, index, "content")?;
    let cleaned = strip_title_echo(title, content);

    if cleaned.len() * 5 < content.len() * 4 {
        log::debug!(
            "Cleaned slide '{}': {} -> {} chars",
            title.trim(),
            content.len(),
            cleaned.len()
        );
    }

    Ok(Slide::new(title.trim(), cleaned))
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, SlideFieldError> {
    match object.get(field) {
        None => Err(SlideFieldError::MissingField { index, field }),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(_) => Err(SlideFieldError::NotAString { index, field }),
    }
}
