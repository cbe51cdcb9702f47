// src/model/deck.rs
//! The canonical deck: a presentation title and an ordered list of slides.

use crate::constants::{
    BULLET_DELIMITER, BULLET_MARKER, DEFAULT_MAX_SLIDES, DEFAULT_MIN_SLIDES, SLIDES_HARD_LIMIT,
};
use crate::types::ValidationError;
use serde::{Deserialize, Serialize};

/// One unit of deck content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    /// Bullet lines joined by `\n`, each starting with `•`.
    pub content: String,
}

impl Slide {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Non-empty content lines, trimmed, marker included.
    pub fn bullet_lines(&self) -> impl Iterator<Item = &str> {
        self.content
            .split(BULLET_DELIMITER)
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// Non-empty lines that do not start with the bullet marker.
    pub fn unmarked_lines(&self) -> impl Iterator<Item = &str> {
        self.bullet_lines()
            .filter(|line| !line.starts_with(BULLET_MARKER))
    }
}

/// The sanitized artifact handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub presentation_title: String,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn new(presentation_title: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            presentation_title: presentation_title.into(),
            slides,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Inclusive range of slide counts the model is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideBounds {
    min: usize,
    max: usize,
}

impl SlideBounds {
    pub fn new(min: usize, max: usize) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidSlideRange {
            min,
            max,
            reason: reason.to_string(),
        };

        if min == 0 {
            return Err(invalid("a deck needs at least one slide"));
        }
        if min > max {
            return Err(invalid("minimum exceeds maximum"));
        }
        if max > SLIDES_HARD_LIMIT {
            return Err(invalid(&format!(
                "maximum may not exceed {}",
                SLIDES_HARD_LIMIT
            )));
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl Default for SlideBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SLIDES,
            max: DEFAULT_MAX_SLIDES,
        }
    }
}

impl std::fmt::Display for SlideBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
