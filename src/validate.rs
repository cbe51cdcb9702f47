// src/validate.rs
//! Soft checks on a sanitized deck.
//!
//! Nothing here rejects a deck. The slide range is an expectation placed on
//! the model, so a deck outside it is still returned, annotated with warnings.

use crate::constants::BULLET_MARKER;
use crate::model::{Deck, SlideBounds};
use crate::types::{Warning, WarningLevel};

/// A deck together with the warnings raised while checking it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDeck {
    pub deck: Deck,
    pub warnings: Vec<Warning>,
}

impl ValidatedDeck {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Checks slide count and slide shape, logging every warning raised.
pub fn validate(deck: Deck, bounds: SlideBounds) -> ValidatedDeck {
    let mut warnings = Vec::new();

    let count = deck.len();
    if count == 0 {
        warnings.push(Warning::new(
            WarningLevel::Error,
            "Generated deck contains no slides",
        ));
    } else if !bounds.contains(count) {
        warnings.push(
            Warning::new(
                WarningLevel::Warning,
                format!("Generated {} slides", count),
            )
            .with_context(format!("expected {}", bounds)),
        );
    }

    for (index, slide) in deck.slides.iter().enumerate() {
        let position = format!("slide {}", index + 1);

        if slide.title.trim().is_empty() {
            warnings.push(
                Warning::new(WarningLevel::Warning, "Slide has an empty title")
                    .with_context(position.clone()),
            );
        }

        if slide.content.trim().is_empty() {
            warnings.push(
                Warning::new(WarningLevel::Warning, "Slide has no bullet content")
                    .with_context(position.clone()),
            );
        }

        let unmarked = slide.unmarked_lines().count();
        if unmarked > 0 {
            warnings.push(
                Warning::new(
                    WarningLevel::Info,
                    format!(
                        "{} line(s) do not start with '{}'",
                        unmarked, BULLET_MARKER
                    ),
                )
                .with_context(position),
            );
        }
    }

    for warning in &warnings {
        match warning.level {
            WarningLevel::Info => log::info!("{}", warning),
            WarningLevel::Warning | WarningLevel::Error => log::warn!("{}", warning),
        }
    }

    ValidatedDeck { deck, warnings }
}
