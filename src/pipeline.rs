// src/pipeline.rs
//! Pipeline capability traits for the two stages of topic-to-slides.
//!
//! Each trait describes a single capability, enabling testing each stage in isolation.

use crate::error::AppError;
use crate::generation::GeneratedDeck;
use crate::model::Deck;
use crate::render::RenderedPresentation;
use crate::types::{AccessToken, Topic};

/// Drafts a sanitized deck for a topic.
#[async_trait::async_trait]
pub trait DeckSource: Send + Sync {
    async fn draft(&self, topic: &Topic) -> Result<GeneratedDeck, AppError>;
}

/// Materializes a deck in a remote presentation on the caller's behalf.
#[async_trait::async_trait]
pub trait DeckRenderer: Send + Sync {
    async fn render(
        &self,
        deck: &Deck,
        access_token: &AccessToken,
    ) -> Result<RenderedPresentation, AppError>;
}
