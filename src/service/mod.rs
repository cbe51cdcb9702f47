// src/service/mod.rs
//! The presentation endpoint: validates a request, drafts a deck, renders it.
//!
//! Input checks run in a fixed order before any model call: topic, then
//! access token, then server configuration.

mod server;

pub use server::{bind, dispatch, run, serve, Reply, Route};

use crate::config::{AppConfig, API_KEY_ENV};
use crate::error::AppError;
use crate::generation::{DeckGenerator, GeminiClient};
use crate::pipeline::{DeckRenderer, DeckSource};
use crate::render::GoogleSlidesRenderer;
use crate::types::{AccessToken, Topic};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `POST /generate-presentation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SlideRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub access_token: String,
}

/// Successful reply of `POST /generate-presentation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideResponse {
    pub success: bool,
    pub presentation_id: String,
    pub url: String,
    pub presentation_title: String,
    pub total_slides: usize,
}

/// Error reply body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    /// Client-facing detail for an error.
    ///
    /// Input and configuration errors keep their own message; anything else
    /// is reported as a failed generation with the cause attached.
    pub fn from_error(err: &AppError) -> Self {
        let detail = match err {
            AppError::MissingConfiguration(_) => err.to_string(),
            _ if err.is_rejected_input() => err.to_string(),
            _ => format!("Failed to generate presentation: {}", err),
        };
        Self { detail }
    }
}

/// Request handler shared by every connection.
pub struct PresentationService {
    source: Option<Arc<dyn DeckSource>>,
    renderer: Arc<dyn DeckRenderer>,
}

impl PresentationService {
    /// `source` is `None` when the server has no model credentials.
    pub fn new(source: Option<Arc<dyn DeckSource>>, renderer: Arc<dyn DeckRenderer>) -> Self {
        Self { source, renderer }
    }

    /// Wires the Gemini drafter and the Slides renderer from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let source: Option<Arc<dyn DeckSource>> = match &config.api_key {
            Some(key) => {
                let client = GeminiClient::with_base_url(key, config.gemini_base_url.as_base())?;
                let generator: Arc<dyn DeckSource> =
                    Arc::new(DeckGenerator::new(client, config.generation.clone())?);
                Some(generator)
            }
            None => {
                log::warn!(
                    "{} is not set; generation requests will fail until it is",
                    API_KEY_ENV
                );
                None
            }
        };
        let renderer = GoogleSlidesRenderer::with_base_url(config.slides_base_url.as_base())?;

        Ok(Self::new(source, Arc::new(renderer)))
    }

    /// Handles one request end to end.
    pub async fn handle(&self, request: SlideRequest) -> Result<SlideResponse, AppError> {
        let topic = Topic::new(request.topic)
            .map_err(|_| AppError::InvalidInput("Topic cannot be empty".to_string()))?;

        if request.access_token.trim().is_empty() {
            return Err(AppError::MissingCredential(
                "Access token is required".to_string(),
            ));
        }
        let access_token = AccessToken::new(request.access_token)?;

        let source = self.source.as_ref().ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "Gemini API key not found ({} is not set)",
                API_KEY_ENV
            ))
        })?;

        log::info!("Generating presentation for topic: {}", topic);
        let generated = source.draft(&topic).await?;
        for warning in &generated.warnings {
            log::debug!("Deck warning: {}", warning);
        }

        let rendered = self.renderer.render(&generated.deck, &access_token).await?;
        log::info!(
            "Presentation ready: {} ({} slides)",
            rendered.url,
            rendered.total_slides
        );

        Ok(SlideResponse {
            success: true,
            presentation_id: rendered.presentation_id,
            url: rendered.url,
            presentation_title: rendered.presentation_title,
            total_slides: rendered.total_slides,
        })
    }
}
