// src/generation/mod.rs
//! Drafts a deck with an LLM: prompt, one model call, parse, sanitize,
//! validate.
//!
//! The orchestrator depends on the `LanguageModel` capability, never on HTTP
//! details, so tests can substitute a scripted model.

pub mod gemini;
pub mod parser;

pub use gemini::GeminiClient;
pub use parser::parse_model_json;

use crate::config::{AppConfig, GenerationSettings};
use crate::error::{AppError, SlideFieldError};
use crate::model::{schema, Deck};
use crate::prompt::PromptBuilder;
use crate::sanitize::sanitize_value;
use crate::types::{Topic, Warning};
use crate::validate::validate;

/// Everything the model needs for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// The ability to turn a prompt into text.
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AppError>;
}

#[async_trait::async_trait]
impl<M: LanguageModel + ?Sized> LanguageModel for std::sync::Arc<M> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AppError> {
        (**self).complete(request).await
    }
}

/// A sanitized, validated deck and the diagnostics gathered on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDeck {
    pub deck: Deck,
    pub warnings: Vec<Warning>,
    pub skipped: Vec<SlideFieldError>,
}

/// Drafts decks with a language model under fixed settings.
pub struct DeckGenerator<M> {
    model: M,
    settings: GenerationSettings,
    prompts: PromptBuilder,
}

impl<M: LanguageModel> DeckGenerator<M> {
    pub fn new(model: M, settings: GenerationSettings) -> Result<Self, AppError> {
        Ok(Self {
            model,
            settings,
            prompts: PromptBuilder::new()?,
        })
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generates a deck for `topic`. Makes exactly one model call.
    pub async fn generate(&self, topic: &Topic) -> Result<GeneratedDeck, AppError> {
        let bounds = self.settings.bounds;

        log::info!("Generating slides for: {}", topic);
        log::info!(
            "Using model: {} (temp={})",
            self.settings.model,
            self.settings.temperature
        );

        let instructions = schema::format_instructions(bounds);
        let prompt = self.prompts.build(topic, bounds, &instructions)?;

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            prompt,
            temperature: self.settings.temperature,
            max_output_tokens: self.settings.max_output_tokens,
        };

        let text = self.model.complete(&request).await.map_err(|e| {
            log::error!("Failed to generate slides: {}", e);
            e
        })?;
        let raw = parse_model_json(&text)?;

        if self.settings.trace_raw_response {
            log::info!(
                "RAW AI OUTPUT:\n{}",
                serde_json::to_string_pretty(&raw).unwrap_or_else(|_| raw.to_string())
            );
        }

        let sanitized = sanitize_value(raw).map_err(|e| {
            log::error!("{}", e);
            AppError::from(e)
        })?;
        log::debug!("Model used the {} response shape", sanitized.shape);

        let validated = validate(sanitized.deck, bounds);

        log::info!(
            "Generated {} slides for '{}'",
            validated.deck.len(),
            validated.deck.presentation_title
        );

        Ok(GeneratedDeck {
            deck: validated.deck,
            warnings: validated.warnings,
            skipped: sanitized.skipped,
        })
    }
}

#[async_trait::async_trait]
impl<M: LanguageModel> crate::pipeline::DeckSource for DeckGenerator<M> {
    async fn draft(&self, topic: &Topic) -> Result<GeneratedDeck, AppError> {
        self.generate(topic).await
    }
}

/// Generates a deck with Gemini under the resolved configuration.
///
/// Fails with `MissingConfiguration` before any call when no API key is set.
pub async fn generate_deck(topic: &Topic, config: &AppConfig) -> Result<GeneratedDeck, AppError> {
    let client = GeminiClient::with_base_url(
        config.require_api_key()?,
        config.gemini_base_url.as_base(),
    )?;
    DeckGenerator::new(client, config.generation.clone())?
        .generate(topic)
        .await
}
