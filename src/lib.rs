// src/lib.rs
//! topic2slides library: drafts a slide deck for a topic with an LLM and
//! renders it into Google Slides.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ShapeError`, `SlideFieldError`, `ValidationError`
//! - **Configuration**: `AppConfig`, `GenerationSettings`
//! - **Domain model**: `Deck`, `Slide`, `SlideBounds`, `RawGeneration`
//! - **Pipeline**: `PromptBuilder`, `DeckGenerator`, `sanitize`, `validate`
//! - **Collaborators**: `GoogleSlidesRenderer`, `PresentationService`

pub mod config;
pub mod constants;
pub mod error;
pub mod generation;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod sanitize;
pub mod service;
pub mod types;
pub mod validate;

// --- Error Handling ---
pub use crate::error::{AppError, GenerationStage, ShapeError, SlideFieldError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{AppConfig, CommandLineInput, GenerationSettings, RunMode};

// --- Domain Model ---
pub use crate::model::{Deck, RawGeneration, Slide, SlideBounds};

// --- Domain Types ---
pub use crate::types::{AccessToken, ApiKey, Topic, ValidatedUrl, Warning, WarningLevel};

// --- Pipeline ---
pub use crate::generation::{
    generate_deck, parse_model_json, CompletionRequest, DeckGenerator, GeminiClient,
    GeneratedDeck, LanguageModel,
};
pub use crate::pipeline::{DeckRenderer, DeckSource};
pub use crate::prompt::{build_prompt, PromptBuilder};
pub use crate::sanitize::{sanitize, sanitize_value, strip_title_echo, SanitizedDeck};
pub use crate::validate::{validate, ValidatedDeck};

// --- Collaborators ---
pub use crate::render::{build_batch_requests, GoogleSlidesRenderer, RenderedPresentation};
pub use crate::service::{PresentationService, SlideRequest, SlideResponse};
