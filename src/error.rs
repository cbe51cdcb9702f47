// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each variant says what went wrong and where, and carries enough for the
//! service boundary to classify it into an HTTP status.

use std::fmt;
use thiserror::Error;

/// Where an LLM generation attempt broke down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationStage {
    /// The request never produced a usable HTTP response.
    Transport,
    /// The provider answered with a non-success status.
    Provider { status: u16 },
    /// The provider answered but returned no candidate text.
    EmptyResponse,
    /// The candidate text was not JSON.
    NotJson,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Provider { status } => write!(f, "provider status {}", status),
            Self::EmptyResponse => write!(f, "empty response"),
            Self::NotJson => write!(f, "unparseable output"),
        }
    }
}

/// The parsed model output matched none of the recognized deck shapes.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Cannot parse slides data structure: {reason}")]
pub struct ShapeError {
    pub reason: String,
    /// The offending payload, kept for diagnostics.
    pub payload: serde_json::Value,
}

/// A single slide entry could not be used. Recovered by dropping the entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlideFieldError {
    #[error("slide {index} is not an object")]
    NotAnObject { index: usize },

    #[error("slide {index} is missing its '{field}' field")]
    MissingField { index: usize, field: &'static str },

    #[error("slide {index} has a non-string '{field}' field")]
    NotAString { index: usize, field: &'static str },
}

impl SlideFieldError {
    /// Position of the offending entry in the model's slide list.
    pub fn index(&self) -> usize {
        match self {
            Self::NotAnObject { index }
            | Self::MissingField { index, .. }
            | Self::NotAString { index, .. } => *index,
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Server configuration error: {0}")]
    MissingConfiguration(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    MissingCredential(String),

    #[error("Failed to generate slides ({stage}): {message}")]
    Generation {
        stage: GenerationStage,
        message: String,
    },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Presentation API request failed ({status}): {message}")]
    Render {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Builds a generation failure for the given stage.
    pub fn generation(stage: GenerationStage, message: impl Into<String>) -> Self {
        Self::Generation {
            stage,
            message: message.into(),
        }
    }

    /// HTTP status the service boundary reports for this error.
    ///
    /// Bad input is 400. A missing credential, or one the Slides API
    /// rejects, is 401. Everything else is 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::MissingCredential(_) => 401,
            Self::Render { status, .. } if *status == reqwest::StatusCode::UNAUTHORIZED => 401,
            Self::ValidationError(err) if err.is_credential() => 401,
            Self::ValidationError(err) if err.is_configuration() => 500,
            Self::ValidationError(_) => 400,
            _ => 500,
        }
    }

    /// Whether the failure happened before any expensive call was made.
    pub fn is_rejected_input(&self) -> bool {
        matches!(self.status_code(), 400 | 401)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError {
            message: format!("JSON error: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

/// Shortens a response body for inclusion in an error message.
pub(crate) fn preview_body(body: &str) -> String {
    let limit = crate::constants::ERROR_BODY_PREVIEW_LENGTH;
    if body.chars().count() > limit {
        let head: String = body.chars().take(limit).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
