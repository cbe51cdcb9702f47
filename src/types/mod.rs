use thiserror::Error;

mod domain_types;

pub use domain_types::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Slide range {min}..={max} is invalid: {reason}")]
    InvalidSlideRange {
        min: usize,
        max: usize,
        reason: String,
    },

    #[error("Temperature {0} is outside 0.0..=1.0")]
    InvalidTemperature(f32),

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u32, min: u32, max: u32 },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid access token: {reason}")]
    InvalidAccessToken { reason: String },
}

impl ValidationError {
    /// Whether the failure concerns the caller's access credential.
    pub fn is_credential(&self) -> bool {
        matches!(
            self,
            Self::EmptyField("access_token") | Self::InvalidAccessToken { .. }
        )
    }

    /// Whether the failure concerns server-side configuration rather than
    /// anything the caller sent.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidApiKey { .. }
                | Self::InvalidSlideRange { .. }
                | Self::InvalidTemperature(_)
                | Self::OutOfBounds { .. }
        )
    }
}
