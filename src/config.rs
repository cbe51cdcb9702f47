// src/config.rs
use crate::constants::{
    DEFAULT_ALLOWED_ORIGIN, DEFAULT_BIND_ADDRESS, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MAX_SLIDES,
    DEFAULT_MIN_SLIDES, DEFAULT_MODEL_NAME, DEFAULT_TEMPERATURE, GEMINI_API_BASE_URL,
    SLIDES_API_BASE_URL,
};
use crate::error::AppError;
use crate::model::SlideBounds;
use crate::types::{AccessToken, ApiKey, Topic, ValidatedUrl, ValidationError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Largest output budget Gemini accepts for a single call.
const MAX_OUTPUT_TOKENS_CEILING: u32 = 65_536;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Gemini model used to draft the deck
    #[arg(long, global = true, default_value = DEFAULT_MODEL_NAME)]
    pub model: String,

    /// Sampling temperature, 0 = focused, 1 = creative
    #[arg(long, global = true, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Maximum number of tokens the model may generate
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
    pub max_tokens: u32,

    /// Fewest slides to ask for
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_SLIDES)]
    pub min_slides: usize,

    /// Most slides to ask for
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_SLIDES)]
    pub max_slides: usize,

    /// Log the model's raw JSON output before sanitization
    #[arg(long, global = true, default_value_t = false)]
    pub trace_raw: bool,

    /// Override the Gemini API base URL
    #[arg(long, global = true, default_value = GEMINI_API_BASE_URL)]
    pub gemini_base_url: String,

    /// Override the Google Slides API base URL
    #[arg(long, global = true, default_value = SLIDES_API_BASE_URL)]
    pub slides_base_url: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draft a deck for a topic and print or save it as JSON
    Generate {
        /// What the presentation is about
        topic: String,

        /// Write the deck JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// OAuth access token; when given the deck is also created in Google Slides
        #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,
    },

    /// Serve the presentation endpoint over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
        bind: String,

        /// Origin allowed to call the endpoint from a browser
        #[arg(long, default_value = DEFAULT_ALLOWED_ORIGIN)]
        allow_origin: String,
    },
}

/// Immutable knobs for drafting a deck.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub bounds: SlideBounds,
    pub trace_raw_response: bool,
}

impl GenerationSettings {
    pub fn new(
        model: impl Into<String>,
        temperature: f32,
        max_output_tokens: u32,
        bounds: SlideBounds,
    ) -> Result<Self, ValidationError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(ValidationError::EmptyField("model"));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ValidationError::InvalidTemperature(temperature));
        }
        if max_output_tokens == 0 || max_output_tokens > MAX_OUTPUT_TOKENS_CEILING {
            return Err(ValidationError::OutOfBounds {
                value: max_output_tokens,
                min: 1,
                max: MAX_OUTPUT_TOKENS_CEILING,
            });
        }

        Ok(Self {
            model: model.trim().to_string(),
            temperature,
            max_output_tokens,
            bounds,
            trace_raw_response: false,
        })
    }

    pub fn with_trace(mut self, trace_raw_response: bool) -> Self {
        self.trace_raw_response = trace_raw_response;
        self
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL_NAME.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            bounds: SlideBounds::default(),
            trace_raw_response: false,
        }
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone)]
pub enum RunMode {
    Generate {
        topic: Topic,
        output_file: Option<PathBuf>,
        access_token: Option<AccessToken>,
    },
    Serve {
        bind: String,
        allowed_origin: ValidatedUrl,
    },
}

/// Resolved configuration, built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub generation: GenerationSettings,
    /// Absent keys fail each generation request, not the process.
    pub api_key: Option<ApiKey>,
    pub gemini_base_url: ValidatedUrl,
    pub slides_base_url: ValidatedUrl,
    pub verbose: bool,
    pub mode: RunMode,
}

impl AppConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(ApiKey::new)
            .transpose()?;

        let bounds = SlideBounds::new(cli.min_slides, cli.max_slides)?;
        let generation =
            GenerationSettings::new(cli.model, cli.temperature, cli.max_tokens, bounds)?
                .with_trace(cli.trace_raw);

        let mode = match cli.command {
            Command::Generate {
                topic,
                output,
                access_token,
            } => RunMode::Generate {
                topic: Topic::new(topic)?,
                output_file: output.map(PathBuf::from),
                access_token: access_token
                    .filter(|token| !token.trim().is_empty())
                    .map(AccessToken::new)
                    .transpose()?,
            },
            Command::Serve { bind, allow_origin } => RunMode::Serve {
                bind,
                allowed_origin: ValidatedUrl::parse(&allow_origin)?,
            },
        };

        Ok(AppConfig {
            generation,
            api_key,
            gemini_base_url: ValidatedUrl::parse(&cli.gemini_base_url)?,
            slides_base_url: ValidatedUrl::parse(&cli.slides_base_url)?,
            verbose: cli.verbose,
            mode,
        })
    }

    /// The Gemini key, or a configuration error naming the variable.
    pub fn require_api_key(&self) -> Result<&ApiKey, AppError> {
        self.api_key.as_ref().ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "Gemini API key not found ({} is not set)",
                API_KEY_ENV
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.model, "gemini-2.5-flash");
        assert_eq!(settings.temperature, 0.2);
        assert_eq!(settings.max_output_tokens, 10_000);
        assert_eq!(settings.bounds, SlideBounds::new(7, 10).unwrap());
        assert!(!settings.trace_raw_response);
    }

    #[test]
    fn settings_reject_out_of_range_values() {
        let bounds = SlideBounds::new(7, 10).unwrap();
        assert_eq!(
            GenerationSettings::new("m", 1.5, 100, bounds),
            Err(ValidationError::InvalidTemperature(1.5))
        );
        assert!(GenerationSettings::new("m", 0.5, 0, bounds).is_err());
        assert!(GenerationSettings::new(" ", 0.5, 100, bounds).is_err());
        assert!(GenerationSettings::new("m", 0.0, 100, bounds).is_ok());
    }

    #[test]
    fn cli_parses_generate_with_global_flags() {
        let cli = CommandLineInput::parse_from([
            "topic2slides",
            "generate",
            "Rust async",
            "--min-slides",
            "3",
            "--max-slides",
            "5",
            "--trace-raw",
        ]);
        assert_eq!(cli.min_slides, 3);
        assert_eq!(cli.max_slides, 5);
        assert!(cli.trace_raw);
        assert!(matches!(cli.command, Command::Generate { ref topic, .. } if topic == "Rust async"));
    }

    #[test]
    fn cli_parses_serve_defaults() {
        let cli = CommandLineInput::parse_from(["topic2slides", "serve"]);
        match cli.command {
            Command::Serve { bind, allow_origin } => {
                assert_eq!(bind, "127.0.0.1:8000");
                assert_eq!(allow_origin, "http://localhost:3000");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
