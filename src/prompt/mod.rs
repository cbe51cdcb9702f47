// src/prompt/mod.rs
//! Composes the instruction text sent to the model.
//!
//! The template ships inside the binary and is compiled once; building a
//! prompt is pure templating over the topic, the slide range and the
//! format instructions.

use crate::constants::{BULLET_MARKER, MAX_BULLET_WORDS};
use crate::error::AppError;
use crate::model::SlideBounds;
use crate::types::Topic;
use handlebars::Handlebars;
use serde_json::json;

const TEMPLATE_NAME: &str = "slides_prompt";
const TEMPLATE_SOURCE: &str = include_str!("../../templates/slides_prompt.hbs");

/// A compiled prompt template.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    handlebars: Handlebars<'static>,
}

impl PromptBuilder {
    /// Compiles the embedded template.
    pub fn new() -> Result<Self, AppError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string(TEMPLATE_NAME, TEMPLATE_SOURCE)
            .map_err(|e| AppError::TemplateRenderError {
                name: TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { handlebars })
    }

    /// Renders the prompt for one topic.
    ///
    /// `format_instructions` is embedded verbatim.
    pub fn build(
        &self,
        topic: &Topic,
        bounds: SlideBounds,
        format_instructions: &str,
    ) -> Result<String, AppError> {
        let data = json!({
            "topic": topic.as_str(),
            "min_slides": bounds.min(),
            "max_slides": bounds.max(),
            "marker": BULLET_MARKER.to_string(),
            "max_bullet_words": MAX_BULLET_WORDS,
            "format_instructions": format_instructions,
        });

        let prompt = self
            .handlebars
            .render(TEMPLATE_NAME, &data)
            .map_err(|e| AppError::TemplateRenderError {
                name: TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;

        log::debug!("Prompt composed: {} bytes for '{}'", prompt.len(), topic);
        Ok(prompt)
    }
}

/// One-shot helper that compiles the template and renders a single prompt.
pub fn build_prompt(
    topic: &Topic,
    bounds: SlideBounds,
    format_instructions: &str,
) -> Result<String, AppError> {
    PromptBuilder::new()?.build(topic, bounds, format_instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(topic: &str) -> String {
        build_prompt(
            &Topic::new(topic).unwrap(),
            SlideBounds::new(7, 10).unwrap(),
            "FORMAT <json> & \"schema\"",
        )
        .unwrap()
    }

    #[test]
    fn prompt_embeds_topic_and_range() {
        let prompt = render("Quantum computing");
        assert!(prompt.contains("TOPIC: \"Quantum computing\""));
        assert!(prompt.contains("Generate between 7 and 10 slides"));
    }

    #[test]
    fn prompt_states_bullet_rules() {
        let prompt = render("Rust");
        assert!(prompt.contains("Start each bullet with the • symbol"));
        assert!(prompt.contains("15 words maximum"));
        assert!(prompt.contains("Do NOT include the title text as the first bullet"));
        assert!(prompt.contains("NO markdown formatting"));
    }

    #[test]
    fn format_instructions_are_not_escaped() {
        let prompt = render("Rust");
        assert!(prompt.contains("FORMAT <json> & \"schema\""));
    }

    #[test]
    fn topic_text_is_not_escaped() {
        let prompt = render("Tom & Jerry's \"history\"");
        assert!(prompt.contains("Tom & Jerry's \"history\""));
    }
}
