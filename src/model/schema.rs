// src/model/schema.rs
//! JSON schema of a deck, rendered as format instructions for the model.

use super::deck::SlideBounds;
use serde_json::{json, Value};

/// JSON schema describing the `Deck` shape the model must return.
pub fn deck_json_schema(bounds: SlideBounds) -> Value {
    json!({
        "title": "Presentation",
        "description": "Complete presentation structure",
        "type": "object",
        "properties": {
            "presentation_title": {
                "title": "Presentation Title",
                "description": "Overall presentation title - clear and descriptive",
                "type": "string"
            },
            "slides": {
                "title": "Slides",
                "description": "Ordered slides: one title slide, content slides, and one conclusion slide at the end.",
                "type": "array",
                "minItems": bounds.min(),
                "maxItems": bounds.max(),
                "items": {
                    "title": "Slide",
                    "type": "object",
                    "properties": {
                        "title": {
                            "title": "Title",
                            "description": "Slide title - short, impactful heading (max 8 words)",
                            "type": "string"
                        },
                        "content": {
                            "title": "Content",
                            "description": "3-4 simple bullet points separated by \\n. Each bullet MUST start with the • symbol. Each bullet is ONE sentence. No sub-bullets, dashes, or nested content. Do NOT repeat the title.",
                            "type": "string"
                        }
                    },
                    "required": ["title", "content"]
                }
            }
        },
        "required": ["presentation_title", "slides"]
    })
}

/// Instructions telling the model to answer with an instance of the schema.
pub fn format_instructions(bounds: SlideBounds) -> String {
    let schema = serde_json::to_string(&deck_json_schema(bounds))
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\n\
         As an example, for the schema {{\"properties\": {{\"foo\": {{\"title\": \"Foo\", \"description\": \"a list of strings\", \"type\": \"array\", \"items\": {{\"type\": \"string\"}}}}}}, \"required\": [\"foo\"]}}\n\
         the object {{\"foo\": [\"bar\", \"baz\"]}} is a well-formatted instance of the schema. \
         The object {{\"properties\": {{\"foo\": [\"bar\", \"baz\"]}}}} is not well-formatted.\n\n\
         Here is the output schema:\n```\n{}\n```",
        schema
    )
}
