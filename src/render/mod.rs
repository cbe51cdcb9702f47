// src/render/mod.rs
//! Rendering collaborator: turns a sanitized deck into a Google Slides
//! presentation.
//!
//! Request construction is pure and lives in `requests`; `client` owns the
//! HTTP calls.

mod client;
pub mod requests;

pub use client::GoogleSlidesRenderer;
pub use requests::{build_batch_requests, SlidesRequest};

use crate::constants::PRESENTATION_URL_PREFIX;
use serde::{Deserialize, Serialize};

/// A presentation created from a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPresentation {
    pub presentation_id: String,
    pub url: String,
    pub presentation_title: String,
    pub total_slides: usize,
}

/// Editor URL for a presentation id.
pub fn presentation_url(presentation_id: &str) -> String {
    format!("{}{}/edit", PRESENTATION_URL_PREFIX, presentation_id)
}
