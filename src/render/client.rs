// src/render/client.rs
//! Google Slides client: creates a presentation and fills it in one batch.

use super::requests::{build_batch_requests, SlidesRequest};
use super::{presentation_url, RenderedPresentation};
use crate::error::{preview_body, AppError};
use crate::model::Deck;
use crate::pipeline::DeckRenderer;
use crate::types::AccessToken;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

/// Renders decks into new Google Slides presentations.
#[derive(Clone)]
pub struct GoogleSlidesRenderer {
    client: Client,
    base_url: String,
}

impl GoogleSlidesRenderer {
    pub fn with_base_url(base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn presentations_endpoint(&self) -> String {
        format!("{}/presentations", self.base_url)
    }

    fn batch_update_endpoint(&self, presentation_id: &str) -> String {
        format!("{}/presentations/{}:batchUpdate", self.base_url, presentation_id)
    }

    async fn create_presentation(
        &self,
        title: &str,
        token: &AccessToken,
    ) -> Result<CreatedPresentation, AppError> {
        let url = self.presentations_endpoint();
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&CreatePresentationBody { title })
            .send()
            .await?;

        let text = check_status(response, "create presentation").await?;
        serde_json::from_str(&text).map_err(|e| AppError::Render {
            status: reqwest::StatusCode::BAD_GATEWAY,
            message: format!("unexpected create response ({}): {}", e, preview_body(&text)),
        })
    }

    async fn batch_update(
        &self,
        presentation_id: &str,
        requests: &[SlidesRequest],
        token: &AccessToken,
    ) -> Result<(), AppError> {
        let url = self.batch_update_endpoint(presentation_id);
        log::debug!("POST {} ({} requests)", url, requests.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&BatchUpdateBody { requests })
            .send()
            .await?;

        check_status(response, "batch update").await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl DeckRenderer for GoogleSlidesRenderer {
    async fn render(
        &self,
        deck: &Deck,
        access_token: &AccessToken,
    ) -> Result<RenderedPresentation, AppError> {
        let created = self
            .create_presentation(&deck.presentation_title, access_token)
            .await?;
        log::info!("Created presentation {}", created.presentation_id);

        let placeholder = created
            .slides
            .first()
            .map(|slide| slide.object_id.as_str());
        let requests = build_batch_requests(deck, placeholder);

        if !requests.is_empty() {
            self.batch_update(&created.presentation_id, &requests, access_token)
                .await?;
        }

        Ok(RenderedPresentation {
            url: presentation_url(&created.presentation_id),
            presentation_id: created.presentation_id,
            presentation_title: deck.presentation_title.clone(),
            total_slides: deck.len(),
        })
    }
}

/// Returns the body of a success response, or a render error with a preview.
async fn check_status(response: Response, operation: &str) -> Result<String, AppError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        log::error!("Slides {} failed with HTTP {}", operation, status);
        return Err(AppError::Render {
            status,
            message: format!("{} failed: {}", operation, preview_body(&text)),
        });
    }

    Ok(text)
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct CreatePresentationBody<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct BatchUpdateBody<'a> {
    requests: &'a [SlidesRequest],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedPresentation {
    presentation_id: String,
    #[serde(default)]
    slides: Vec<PageRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRef {
    object_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_presentation_exposes_default_slide() {
        let created: CreatedPresentation = serde_json::from_str(
            r#"{"presentationId": "abc", "title": "T", "slides": [{"objectId": "p", "pageElements": []}]}"#,
        )
        .unwrap();
        assert_eq!(created.presentation_id, "abc");
        assert_eq!(created.slides[0].object_id, "p");
    }

    #[test]
    fn created_presentation_without_slides() {
        let created: CreatedPresentation =
            serde_json::from_str(r#"{"presentationId": "abc"}"#).unwrap();
        assert!(created.slides.is_empty());
    }

    #[test]
    fn endpoints_follow_api_layout() {
        let renderer = GoogleSlidesRenderer::with_base_url("http://localhost:9001/v1/").unwrap();
        assert_eq!(
            renderer.presentations_endpoint(),
            "http://localhost:9001/v1/presentations"
        );
        assert_eq!(
            renderer.batch_update_endpoint("abc"),
            "http://localhost:9001/v1/presentations/abc:batchUpdate"
        );
    }
}
