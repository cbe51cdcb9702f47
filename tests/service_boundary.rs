// tests/service_boundary.rs
//! The presentation endpoint with fake drafting and rendering collaborators.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tiny_http::Method;
use topic2slides::service::{bind, dispatch, run, ErrorBody, Route};
use topic2slides::{
    AccessToken, AppError, Deck, DeckRenderer, DeckSource, GeneratedDeck, PresentationService,
    RenderedPresentation, Slide, SlideRequest, SlideResponse, Topic, ValidatedUrl,
};

#[derive(Default)]
struct CountingSource {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl DeckSource for CountingSource {
    async fn draft(&self, topic: &Topic) -> Result<GeneratedDeck, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeneratedDeck {
            deck: Deck::new(
                topic.as_str(),
                vec![
                    Slide::new("One", "• first"),
                    Slide::new("Two", "• second"),
                ],
            ),
            warnings: Vec::new(),
            skipped: Vec::new(),
        })
    }
}

#[derive(Default)]
struct RecordingRenderer {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl DeckRenderer for RecordingRenderer {
    async fn render(
        &self,
        deck: &Deck,
        access_token: &AccessToken,
    ) -> Result<RenderedPresentation, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(access_token.as_str(), "ya29.token");
        Ok(RenderedPresentation {
            presentation_id: "pres-1".to_string(),
            url: "https://docs.google.com/presentation/d/pres-1/edit".to_string(),
            presentation_title: deck.presentation_title.clone(),
            total_slides: deck.len(),
        })
    }
}

struct FailingRenderer;

#[async_trait::async_trait]
impl DeckRenderer for FailingRenderer {
    async fn render(&self, _: &Deck, _: &AccessToken) -> Result<RenderedPresentation, AppError> {
        Err(AppError::Render {
            status: reqwest::StatusCode::FORBIDDEN,
            message: "batch update failed: permission denied".to_string(),
        })
    }
}

/// Slides rejecting an expired or revoked token.
struct UnauthorizedRenderer;

#[async_trait::async_trait]
impl DeckRenderer for UnauthorizedRenderer {
    async fn render(&self, _: &Deck, _: &AccessToken) -> Result<RenderedPresentation, AppError> {
        Err(AppError::Render {
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: "create presentation failed: Request had invalid authentication credentials"
                .to_string(),
        })
    }
}

fn request(topic: &str, token: &str) -> SlideRequest {
    SlideRequest {
        topic: topic.to_string(),
        access_token: token.to_string(),
    }
}

fn fixture() -> (Arc<CountingSource>, Arc<RecordingRenderer>, PresentationService) {
    let source = Arc::new(CountingSource::default());
    let renderer = Arc::new(RecordingRenderer::default());
    let service = PresentationService::new(
        Some(source.clone() as Arc<dyn DeckSource>),
        renderer.clone() as Arc<dyn DeckRenderer>,
    );
    (source, renderer, service)
}

#[tokio::test]
async fn empty_topic_is_rejected_before_any_model_call() {
    let (source, renderer, service) = fixture();

    for topic in ["", "   ", "\n\t"] {
        let err = service.handle(request(topic, "ya29.token")).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Topic cannot be empty");
    }

    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (source, _, service) = fixture();

    let err = service.handle(request("Rust", "")).await.unwrap_err();

    assert_eq!(err.status_code(), 401);
    assert_eq!(err.to_string(), "Access token is required");
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_api_key_is_a_server_error() {
    let renderer = Arc::new(RecordingRenderer::default());
    let service = PresentationService::new(None, renderer.clone() as Arc<dyn DeckRenderer>);

    let err = service.handle(request("Rust", "ya29.token")).await.unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().starts_with("Server configuration error"));
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn topic_is_checked_before_token_and_configuration() {
    let service = PresentationService::new(None, Arc::new(RecordingRenderer::default()));

    let err = service.handle(request("", "")).await.unwrap_err();

    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn successful_request_reports_the_presentation() {
    let (source, renderer, service) = fixture();

    let response = service
        .handle(request("  Rust ownership  ", "ya29.token"))
        .await
        .unwrap();

    assert_eq!(
        response,
        SlideResponse {
            success: true,
            presentation_id: "pres-1".to_string(),
            url: "https://docs.google.com/presentation/d/pres-1/edit".to_string(),
            presentation_title: "Rust ownership".to_string(),
            total_slides: 2,
        }
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn render_failures_surface_as_server_errors() {
    let service = PresentationService::new(
        Some(Arc::new(CountingSource::default()) as Arc<dyn DeckSource>),
        Arc::new(FailingRenderer),
    );

    let reply = dispatch(
        &service,
        Route::GeneratePresentation,
        br#"{"topic": "Rust", "access_token": "ya29.token"}"#,
    )
    .await;

    assert_eq!(reply.status, 500);
    let body: ErrorBody = serde_json::from_str(&reply.body).unwrap();
    assert!(body
        .detail
        .starts_with("Failed to generate presentation: Presentation API request failed"));
}

#[tokio::test]
async fn token_rejected_by_slides_is_unauthorized() {
    let source = Arc::new(CountingSource::default());
    let service = PresentationService::new(
        Some(source.clone() as Arc<dyn DeckSource>),
        Arc::new(UnauthorizedRenderer),
    );

    let reply = dispatch(
        &service,
        Route::GeneratePresentation,
        br#"{"topic": "Rust", "access_token": "ya29.expired"}"#,
    )
    .await;

    assert_eq!(reply.status, 401);
    let body: ErrorBody = serde_json::from_str(&reply.body).unwrap();
    assert!(body
        .detail
        .starts_with("Presentation API request failed (401 Unauthorized)"));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dispatch_encodes_replies_as_json() {
    let (_, _, service) = fixture();

    let ok = dispatch(
        &service,
        Route::GeneratePresentation,
        br#"{"topic": "Rust", "access_token": "ya29.token"}"#,
    )
    .await;
    assert_eq!(ok.status, 200);
    let response: SlideResponse = serde_json::from_str(&ok.body).unwrap();
    assert_eq!(response.total_slides, 2);

    let bad = dispatch(&service, Route::GeneratePresentation, br#"{"topic": "#).await;
    assert_eq!(bad.status, 400);

    let empty = dispatch(&service, Route::GeneratePresentation, br#"{"topic": ""}"#).await;
    assert_eq!(empty.status, 400);
    let body: ErrorBody = serde_json::from_str(&empty.body).unwrap();
    assert_eq!(body.detail, "Topic cannot be empty");
}

#[tokio::test]
async fn auxiliary_routes() {
    let (_, _, service) = fixture();

    let welcome = dispatch(&service, Route::resolve(&Method::Get, "/"), b"").await;
    assert_eq!(welcome.status, 200);
    assert!(welcome.body.contains("Welcome"));

    let preflight = dispatch(
        &service,
        Route::resolve(&Method::Options, "/generate-presentation"),
        b"",
    )
    .await;
    assert_eq!(preflight.status, 204);

    let missing = dispatch(&service, Route::resolve(&Method::Get, "/nope"), b"").await;
    assert_eq!(missing.status, 404);
}

#[test]
fn stalled_upload_does_not_block_other_clients() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let server = bind("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let (_, _, service) = fixture();
    let origin = ValidatedUrl::parse("http://localhost:3000").unwrap();
    runtime.spawn(async move {
        let _ = run(server, service, &origin).await;
    });

    // Announces a large body, sends one byte of it and goes quiet.
    let mut stalled = TcpStream::connect(addr).unwrap();
    stalled
        .write_all(
            b"POST /generate-presentation HTTP/1.1\r\n\
              Host: localhost\r\n\
              Content-Type: application/json\r\n\
              Content-Length: 50000\r\n\r\n{",
        )
        .unwrap();
    std::thread::sleep(Duration::from_millis(200));

    let mut client = TcpStream::connect(addr).unwrap();
    client
        .set_read_timeout(Some(Duration::from_secs(3)))
        .unwrap();
    client
        .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .unwrap();
    let mut response = String::new();
    client.read_to_string(&mut response).unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "got: {}", response);
    assert!(response.contains("Welcome"));

    drop(stalled);
    runtime.shutdown_timeout(Duration::from_millis(100));
}
