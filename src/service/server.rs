// src/service/server.rs
//! Minimal HTTP front end over `tiny_http`.
//!
//! Routing and reply construction are plain functions so they can be tested
//! without a socket. The accept loop runs on a blocking thread and hands each
//! request to the tokio runtime.

use super::{ErrorBody, PresentationService, SlideRequest};
use crate::constants::MAX_REQUEST_BODY_BYTES;
use crate::error::AppError;
use crate::types::ValidatedUrl;
use serde::Serialize;
use std::io::Read;
use std::sync::Arc;
use tiny_http::{Header, Method, Request, Response, Server};

const WELCOME_MESSAGE: &str = "Welcome to the topic2slides API";

/// What a request is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Welcome,
    GeneratePresentation,
    Preflight,
    NotFound,
    MethodNotAllowed,
}

impl Route {
    pub fn resolve(method: &Method, url: &str) -> Self {
        let path = url.split('?').next().unwrap_or(url);
        match (method, path) {
            (Method::Options, _) => Route::Preflight,
            (Method::Get, "/") => Route::Welcome,
            (Method::Post, "/generate-presentation") => Route::GeneratePresentation,
            (_, "/") | (_, "/generate-presentation") => Route::MethodNotAllowed,
            _ => Route::NotFound,
        }
    }
}

/// Status and JSON body to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_string(value)
            .unwrap_or_else(|e| format!(r#"{{"detail":"Failed to encode response: {}"}}"#, e));
        Self { status, body }
    }

    fn detail(status: u16, detail: impl Into<String>) -> Self {
        Self::json(
            status,
            &ErrorBody {
                detail: detail.into(),
            },
        )
    }

    fn from_error(err: &AppError) -> Self {
        Self::json(err.status_code(), &ErrorBody::from_error(err))
    }
}

/// Produces the reply for a routed request body.
pub async fn dispatch(service: &PresentationService, route: Route, body: &[u8]) -> Reply {
    match route {
        Route::Welcome => Reply::json(200, &serde_json::json!({ "message": WELCOME_MESSAGE })),
        Route::Preflight => Reply {
            status: 204,
            body: String::new(),
        },
        Route::NotFound => Reply::detail(404, "Not Found"),
        Route::MethodNotAllowed => Reply::detail(405, "Method Not Allowed"),
        Route::GeneratePresentation => {
            let request: SlideRequest = match serde_json::from_slice(body) {
                Ok(request) => request,
                Err(e) => return Reply::detail(400, format!("Invalid request body: {}", e)),
            };
            match service.handle(request).await {
                Ok(response) => Reply::json(200, &response),
                Err(err) => {
                    log::error!("Error generating presentation: {}", err);
                    Reply::from_error(&err)
                }
            }
        }
    }
}

/// Binds the listener. Port `0` picks a free port.
pub fn bind(addr: &str) -> Result<Server, AppError> {
    Server::http(addr).map_err(|e| AppError::InternalError {
        message: format!("Failed to bind {}: {}", addr, e),
        source: None,
    })
}

/// Binds `addr` and serves requests until the listener fails.
pub async fn serve(
    service: PresentationService,
    addr: &str,
    allowed_origin: &ValidatedUrl,
) -> Result<(), AppError> {
    let server = bind(addr)?;
    log::info!("Listening on http://{}", addr);
    println!("Serving on http://{}", addr);
    run(server, service, allowed_origin).await
}

/// Accepts requests on a bound listener until it fails.
///
/// Socket reads and writes run on blocking threads; only `dispatch` runs on
/// the async workers, so a stalled client never holds one.
pub async fn run(
    server: Server,
    service: PresentationService,
    allowed_origin: &ValidatedUrl,
) -> Result<(), AppError> {
    let service = Arc::new(service);
    let cors = Arc::new(cors_headers(&allowed_origin.origin())?);
    let runtime = tokio::runtime::Handle::current();

    tokio::task::spawn_blocking(move || {
        for request in server.incoming_requests() {
            let service = Arc::clone(&service);
            let cors = Arc::clone(&cors);
            runtime.spawn(async move {
                handle_request(&service, request, cors).await;
            });
        }
    })
    .await
    .map_err(|e| AppError::InternalError {
        message: format!("Server loop stopped: {}", e),
        source: Some(Box::new(e)),
    })
}

async fn handle_request(service: &PresentationService, request: Request, cors: Arc<Vec<Header>>) {
    let request_id = uuid::Uuid::new_v4().simple().to_string();
    let id = request_id[..8].to_string();
    let route = Route::resolve(request.method(), request.url());
    log::info!("[{}] {} {} -> {:?}", id, request.method(), request.url(), route);

    let read = tokio::task::spawn_blocking(move || {
        let mut request = request;
        let body = read_body(&mut request);
        (request, body)
    })
    .await;
    let (request, body) = match read {
        Ok(read) => read,
        Err(e) => {
            log::error!("[{}] Body reader stopped: {}", id, e);
            return;
        }
    };

    let reply = match body {
        Ok(body) => dispatch(service, route, &body).await,
        Err(reply) => reply,
    };
    log::info!("[{}] {}", id, reply.status);

    let sent = tokio::task::spawn_blocking(move || {
        let mut response = Response::from_string(reply.body).with_status_code(reply.status);
        for header in cors.iter() {
            response = response.with_header(header.clone());
        }
        request.respond(response)
    })
    .await;
    match sent {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::warn!("[{}] Failed to send response: {}", id, e),
        Err(e) => log::error!("[{}] Response writer stopped: {}", id, e),
    }
}

/// Reads the body, refusing anything over the size cap.
fn read_body(request: &mut Request) -> Result<Vec<u8>, Reply> {
    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_REQUEST_BODY_BYTES as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| Reply::detail(400, format!("Failed to read request body: {}", e)))?;

    if body.len() > MAX_REQUEST_BODY_BYTES {
        return Err(Reply::detail(413, "Request body too large"));
    }
    Ok(body)
}

fn cors_headers(origin: &str) -> Result<Vec<Header>, AppError> {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", origin),
        ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
        ("Access-Control-Allow-Credentials", "true"),
    ]
    .into_iter()
    .map(|(name, value)| {
        Header::from_bytes(name.as_bytes(), value.as_bytes()).map_err(|()| {
            AppError::MissingConfiguration(format!("Invalid header value for {}: {}", name, value))
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve_by_method_and_path() {
        assert_eq!(Route::resolve(&Method::Get, "/"), Route::Welcome);
        assert_eq!(
            Route::resolve(&Method::Post, "/generate-presentation"),
            Route::GeneratePresentation
        );
        assert_eq!(
            Route::resolve(&Method::Post, "/generate-presentation?x=1"),
            Route::GeneratePresentation
        );
        assert_eq!(
            Route::resolve(&Method::Options, "/generate-presentation"),
            Route::Preflight
        );
        assert_eq!(
            Route::resolve(&Method::Get, "/generate-presentation"),
            Route::MethodNotAllowed
        );
        assert_eq!(Route::resolve(&Method::Get, "/docs"), Route::NotFound);
    }

    #[test]
    fn cors_headers_name_the_origin() {
        let headers = cors_headers("http://localhost:3000").unwrap();
        let origin = headers
            .iter()
            .find(|h| h.field.equiv("Access-Control-Allow-Origin"))
            .unwrap();
        assert_eq!(origin.value.as_str(), "http://localhost:3000");
    }
}
