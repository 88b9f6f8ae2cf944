//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tower::ServiceExt;

use todo_sync::api::{AppState, create_router};
use todo_sync::infrastructure::InMemoryTodoRepository;

/// Router over a seeded store, plus a handle on that store.
pub fn seeded_router() -> (Router, Arc<InMemoryTodoRepository>) {
    router_over(InMemoryTodoRepository::with_seed_data())
}

pub fn empty_router() -> (Router, Arc<InMemoryTodoRepository>) {
    router_over(InMemoryTodoRepository::new())
}

fn router_over(repository: InMemoryTodoRepository) -> (Router, Arc<InMemoryTodoRepository>) {
    let repository = Arc::new(repository);
    let router = create_router(AppState::from_arc(Arc::clone(&repository)));
    (router, repository)
}

/// Sends one request through the router and returns status and raw body.
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

/// Like [`send`] but decodes the body as JSON.
pub async fn send_json<T: DeserializeOwned>(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, T) {
    let (status, bytes) = send(router, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|error| {
        panic!(
            "body was not the expected JSON ({error}): {}",
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, value)
}

/// Serves a seeded store on an ephemeral port and returns its base URL.
pub async fn spawn_server() -> (String, Arc<InMemoryTodoRepository>) {
    let (router, repository) = seeded_router();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{address}"), repository)
}
