//! Transport between the client sync layer and the todo service.
//!
//! [`TodoApi`] is the seam: [`HttpTodoApi`] talks to a real service over
//! HTTP, tests substitute scripted implementations.

use std::future::Future;
use std::time::Duration;

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::config::ClientConfig;
use crate::api::{CreateTodoRequest, ErrorResponse, TodoResponse};
use crate::domain::{Todo, TodoId};

// =============================================================================
// Client Error
// =============================================================================

/// Why a request to the service did not produce the expected item(s).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The service could not be reached or did not answer in time.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// A success response whose body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// A request URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status of the failure, if the service answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

// =============================================================================
// Todo API Trait
// =============================================================================

/// The service operations the client sync layer depends on.
pub trait TodoApi: Send + Sync {
    /// `GET /api/todos`
    fn list_todos(&self) -> impl Future<Output = Result<Vec<Todo>, ClientError>> + Send;

    /// `POST /api/todos` with `{text, completed: false}`
    fn create_todo(&self, text: &str) -> impl Future<Output = Result<Todo, ClientError>> + Send;

    /// `PUT /api/todos/{id}` with the full item
    fn update_todo(&self, todo: &Todo) -> impl Future<Output = Result<Todo, ClientError>> + Send;

    /// `DELETE /api/todos/{id}`
    fn delete_todo(&self, id: &TodoId) -> impl Future<Output = Result<Todo, ClientError>> + Send;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// [`TodoApi`] over HTTP using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpTodoApi {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url,
            timeout: config.timeout,
        }
    }

    /// Builds `{base}/api/todos` or `{base}/api/todos/{id}`.
    ///
    /// The id is pushed as a single path segment, so it is percent-encoded
    /// as needed.
    fn endpoint(&self, id: Option<&TodoId>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(["api", "todos"]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

/// Turns a response into `T`, or into [`ClientError::Status`] for non-2xx.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|error| ClientError::Decode(error.to_string()))
    } else {
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|body| body.message);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl TodoApi for HttpTodoApi {
    async fn list_todos(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self
            .client
            .get(self.endpoint(None)?)
            .timeout(self.timeout)
            .send()
            .await?;

        let todos: Vec<TodoResponse> = decode(response).await?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }

    async fn create_todo(&self, text: &str) -> Result<Todo, ClientError> {
        let response = self
            .client
            .post(self.endpoint(None)?)
            .timeout(self.timeout)
            .json(&CreateTodoRequest::new(text))
            .send()
            .await?;

        decode::<TodoResponse>(response).await.map(Todo::from)
    }

    async fn update_todo(&self, todo: &Todo) -> Result<Todo, ClientError> {
        let response = self
            .client
            .put(self.endpoint(Some(&todo.id))?)
            .timeout(self.timeout)
            .json(&TodoResponse::from(todo))
            .send()
            .await?;

        decode::<TodoResponse>(response).await.map(Todo::from)
    }

    async fn delete_todo(&self, id: &TodoId) -> Result<Todo, ClientError> {
        let response = self
            .client
            .delete(self.endpoint(Some(id))?)
            .timeout(self.timeout)
            .send()
            .await?;

        decode::<TodoResponse>(response).await.map(Todo::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::DEFAULT_TIMEOUT;
    use rstest::rstest;

    fn api(base: &str) -> HttpTodoApi {
        HttpTodoApi::new(ClientConfig::new(base, DEFAULT_TIMEOUT).unwrap())
    }

    #[rstest]
    #[case("http://localhost:5002", None, "http://localhost:5002/api/todos")]
    #[case("http://localhost:5002/", None, "http://localhost:5002/api/todos")]
    #[case(
        "http://localhost:5002/proxy/",
        Some("abc"),
        "http://localhost:5002/proxy/api/todos/abc"
    )]
    #[case(
        "http://localhost:5002",
        Some("a/b c"),
        "http://localhost:5002/api/todos/a%2Fb%20c"
    )]
    fn test_endpoint(#[case] base: &str, #[case] id: Option<&str>, #[case] expected: &str) {
        let id = id.map(TodoId::from);
        let url = api(base).endpoint(id.as_ref()).unwrap();
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn test_status_error_display() {
        let error = ClientError::Status {
            status: 404,
            message: Some("Todo not found".to_string()),
        };
        assert_eq!(error.to_string(), "HTTP 404: Todo not found");
        assert_eq!(error.status(), Some(404));

        let error = ClientError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(error.to_string(), "HTTP 502: no message");
    }

    #[rstest]
    fn test_transport_error_has_no_status() {
        assert_eq!(ClientError::Transport("refused".to_string()).status(), None);
    }
}
