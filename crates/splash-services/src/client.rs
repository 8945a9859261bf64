//! HTTP client for the todo API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::error::TodoApiError;
use crate::store::TodoStore;
use crate::todo::{Task, TaskId, TaskPayload};

/// Collection path appended to the base URL.
const COLLECTION: &str = "todos";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Todo API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: Url,
    client: Arc<Client>,
}

impl TodoClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, TodoApiError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TodoApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TodoApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(TodoApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("colorsplash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!("Todo client targeting {}", base_url);

        Ok(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/todos[/{id}]`, with the id percent-encoded as one segment.
    fn todos_url(&self, id: Option<&TaskId>) -> Result<Url, TodoApiError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| TodoApiError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(COLLECTION);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    /// Fail on non-2xx, keeping whatever body the server sent.
    async fn check_response(&self, response: Response) -> Result<Response, TodoApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TodoApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, TodoApiError> {
        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| TodoApiError::InvalidResponse(format!("JSON parse error: {}", e)))
    }

    /// Any 2xx is success. Servers differ in what they echo back (the task,
    /// a status message, nothing), so the body only yields the task when it
    /// parses as one.
    async fn read_echoed_task(&self, response: Response) -> Result<Option<Task>, TodoApiError> {
        let response = self.check_response(response).await?;
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Could not read reply body: {}", e);
                return Ok(None);
            }
        };

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        match serde_json::from_slice::<Task>(&body) {
            Ok(task) => Ok(Some(task)),
            Err(e) => {
                tracing::debug!("Reply body is not a task: {}", e);
                Ok(None)
            }
        }
    }

    /// Fetch the full collection.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_todos(&self) -> Result<Vec<Task>, TodoApiError> {
        let url = self.todos_url(None)?;
        let response = self.request(Method::GET, url).send().await?;
        let todos: Vec<Task> = self.read_json(response).await?;

        tracing::info!("Fetched {} todos", todos.len());
        Ok(todos)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn create_todo(&self, payload: &TaskPayload) -> Result<Option<Task>, TodoApiError> {
        let url = self.todos_url(None)?;
        let response = self
            .request(Method::POST, url)
            .json(payload)
            .send()
            .await?;
        let todo = self.read_echoed_task(response).await?;

        match &todo {
            Some(todo) => tracing::info!("Created todo {}", todo.id),
            None => tracing::info!("Created todo"),
        }
        Ok(todo)
    }

    /// Replace a todo's text and completion flag.
    #[instrument(skip(self), level = "debug")]
    pub async fn update_todo(
        &self,
        id: &TaskId,
        payload: &TaskPayload,
    ) -> Result<Option<Task>, TodoApiError> {
        let url = self.todos_url(Some(id))?;
        let response = self
            .request(Method::PUT, url)
            .json(payload)
            .send()
            .await?;
        let todo = self.read_echoed_task(response).await?;

        tracing::info!("Updated todo {}", id);
        Ok(todo)
    }

    /// Delete a todo. Any 2xx counts, with or without a body.
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_todo(&self, id: &TaskId) -> Result<(), TodoApiError> {
        let url = self.todos_url(Some(id))?;
        let response = self.request(Method::DELETE, url).send().await?;
        self.check_response(response).await?;

        tracing::info!("Deleted todo {}", id);
        Ok(())
    }
}

#[async_trait]
impl TodoStore for TodoClient {
    async fn list(&self) -> Result<Vec<Task>, TodoApiError> {
        self.list_todos().await
    }

    async fn create(&self, payload: TaskPayload) -> Result<Option<Task>, TodoApiError> {
        self.create_todo(&payload).await
    }

    async fn update(
        &self,
        id: &TaskId,
        payload: TaskPayload,
    ) -> Result<Option<Task>, TodoApiError> {
        self.update_todo(id, &payload).await
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TodoApiError> {
        self.delete_todo(id).await
    }
}
