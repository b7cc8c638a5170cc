use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use super::controller::{Completion, Request};
use crate::model::{CreateTask, Task, UpdateTask};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Network seam for the controller. The TUI uses the reqwest-backed
/// implementation; tests drive the controller through an in-process one.
#[async_trait]
pub trait TaskApi: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Task>, ClientError>;

    async fn create(&self, title: String) -> Result<Task, ClientError>;

    async fn update(&self, id: Uuid, patch: UpdateTask) -> Result<Task, ClientError>;

    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}

pub struct HttpTaskApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "server error".to_string());
        Err(ClientError::Api(message))
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.http.get(self.url("/api/tasks")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create(&self, title: String) -> Result<Task, ClientError> {
        let response = self
            .http
            .post(self.url("/api/tasks"))
            .json(&CreateTask { title: Some(title) })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update(&self, id: Uuid, patch: UpdateTask) -> Result<Task, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/api/tasks/{id}")))
            .json(&patch)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/tasks/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Runs one request to completion, folding any failure into the
/// human-readable status message the controller will show.
pub async fn execute(api: &dyn TaskApi, request: Request) -> Completion {
    match request {
        Request::Load => Completion::Loaded(
            api.list()
                .await
                .map_err(|err| format!("Having trouble reaching the server: {err}")),
        ),
        Request::Create { title } => Completion::Created(
            api.create(title)
                .await
                .map_err(|err| format!("Could not add the task: {err}")),
        ),
        Request::Update {
            id,
            patch,
            from_edit,
        } => Completion::Updated {
            id,
            from_edit,
            result: api
                .update(id, patch)
                .await
                .map_err(|err| format!("Could not update the task: {err}")),
        },
        Request::Delete { id } => Completion::Deleted {
            id,
            result: api
                .delete(id)
                .await
                .map_err(|err| format!("Could not delete the task: {err}")),
        },
    }
}
