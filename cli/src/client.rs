use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tasklist_core::{CreateTaskRequest, MessageResponse, TaskDto};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/tasks";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
}

/// The four calls the client makes against the task API.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ClientError>;
    async fn create_task(&self, text: &str) -> Result<TaskDto, ClientError>;
    async fn toggle_task(&self, id: Uuid) -> Result<TaskDto, ClientError>;
    async fn delete_task(&self, id: Uuid) -> Result<MessageResponse, ClientError>;
}

pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_url(&self, id: Uuid) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&body)
        .map(|m| m.message)
        .unwrap_or(body);
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ClientError> {
        let response = self.client.get(&self.base_url).send().await?;
        decode(response).await
    }

    async fn create_task(&self, text: &str) -> Result<TaskDto, ClientError> {
        let request = CreateTaskRequest { text: text.to_string() };
        let response = self.client.post(&self.base_url).json(&request).send().await?;
        decode(response).await
    }

    async fn toggle_task(&self, id: Uuid) -> Result<TaskDto, ClientError> {
        let response = self.client.put(self.task_url(id)).send().await?;
        decode(response).await
    }

    async fn delete_task(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        let response = self.client.delete(self.task_url(id)).send().await?;
        decode(response).await
    }
}
