//! HTTP collaborators: the document store and the question answerer.
//!
//! Both live behind traits so the controller can be exercised against
//! in-process fakes; [`BackendClient`] is the real implementation speaking to
//! the two REST endpoints.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::DocumentId,
    error::ErrorDetail,
    protocol::{AskRequest, AskResponse, UploadResponse},
};
use tracing::info;

use crate::session::SelectedFile;

/// Accepts an uploaded file and returns the identifier the server assigned.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn store_document(&self, file: &SelectedFile) -> Result<DocumentId>;
}

/// Answers a natural-language question about a previously stored document.
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    async fn answer(&self, document_id: DocumentId, question: &str) -> Result<String>;
}

/// Client for the two consumed endpoints: `POST /upload/` (multipart form,
/// field `file`) and `POST /ask/` (JSON). No retries and no request timeout
/// beyond reqwest defaults; a hung request simply leaves the wizard waiting.
pub struct BackendClient {
    http: Client,
    server_url: String,
}

impl BackendClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

/// Maps a non-2xx response to an error carrying the status plus whatever
/// detail the server put in its `{"detail": ...}` body.
async fn reject_error_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = ErrorDetail::from_body(&body).unwrap_or(body);
    if detail.is_empty() {
        Err(anyhow!("server responded with status {status}"))
    } else {
        Err(anyhow!("server responded with status {status}: {detail}"))
    }
}

#[async_trait]
impl DocumentStore for BackendClient {
    async fn store_document(&self, file: &SelectedFile) -> Result<DocumentId> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str("application/pdf")
            .context("invalid multipart mime type")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/upload/", self.server_url))
            .multipart(form)
            .send()
            .await
            .context("upload request failed to reach the server")?;
        let body: UploadResponse = reject_error_status(response)
            .await?
            .json()
            .await
            .context("invalid upload response body")?;

        info!(
            document_id = body.id.0,
            filename = %file.filename,
            "document stored"
        );
        Ok(body.id)
    }
}

#[async_trait]
impl QuestionAnswerer for BackendClient {
    async fn answer(&self, document_id: DocumentId, question: &str) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/ask/", self.server_url))
            .json(&AskRequest {
                question: question.to_string(),
                document_id,
            })
            .send()
            .await
            .context("ask request failed to reach the server")?;
        let body: AskResponse = reject_error_status(response)
            .await?
            .json()
            .await
            .context("invalid ask response body")?;
        Ok(body.answer)
    }
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
