//! HTTP client wrapper for the OpenAI vector store endpoints.

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Method, multipart};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{FileObject, VectorStoreError, VectorStoreFile};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Lightweight HTTP client for vector store uploads.
pub struct VectorStoreClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl VectorStoreClient {
    /// Construct a new client for the given API key.
    ///
    /// `base_url` overrides the public API endpoint; tests point it at a
    /// local mock server.
    pub fn new(api_key: String, base_url: Option<String>) -> Result<Self, VectorStoreError> {
        let client = Client::builder().user_agent("docsync/0.1").build()?;
        let base_url = normalize_base_url(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
            .map_err(VectorStoreError::InvalidUrl)?;
        tracing::debug!(url = %base_url, "Initialized vector store HTTP client");

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Upload a staged file, attach it to a vector store, and wait for the
    /// store to finish ingesting it.
    ///
    /// There is no timeout: a store that never settles blocks the sync, and
    /// a terminal `failed`/`cancelled` status surfaces as an error.
    pub async fn upload_and_poll(
        &self,
        store_id: &str,
        path: &Path,
        filename: &str,
    ) -> Result<VectorStoreFile, VectorStoreError> {
        let file = self.upload_file(path, filename).await?;
        let attached = self.attach_file(store_id, &file.id).await?;
        self.poll_until_settled(store_id, attached).await
    }

    /// Upload the staged blob with the `assistants` purpose.
    async fn upload_file(
        &self,
        path: &Path,
        filename: &str,
    ) -> Result<FileObject, VectorStoreError> {
        let bytes = tokio::fs::read(path).await?;
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/plain")?;
        let form = multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let response = self
            .request(Method::POST, "files")
            .multipart(form)
            .send()
            .await?;
        self.parse_json(response).await
    }

    /// Attach an uploaded file to the target vector store.
    async fn attach_file(
        &self,
        store_id: &str,
        file_id: &str,
    ) -> Result<VectorStoreFile, VectorStoreError> {
        let response = self
            .request(Method::POST, &format!("vector_stores/{store_id}/files"))
            .json(&json!({ "file_id": file_id }))
            .send()
            .await?;
        self.parse_json(response).await
    }

    async fn poll_until_settled(
        &self,
        store_id: &str,
        mut current: VectorStoreFile,
    ) -> Result<VectorStoreFile, VectorStoreError> {
        loop {
            match current.status.as_str() {
                "completed" => return Ok(current),
                "failed" | "cancelled" => {
                    return Err(VectorStoreError::Ingest {
                        file_id: current.id,
                        status: current.status,
                    });
                }
                _ => {}
            }

            tokio::time::sleep(POLL_INTERVAL).await;
            let response = self
                .request(
                    Method::GET,
                    &format!("vector_stores/{store_id}/files/{}", current.id),
                )
                .send()
                .await?;
            current = self.parse_json(response).await?;
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format_endpoint(&self.base_url, path);
        self.client
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", "assistants=v2")
    }

    async fn parse_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, VectorStoreError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = VectorStoreError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Vector store request failed");
            Err(error)
        }
    }
}

fn normalize_base_url(url: &str) -> Result<String, String> {
    let mut parsed = reqwest::Url::parse(url).map_err(|err| err.to_string())?;
    let path = parsed.path().trim_end_matches('/').to_string();
    parsed.set_path(&path);
    Ok(parsed.to_string())
}

fn format_endpoint(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
