//! Backend-mediated integrations: LLM invocation and file upload
//!
//! Integrations go through the same authenticated HTTP surface as
//! entities; the backend owns the actual model and storage providers.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::session::TokenStore;

/// Request for a backend LLM invocation.
///
/// Built per call site rather than passed as a free-form map, so the
/// request shape is checked at compile time.
#[derive(Debug, Clone, Serialize)]
pub struct LlmRequest {
    pub prompt: String,

    /// Ask the backend to ground the answer in live web context
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub add_context_from_internet: bool,

    /// Previously uploaded files (by URL) the model should look at,
    /// e.g. a produce photo for quality grading
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_urls: Vec<String>,

    /// JSON schema the response must conform to. When set, the backend
    /// returns a JSON object instead of free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_json_schema: Option<Value>,
}

impl LlmRequest {
    /// Create a free-text request for `prompt`
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            add_context_from_internet: false,
            file_urls: Vec::new(),
            response_json_schema: None,
        }
    }

    /// Ground the answer in live web context
    pub fn with_internet_context(mut self) -> Self {
        self.add_context_from_internet = true;
        self
    }

    /// Attach an uploaded file for the model to inspect
    pub fn with_file_url(mut self, url: impl Into<String>) -> Self {
        self.file_urls.push(url.into());
        self
    }

    /// Constrain the response to the given JSON schema
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_json_schema = Some(schema);
        self
    }
}

/// Result of a file upload: where the backend stored the file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_url: String,
}

/// Client for backend integrations
pub struct IntegrationsClient {
    url: String,
    client: Client,
    store: Arc<dyn TokenStore>,
}

impl IntegrationsClient {
    pub(crate) fn new(url: &str, client: Client, store: Arc<dyn TokenStore>) -> Self {
        Self {
            url: url.to_string(),
            client,
            store,
        }
    }

    /// Invoke the backend LLM and return its response as raw JSON.
    ///
    /// Free-text requests come back as a JSON string; schema-constrained
    /// requests as an object matching the schema.
    pub async fn invoke_llm(&self, request: &LlmRequest) -> Result<Value> {
        let token = self.store.get();

        Fetch::post(&self.client, &self.url, "/integrations/core/invoke-llm")
            .maybe_bearer_auth(token.as_deref())
            .json(request)?
            .execute()
            .await
    }

    /// Invoke the backend LLM and parse the schema-constrained response
    /// into `T`. A response that does not match `T` is a decode error,
    /// same as any other malformed body.
    pub async fn invoke_llm_as<T: DeserializeOwned>(&self, request: &LlmRequest) -> Result<T> {
        let value = self.invoke_llm(request).await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }

    /// Upload a file to backend storage and return its public URL
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadedFile> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let token = self.store.get();

        Fetch::post(&self.client, &self.url, "/integrations/core/upload-file")
            .maybe_bearer_auth(token.as_deref())
            .multipart(form)
            .execute()
            .await
    }
}
