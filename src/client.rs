//! HTTP client for the summarization backend.
//!
//! Uses reqwest to upload the selected document as `multipart/form-data`.

use crate::config::{BackendConfig, SummaryLength};
use crate::selection::SelectedFile;
use crate::summary::Summary;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("docsum/", env!("CARGO_PKG_VERSION"));

/// Message shown for every failure the backend does not describe itself
pub const GENERIC_ERROR: &str = "An error occurred while summarizing.";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid backend url {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Backend {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ClientError {
    /// The single string shown to the user for this failure.
    ///
    /// Only a backend-supplied `error` field is surfaced verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_ERROR.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Request(e) if e.is_timeout())
    }
}

/// Error body of a non-2xx backend response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Client for the `POST /summarize` endpoint
#[derive(Debug, Clone)]
pub struct SummarizerClient {
    http: Client,
    endpoint: Url,
    length: Option<SummaryLength>,
}

impl SummarizerClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.url).map_err(|e| ClientError::InvalidEndpoint {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint,
            length: config.length,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Upload a document and wait for its summary
    pub async fn summarize(&self, file: &SelectedFile) -> Result<Summary, ClientError> {
        let bytes = file.read().await.map_err(|source| ClientError::ReadFile {
            path: file.path().to_path_buf(),
            source,
        })?;

        let part = Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())?;
        let mut form = Form::new().part("file", part);
        if let Some(length) = self.length {
            form = form.text("length", length.as_str());
        }

        tracing::debug!(file = file.name(), endpoint = %self.endpoint, "submitting document");

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_error_message(&body);
            tracing::warn!(%status, error = message.as_deref(), "backend rejected document");
            return Err(ClientError::Backend { status, message });
        }

        let summary: Summary = response.json().await?;
        tracing::debug!(model = summary.model_label(), chars = summary.text.len(), "summary received");
        Ok(summary)
    }
}

/// Pull a non-empty `error` string out of an error body, if there is one
fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .error
        .filter(|message| !message.is_empty())
}
