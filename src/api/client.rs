use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::api::{AskRequest, AskResponse};
use crate::core::answer_service::{AnswerOutcome, AnswerService};
use crate::utils::url::construct_api_url;

/// Everything that can go wrong between sending a question and holding a
/// parsed response.
#[derive(Debug)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    Request(reqwest::Error),

    /// The service answered with a non-success status.
    Status {
        status: StatusCode,
        body: String,
    },

    /// The body was not the expected JSON shape.
    Decode(serde_json::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request(source) => write!(f, "Request failed: {source}"),
            TransportError::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    write!(f, "Service returned {status}")
                } else {
                    write!(f, "Service returned {status}: {body}")
                }
            }
            TransportError::Decode(source) => write!(f, "Malformed response: {source}"),
        }
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TransportError::Request(source) => Some(source),
            TransportError::Status { .. } => None,
            TransportError::Decode(source) => Some(source),
        }
    }
}

/// Result of probing the service's `/health` endpoint.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub status: StatusCode,
    pub body: String,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.is_success()
    }

    /// The body re-indented when it is JSON, otherwise trimmed as-is.
    pub fn display_body(&self) -> String {
        match serde_json::from_str::<serde_json::Value>(&self.body) {
            Ok(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| self.body.clone())
            }
            Err(_) => self.body.trim().to_string(),
        }
    }
}

/// Talks to the answering service over HTTP. No auth headers, no retry and
/// no client-side timeout.
#[derive(Clone)]
pub struct HttpAnswerService {
    client: Client,
    base_url: String,
}

impl HttpAnswerService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_answers(&self, question: &str) -> Result<AskResponse, TransportError> {
        let ask_url = construct_api_url(&self.base_url, "ask");
        debug!(url = %ask_url, "sending question");

        let response = self
            .client
            .post(ask_url)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(TransportError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(TransportError::Status { status, body });
        }

        let bytes = response.bytes().await.map_err(TransportError::Request)?;
        serde_json::from_slice(&bytes).map_err(TransportError::Decode)
    }

    pub async fn check_health(&self) -> Result<HealthReport, TransportError> {
        let health_url = construct_api_url(&self.base_url, "health");
        let response = self
            .client
            .get(health_url)
            .send()
            .await
            .map_err(TransportError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::Request)?;
        info!(%status, "health probe finished");
        Ok(HealthReport { status, body })
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, question: &str) -> AnswerOutcome {
        match self.fetch_answers(question).await {
            Ok(response) => AnswerOutcome::from_answers(response.answers),
            Err(err) => {
                debug!(error = %err, "ask request failed");
                AnswerOutcome::Failed(err)
            }
        }
    }
}
