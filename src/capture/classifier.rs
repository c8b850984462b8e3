use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::ClassificationResult;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClassifyError {
    #[error("classification request failed: {0}")]
    Transport(String),
    #[error("classifier returned HTTP {0}")]
    Status(u16),
    #[error("classifier error: {0}")]
    Service(String),
    #[error("malformed classifier response")]
    Malformed,
}

impl From<reqwest::Error> for ClassifyError {
    fn from(error: reqwest::Error) -> Self {
        ClassifyError::Transport(error.to_string())
    }
}

/// The remote classification endpoint consumed by the capture flow.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, jpeg_base64: &str) -> Result<ClassificationResult, ClassifyError>;
}

#[derive(Debug, Serialize)]
struct ClassifyRequestBody<'a> {
    image_data: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponseBody {
    category: Option<String>,
    error: Option<String>,
}

/// HTTP classifier speaking the app↔backend JSON contract: request
/// `{"image_data": <base64 jpeg>}`, response `{"category": ...}` or
/// `{"error": ...}`. The field names are a private contract with the
/// backend and are not guaranteed stable.
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, jpeg_base64: &str) -> Result<ClassificationResult, ClassifyError> {
        debug!(endpoint = %self.endpoint, bytes = jpeg_base64.len(), "Sending classification request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequestBody {
                image_data: jpeg_base64,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassifyError::Status(response.status().as_u16()));
        }

        let body: ClassifyResponseBody = response.json().await?;
        match (body.category, body.error) {
            (Some(category), _) => Ok(ClassificationResult::from_label(category)),
            (None, Some(error)) => Err(ClassifyError::Service(error)),
            (None, None) => Err(ClassifyError::Malformed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_body_tolerates_either_shape() {
        let ok: ClassifyResponseBody =
            serde_json::from_str(r#"{"category": "Recyclable"}"#).unwrap();
        assert_eq!(ok.category.as_deref(), Some("Recyclable"));
        assert!(ok.error.is_none());

        let err: ClassifyResponseBody =
            serde_json::from_str(r#"{"error": "Failed to process image"}"#).unwrap();
        assert!(err.category.is_none());
        assert_eq!(err.error.as_deref(), Some("Failed to process image"));
    }

    #[test]
    fn request_body_uses_the_private_field_name() {
        let json = serde_json::to_string(&ClassifyRequestBody { image_data: "abc" }).unwrap();
        assert_eq!(json, r#"{"image_data":"abc"}"#);
    }
}
