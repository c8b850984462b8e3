// Server side of the classification contract: the endpoint the app
// posts captured stills to, backed by a pluggable model inference
// service.

pub mod handlers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capture::ClassifyError;

/// Decoded upload cap, matching the model server's 10 MB limit.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// A raw model prediction: the winning label and its softmax score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    pub label: String,
    pub confidence: f32,
}

/// Model inference behind the classification endpoint. Production
/// proxies to the hosted model server; tests inject a fixed-label
/// backend.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn infer(&self, jpeg_base64: &str) -> Result<Inference, ClassifyError>;
}

#[derive(Debug, Serialize)]
struct ModelRequestBody<'a> {
    image_data: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModelResponseBody {
    label: Option<String>,
    confidence: Option<f32>,
    error: Option<String>,
}

/// Proxies inference to the model server over its JSON contract:
/// request `{"image_data": ...}`, response `{"label", "confidence"}`
/// or `{"error"}`.
pub struct HttpInferenceBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInferenceBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl InferenceBackend for HttpInferenceBackend {
    async fn infer(&self, jpeg_base64: &str) -> Result<Inference, ClassifyError> {
        debug!(endpoint = %self.endpoint, "Forwarding image to model server");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ModelRequestBody {
                image_data: jpeg_base64,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassifyError::Status(response.status().as_u16()));
        }

        let body: ModelResponseBody = response.json().await?;
        match body {
            ModelResponseBody {
                label: Some(label),
                confidence,
                ..
            } => Ok(Inference {
                label,
                confidence: confidence.unwrap_or(0.0),
            }),
            ModelResponseBody {
                error: Some(error), ..
            } => Err(ClassifyError::Service(error)),
            _ => Err(ClassifyError::Malformed),
        }
    }
}
