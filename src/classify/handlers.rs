use axum::{extract::State, Json};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::MAX_IMAGE_BYTES;
use crate::shared::{AppError, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub image_data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub category: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// POST /classify
///
/// Accepts a base64-encoded still image, validates it, and delegates
/// to the configured inference backend.
#[instrument(name = "classify_image", skip(state, request))]
pub async fn classify_image(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    if request.image_data.is_empty() {
        return Err(AppError::BadRequest("No image data provided".to_string()));
    }

    let bytes = BASE64
        .decode(request.image_data.as_bytes())
        .map_err(|_| AppError::BadRequest("Image data is not valid base64".to_string()))?;

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::PayloadTooLarge(
            "Image exceeds the 10MB limit".to_string(),
        ));
    }

    if image::load_from_memory(&bytes).is_err() {
        return Err(AppError::BadRequest(
            "Image could not be decoded".to_string(),
        ));
    }

    let inference = state
        .inference
        .infer(&request.image_data)
        .await
        .map_err(|error| {
            warn!(%error, "Model inference failed");
            AppError::Upstream("Failed to process image".to_string())
        })?;

    info!(
        label = %inference.label,
        confidence = inference.confidence,
        image_bytes = bytes.len(),
        "Classified image"
    );

    Ok(Json(ClassifyResponse {
        category: inference.label,
        confidence: inference.confidence,
    }))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::{AppStateBuilder, FixedInferenceBackend};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use std::io::Cursor;
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/classify", post(classify_image))
            .with_state(
                AppStateBuilder::new()
                    .with_inference(Arc::new(FixedInferenceBackend::new("Recyclable", 0.97)))
                    .build(),
            )
    }

    fn encoded_png() -> String {
        let img = image::RgbImage::from_pixel(64, 64, image::Rgb([0, 120, 200]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        BASE64.encode(&bytes)
    }

    fn classify_request(image_data: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/classify")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "image_data": image_data }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn valid_image_classifies() {
        let response = app().oneshot(classify_request(&encoded_png())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: ClassifyResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.category, "Recyclable");
        assert_eq!(parsed.confidence, 0.97);
    }

    #[tokio::test]
    async fn empty_payload_is_rejected() {
        let response = app().oneshot(classify_request("")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_base64_is_rejected() {
        let response = app()
            .oneshot(classify_request("not-base64!!!"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_image_bytes_are_rejected() {
        let encoded = BASE64.encode(b"just some text, definitely not an image");
        let response = app().oneshot(classify_request(&encoded)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_payloads_are_rejected() {
        let encoded = BASE64.encode(vec![0u8; MAX_IMAGE_BYTES + 1]);
        let response = app().oneshot(classify_request(&encoded)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
