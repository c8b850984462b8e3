//! Still-frame preparation: bound the snapshot resolution, re-encode
//! as JPEG and wrap in base64 for transport.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::imageops::FilterType;
use thiserror::Error;

/// Longest edge of an uploaded still, in pixels. Bounds upload size.
pub const MAX_STILL_EDGE: u32 = 800;

const JPEG_QUALITY: u8 = 80;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameError {
    #[error("failed to decode captured frame: {0}")]
    Decode(String),
    #[error("failed to encode still image: {0}")]
    Encode(String),
}

/// A prepared still image ready for classification upload.
#[derive(Debug, Clone, PartialEq)]
pub struct StillFrame {
    pub jpeg_base64: String,
    pub width: u32,
    pub height: u32,
}

/// Downscale a raw camera frame so its longest edge fits
/// [`MAX_STILL_EDGE`] (never upscaling), re-encode as JPEG and base64
/// the result.
pub fn bound_still_frame(raw: &[u8]) -> Result<StillFrame, FrameError> {
    let decoded =
        image::load_from_memory(raw).map_err(|error| FrameError::Decode(error.to_string()))?;

    let decoded = if decoded.width().max(decoded.height()) > MAX_STILL_EDGE {
        decoded.resize(MAX_STILL_EDGE, MAX_STILL_EDGE, FilterType::Triangle)
    } else {
        decoded
    };

    // JPEG has no alpha channel.
    let rgb = image::DynamicImage::ImageRgb8(decoded.to_rgb8());

    let mut jpeg = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|error| FrameError::Encode(error.to_string()))?;

    Ok(StillFrame {
        jpeg_base64: BASE64.encode(&jpeg),
        width: rgb.width(),
        height: rgb.height(),
    })
}
