//! Bitmap decoding: base64 text to a pixel-addressable image.

use std::future::Future;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::info;

use crate::error::ResizeError;
use crate::types::SourceBitmap;

/// Capability port for decoding base64 image data into a bitmap.
///
/// Exactly one of {success, `DecodeAborted`, `DecodeFailed`} per invocation.
pub trait BitmapDecoder {
    fn decode(
        &self,
        base64: &str,
    ) -> impl Future<Output = Result<SourceBitmap, ResizeError>> + Send;
}

/// Default decoder backed by the `image` crate.
///
/// Decoding is CPU-bound, so the work runs on a blocking task.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryDecoder;

impl BitmapDecoder for InMemoryDecoder {
    async fn decode(&self, base64: &str) -> Result<SourceBitmap, ResizeError> {
        let payload = base64.to_string();
        let image = tokio::task::spawn_blocking(move || {
            let bytes = STANDARD
                .decode(payload)
                .map_err(|e| ResizeError::DecodeFailed(format!("invalid base64 payload: {}", e)))?;
            image::load_from_memory(&bytes).map_err(|e| ResizeError::DecodeFailed(e.to_string()))
        })
        .await
        .map_err(|e| ResizeError::DecodeFailed(format!("decode task panicked: {}", e)))??;

        info!("Decoded image: {}x{}", image.width(), image.height());
        Ok(SourceBitmap::new(image))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat};

    use super::*;

    fn png_base64(width: u32, height: u32) -> String {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        STANDARD.encode(buffer.into_inner())
    }

    #[tokio::test]
    async fn test_decode_reports_intrinsic_dimensions() {
        let bitmap = InMemoryDecoder.decode(&png_base64(640, 480)).await.unwrap();
        assert_eq!(bitmap.width(), 640);
        assert_eq!(bitmap.height(), 480);
    }

    #[tokio::test]
    async fn test_invalid_base64_fails_to_decode() {
        let err = InMemoryDecoder.decode("not-base64!!!").await.unwrap_err();
        assert!(matches!(err, ResizeError::DecodeFailed(_)));
    }

    #[tokio::test]
    async fn test_non_image_bytes_fail_to_decode() {
        let payload = STANDARD.encode(b"just some text, not an image");
        let err = InMemoryDecoder.decode(&payload).await.unwrap_err();
        assert!(matches!(err, ResizeError::DecodeFailed(_)));
    }
}
