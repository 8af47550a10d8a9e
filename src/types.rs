use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// An opaque binary image payload together with its declared media type.
///
/// The media type is whatever the producer claims (`image/png`,
/// `text/plain`, ...); validation checks the claim, the decoder checks the
/// bytes. Value type with no identity beyond equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    media_type: String,
    bytes: Vec<u8>,
}

impl ImageBlob {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    /// The declared media type, e.g. `image/jpeg`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encoded container for the resized output.
///
/// PNG and WebP are written lossless, so the quality hint only affects JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    /// MIME type used in the emitted data URL.
    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Webp => "image/webp",
        }
    }
}

/// Caller-supplied resize configuration.
///
/// At least one of `width`/`height` must be set; a single dimension scales
/// the other to preserve the source aspect ratio, both dimensions are used
/// verbatim. `quality` must lie in [0.1, 1.0] when present. Unknown fields
/// are rejected at deserialization rather than silently ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ResizeOptions {
    /// Output container; defaults to lossless PNG.
    pub output_format: OutputFormat,
    /// Target pixel width.
    pub width: Option<u32>,
    /// Target pixel height.
    pub height: Option<u32>,
    /// Encoder quality hint in [0.1, 1.0]; ignored by lossless formats.
    pub quality: Option<f32>,
}

/// A resolved target size.
///
/// Real-valued so fractional results of aspect scaling reach the drawing
/// surface unmodified; the surface layer performs integer coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// A decoded, pixel-addressable image with known intrinsic dimensions.
///
/// Owned by the single resize call that decoded it and dropped when that
/// call returns.
#[derive(Debug, Clone)]
pub struct SourceBitmap {
    image: DynamicImage,
}

impl SourceBitmap {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Intrinsic pixel width as decoded.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Intrinsic pixel height as decoded.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_defaults_to_png() {
        assert_eq!(OutputFormat::default(), OutputFormat::Png);
        assert_eq!(ResizeOptions::default().output_format, OutputFormat::Png);
    }

    #[test]
    fn test_output_format_mime() {
        assert_eq!(OutputFormat::Png.mime(), "image/png");
        assert_eq!(OutputFormat::Jpeg.mime(), "image/jpeg");
        assert_eq!(OutputFormat::Webp.mime(), "image/webp");
    }

    #[test]
    fn test_resize_options_serde_roundtrip() {
        let options = ResizeOptions {
            output_format: OutputFormat::Jpeg,
            width: Some(800),
            height: None,
            quality: Some(0.8),
        };

        let json = serde_json::to_string(&options).unwrap();
        let deserialized: ResizeOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, deserialized);
    }

    #[test]
    fn test_resize_options_missing_fields_use_defaults() {
        let options: ResizeOptions = serde_json::from_str(r#"{"width": 400}"#).unwrap();
        assert_eq!(options.width, Some(400));
        assert_eq!(options.height, None);
        assert_eq!(options.quality, None);
        assert_eq!(options.output_format, OutputFormat::Png);
    }

    #[test]
    fn test_resize_options_rejects_unknown_fields() {
        let result = serde_json::from_str::<ResizeOptions>(r#"{"width": 400, "wdith": 200}"#);
        assert!(result.is_err(), "Unknown field should be rejected");
    }

    #[test]
    fn test_output_format_lowercase_names() {
        assert_eq!(serde_json::to_string(&OutputFormat::Webp).unwrap(), r#""webp""#);
        let parsed: OutputFormat = serde_json::from_str(r#""jpeg""#).unwrap();
        assert_eq!(parsed, OutputFormat::Jpeg);
    }

    #[test]
    fn test_blob_accessors() {
        let blob = ImageBlob::new("image/png", vec![1, 2, 3]);
        assert_eq!(blob.media_type(), "image/png");
        assert_eq!(blob.bytes(), &[1, 2, 3]);
    }
}
