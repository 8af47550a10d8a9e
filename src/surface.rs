//! Drawing surfaces: transient 2D raster canvases that can draw a bitmap
//! and serialize themselves to a data URL.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use tracing::debug;

use crate::error::ResizeError;
use crate::types::{OutputFormat, SourceBitmap};

/// Resample filter for all scaled draws.
const DRAW_FILTER: FilterType = FilterType::Lanczos3;

/// JPEG quality used when the caller gives no hint.
const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Capability port for allocating transient drawing surfaces.
pub trait SurfaceProvider {
    type Surface: DrawingSurface;

    /// Allocate a surface of the given pixel size.
    ///
    /// Fails with `SurfaceUnavailable` when the environment cannot supply a
    /// drawable context.
    fn acquire(&self, width: u32, height: u32) -> Result<Self::Surface, ResizeError>;
}

/// A 2D raster canvas supporting draw-image and encode-to-string.
pub trait DrawingSurface {
    /// Current pixel width.
    fn width(&self) -> u32;

    /// Current pixel height.
    fn height(&self) -> u32;

    /// Draw the bitmap scaled to fill the whole surface.
    fn draw(&mut self, bitmap: &SourceBitmap);

    /// Resize the surface to a new pixel size, clearing its contents
    /// (canvas semantics).
    fn resize(&mut self, width: u32, height: u32);

    /// Serialize the surface contents to a `data:<mime>;base64,<payload>`
    /// URL in the requested format.
    fn encode(&self, format: OutputFormat, quality: Option<f32>) -> Result<String, ResizeError>;
}

/// Default provider allocating in-memory RGBA canvases.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterSurfaceProvider;

impl SurfaceProvider for RasterSurfaceProvider {
    type Surface = RasterSurface;

    fn acquire(&self, width: u32, height: u32) -> Result<RasterSurface, ResizeError> {
        // A zero-sized canvas has no drawable context.
        if width == 0 || height == 0 {
            return Err(ResizeError::SurfaceUnavailable);
        }

        debug!("Acquired {}x{} raster surface", width, height);
        Ok(RasterSurface {
            canvas: RgbaImage::new(width, height),
        })
    }
}

/// In-memory RGBA canvas backed by the `image` crate.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    canvas: RgbaImage,
}

impl DrawingSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn draw(&mut self, bitmap: &SourceBitmap) {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        if bitmap.width() == width && bitmap.height() == height {
            // Unscaled paint: copy pixels directly instead of resampling.
            self.canvas = bitmap.image().to_rgba8();
        } else {
            self.canvas =
                image::imageops::resize(&bitmap.image().to_rgba8(), width, height, DRAW_FILTER);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas = RgbaImage::new(width.max(1), height.max(1));
    }

    fn encode(&self, format: OutputFormat, quality: Option<f32>) -> Result<String, ResizeError> {
        let bytes = self.encode_bytes(format, quality)?;
        Ok(format!(
            "data:{};base64,{}",
            format.mime(),
            STANDARD.encode(bytes)
        ))
    }
}

impl RasterSurface {
    fn encode_bytes(&self, format: OutputFormat, quality: Option<f32>) -> Result<Vec<u8>, ResizeError> {
        let mut bytes = Vec::new();

        match format {
            OutputFormat::Png => self
                .canvas
                .write_with_encoder(PngEncoder::new(&mut bytes))
                .map_err(|e| ResizeError::EncodeFailed(e.to_string()))?,
            OutputFormat::Jpeg => {
                // JPEG carries no alpha channel.
                let rgb = DynamicImage::ImageRgba8(self.canvas.clone()).to_rgb8();
                rgb.write_with_encoder(JpegEncoder::new_with_quality(
                    &mut bytes,
                    jpeg_quality(quality),
                ))
                .map_err(|e| ResizeError::EncodeFailed(e.to_string()))?
            }
            OutputFormat::Webp => self
                .canvas
                .write_with_encoder(WebPEncoder::new_lossless(&mut bytes))
                .map_err(|e| ResizeError::EncodeFailed(e.to_string()))?,
        }

        Ok(bytes)
    }
}

/// Map the [0.1, 1.0] quality hint onto the JPEG encoder's 1-100 scale.
fn jpeg_quality(quality: Option<f32>) -> u8 {
    match quality {
        Some(quality) => (quality * 100.0).round().clamp(1.0, 100.0) as u8,
        None => DEFAULT_JPEG_QUALITY,
    }
}
