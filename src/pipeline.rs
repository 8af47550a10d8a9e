//! Pipeline orchestration: validate → read → decode → resolve → draw.
//!
//! Each stage either produces the next stage's input or short-circuits the
//! whole call with its error; nothing is retried and no state is shared
//! between invocations.

use tracing::info;

use crate::decoder::{BitmapDecoder, InMemoryDecoder};
use crate::error::ResizeError;
use crate::reader::{Base64Reader, BlobReader};
use crate::scale;
use crate::surface::{DrawingSurface, RasterSurfaceProvider, SurfaceProvider};
use crate::types::{Dimensions, ImageBlob, OutputFormat, ResizeOptions, SourceBitmap};
use crate::validation;

/// The resize pipeline.
///
/// Generic over the three environment ports so tests can substitute
/// deterministic fakes; [`ImageResizer::new`] wires the in-process defaults
/// backed by the `image` and `base64` crates.
#[derive(Debug, Clone, Default)]
pub struct ImageResizer<R = Base64Reader, D = InMemoryDecoder, S = RasterSurfaceProvider> {
    reader: R,
    decoder: D,
    surfaces: S,
}

impl ImageResizer {
    /// Pipeline with the default in-process ports.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R, D, S> ImageResizer<R, D, S>
where
    R: BlobReader,
    D: BitmapDecoder,
    S: SurfaceProvider,
{
    /// Pipeline with caller-supplied ports.
    pub fn with_ports(reader: R, decoder: D, surfaces: S) -> Self {
        Self {
            reader,
            decoder,
            surfaces,
        }
    }

    /// Flexible entry point: target size, quality and output format all come
    /// from `options`. At least one of width/height must be set; a single
    /// dimension preserves the source aspect ratio, both are used verbatim.
    pub async fn resize(
        &self,
        blob: &ImageBlob,
        options: &ResizeOptions,
    ) -> Result<String, ResizeError> {
        validation::validate_with_options(blob, options)?;
        self.run(blob, options).await
    }

    /// Resize to an explicit width and height. Aspect ratio is not enforced;
    /// the caller may distort.
    pub async fn resize_exact(
        &self,
        blob: &ImageBlob,
        width: u32,
        height: u32,
        quality: Option<f32>,
        output_format: Option<OutputFormat>,
    ) -> Result<String, ResizeError> {
        validation::validate(blob, quality)?;
        let options = ResizeOptions {
            output_format: output_format.unwrap_or_default(),
            width: Some(width),
            height: Some(height),
            quality,
        };
        self.run(blob, &options).await
    }

    /// Aspect-preserving resize driven by the target width.
    pub async fn resize_to_width(
        &self,
        blob: &ImageBlob,
        width: u32,
        quality: Option<f32>,
        output_format: Option<OutputFormat>,
    ) -> Result<String, ResizeError> {
        validation::validate(blob, quality)?;
        let options = ResizeOptions {
            output_format: output_format.unwrap_or_default(),
            width: Some(width),
            height: None,
            quality,
        };
        self.run(blob, &options).await
    }

    /// Aspect-preserving resize driven by the target height.
    pub async fn resize_to_height(
        &self,
        blob: &ImageBlob,
        height: u32,
        quality: Option<f32>,
        output_format: Option<OutputFormat>,
    ) -> Result<String, ResizeError> {
        validation::validate(blob, quality)?;
        let options = ResizeOptions {
            output_format: output_format.unwrap_or_default(),
            width: None,
            height: Some(height),
            quality,
        };
        self.run(blob, &options).await
    }

    async fn run(&self, blob: &ImageBlob, options: &ResizeOptions) -> Result<String, ResizeError> {
        let base64 = self.reader.read_as_base64(blob).await?;
        let bitmap = self.decoder.decode(&base64).await?;
        let target = scale::resolve(options, bitmap.width(), bitmap.height())?;
        self.draw(&bitmap, target, options.quality, options.output_format)
    }

    fn draw(
        &self,
        bitmap: &SourceBitmap,
        target: Dimensions,
        quality: Option<f32>,
        format: OutputFormat,
    ) -> Result<String, ResizeError> {
        // First paint at intrinsic size, then resize the surface and repaint
        // scaled; some canvas backends only honor a destination resize after
        // an initial unscaled draw. Either way the surface ends at exactly
        // the target size.
        let mut surface = self.surfaces.acquire(bitmap.width(), bitmap.height())?;
        surface.draw(bitmap);

        let (width, height) = coerce(target);
        surface.resize(width, height);
        surface.draw(bitmap);

        let encoded = surface.encode(format, quality)?;
        info!(
            "Resized {}x{} -> {}x{} ({})",
            bitmap.width(),
            bitmap.height(),
            surface.width(),
            surface.height(),
            format.mime()
        );
        Ok(encoded)
    }
}

/// Integer coercion of the real-valued target, canvas style: truncate toward
/// zero, minimum one pixel.
fn coerce(target: Dimensions) -> (u32, u32) {
    ((target.width as u32).max(1), (target.height as u32).max(1))
}
