//! Input policy checks, run before any asynchronous work.
//!
//! All applicable violations are collected and reported together in one
//! joined message, so a caller sees every problem at once instead of fixing
//! them one round-trip at a time.

use crate::error::ResizeError;
use crate::types::{ImageBlob, ResizeOptions};

/// Media type prefix every acceptable blob must declare.
const IMAGE_TYPE_PREFIX: &str = "image/";

/// Inclusive bounds for the encoder quality hint.
pub const QUALITY_MIN: f32 = 0.1;
pub const QUALITY_MAX: f32 = 1.0;

/// Separator between accumulated violation messages.
const VIOLATION_SEPARATOR: &str = "; ";

/// Validate a blob and optional quality hint.
///
/// Used by the fixed-dimension entry points, where the target size is given
/// directly and cannot be missing.
pub fn validate(blob: &ImageBlob, quality: Option<f32>) -> Result<(), ResizeError> {
    let mut violations = Vec::new();
    collect_blob_violations(blob, quality, &mut violations);
    finish(violations)
}

/// Validate a blob against a full options object.
///
/// In addition to the blob checks, at least one target dimension must be
/// present for the size to be resolvable.
pub fn validate_with_options(
    blob: &ImageBlob,
    options: &ResizeOptions,
) -> Result<(), ResizeError> {
    let mut violations = Vec::new();
    collect_blob_violations(blob, options.quality, &mut violations);

    if options.width.is_none() && options.height.is_none() {
        violations.push("either width or height must be set".to_string());
    }

    finish(violations)
}

fn collect_blob_violations(blob: &ImageBlob, quality: Option<f32>, violations: &mut Vec<String>) {
    if !blob.media_type().starts_with(IMAGE_TYPE_PREFIX) {
        violations.push(format!("invalid image type: {}", blob.media_type()));
    }

    if let Some(quality) = quality {
        if !(QUALITY_MIN..=QUALITY_MAX).contains(&quality) {
            violations.push(format!(
                "invalid quality: {} (expected {} to {})",
                quality, QUALITY_MIN, QUALITY_MAX
            ));
        }
    }
}

fn finish(violations: Vec<String>) -> Result<(), ResizeError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ResizeError::InvalidInput(
            violations.join(VIOLATION_SEPARATOR),
        ))
    }
}
