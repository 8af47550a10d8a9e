//! Target-size resolution policy.

use tracing::debug;

use crate::error::ResizeError;
use crate::types::{Dimensions, ResizeOptions};

/// Resolve the target size from partially specified options.
///
/// Both dimensions given are used verbatim (the caller may distort); a
/// single dimension scales the other so the width/height ratio matches the
/// source. Results stay real-valued — integer coercion belongs to the
/// drawing surface.
pub fn resolve(
    options: &ResizeOptions,
    intrinsic_width: u32,
    intrinsic_height: u32,
) -> Result<Dimensions, ResizeError> {
    let resolved = match (options.width, options.height) {
        (Some(width), Some(height)) => Dimensions {
            width: width as f64,
            height: height as f64,
        },
        (Some(width), None) => Dimensions {
            width: width as f64,
            height: intrinsic_height as f64 / intrinsic_width as f64 * width as f64,
        },
        (None, Some(height)) => Dimensions {
            width: intrinsic_width as f64 / intrinsic_height as f64 * height as f64,
            height: height as f64,
        },
        // Validation rejects this before the pipeline runs.
        (None, None) => {
            return Err(ResizeError::InvalidInput("unknown dimensions".to_string()));
        }
    };

    debug!(
        "Resolved target {}x{} from intrinsic {}x{}",
        resolved.width, resolved.height, intrinsic_width, intrinsic_height
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(width: Option<u32>, height: Option<u32>) -> ResizeOptions {
        ResizeOptions {
            width,
            height,
            ..Default::default()
        }
    }

    #[test]
    fn test_both_dimensions_used_verbatim() {
        // No aspect correction even when the request distorts the source.
        let resolved = resolve(&options(Some(300), Some(300)), 1000, 500).unwrap();
        assert_eq!(resolved.width, 300.0);
        assert_eq!(resolved.height, 300.0);
    }

    #[test]
    fn test_width_only_preserves_aspect_ratio() {
        let resolved = resolve(&options(Some(400), None), 1000, 500).unwrap();
        assert_eq!(resolved.width, 400.0);
        assert_eq!(resolved.height, 200.0);
    }

    #[test]
    fn test_height_only_preserves_aspect_ratio() {
        let resolved = resolve(&options(None, Some(200)), 1000, 500).unwrap();
        assert_eq!(resolved.width, 400.0);
        assert_eq!(resolved.height, 200.0);
    }

    #[test]
    fn test_fractional_results_pass_through_unrounded() {
        let resolved = resolve(&options(Some(333), None), 1000, 500).unwrap();
        assert_eq!(resolved.height, 166.5);

        let resolved = resolve(&options(None, Some(100)), 3, 7).unwrap();
        assert_eq!(resolved.width, 3.0 / 7.0 * 100.0);
    }

    #[test]
    fn test_scale_matches_exact_ratio_formula() {
        let (w0, h0) = (1217_u32, 731_u32);
        let requested = 379_u32;
        let resolved = resolve(&options(Some(requested), None), w0, h0).unwrap();
        assert_eq!(resolved.height, h0 as f64 / w0 as f64 * requested as f64);
    }

    #[test]
    fn test_no_dimensions_is_an_error() {
        let err = resolve(&options(None, None), 1000, 500).unwrap_err();
        assert!(String::from(err).contains("unknown dimensions"));
    }
}
