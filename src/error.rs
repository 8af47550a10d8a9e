use thiserror::Error;

/// Unified error type for the resize pipeline.
///
/// Each variant corresponds to one failure cause; `Display` produces the
/// human-readable diagnostic callers surface to users.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResizeError {
    /// Input rejected before any I/O begins. Multiple violations are
    /// accumulated into one joined message.
    #[error("{0}")]
    InvalidInput(String),

    /// The blob read was cancelled by the environment.
    #[error("image read aborted")]
    ReadAborted,

    /// The blob read raised an I/O error.
    #[error("failed to read image data: {0}")]
    ReadFailed(String),

    /// The blob read completed but produced no data.
    #[error("image read produced no data")]
    ReadEmpty,

    /// The bitmap decode was cancelled by the environment.
    #[error("image decode aborted")]
    DecodeAborted,

    /// The bitmap decode failed (malformed or unsupported encoding).
    #[error("failed to decode image: {0}")]
    DecodeFailed(String),

    /// No drawing surface could be obtained from the environment.
    #[error("drawing context not available")]
    SurfaceUnavailable,

    /// The surface contents could not be serialized to the output format.
    #[error("failed to encode image: {0}")]
    EncodeFailed(String),
}

impl From<ResizeError> for String {
    fn from(err: ResizeError) -> Self {
        err.to_string()
    }
}
