//! Blob reading: binary payload to base64 text.

use std::future::Future;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::error::ResizeError;
use crate::types::ImageBlob;

/// Capability port for turning a binary blob into base64 text.
///
/// Exactly one of {success, `ReadAborted`, `ReadFailed`/`ReadEmpty`} per
/// invocation; abort and error are distinct so callers can tell
/// cancellation from failure.
pub trait BlobReader {
    fn read_as_base64(
        &self,
        blob: &ImageBlob,
    ) -> impl Future<Output = Result<String, ResizeError>> + Send;
}

/// Default reader backed by the `base64` crate.
///
/// Encoding a large blob is CPU-bound, so the work runs on a blocking task.
/// This reader never aborts on its own; `ReadAborted` is reserved for
/// cancellable environment-backed readers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Reader;

impl BlobReader for Base64Reader {
    async fn read_as_base64(&self, blob: &ImageBlob) -> Result<String, ResizeError> {
        if blob.bytes().is_empty() {
            return Err(ResizeError::ReadEmpty);
        }

        let bytes = blob.bytes().to_vec();
        let byte_count = bytes.len();
        let encoded = tokio::task::spawn_blocking(move || STANDARD.encode(bytes))
            .await
            .map_err(|e| ResizeError::ReadFailed(format!("read task panicked: {}", e)))?;

        debug!("Read {} blob bytes into {} base64 chars", byte_count, encoded.len());
        Ok(encoded)
    }
}
