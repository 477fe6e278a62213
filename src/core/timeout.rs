//! Per-call deadline for backend requests

use std::time::Duration;
use tracing::warn;

use crate::core::client::TranslateBackend;
use crate::core::errors::{Result, TranslationError};

/// Race one backend call against `deadline`.
///
/// When the deadline wins the pending call is dropped; the backend gets no
/// further notice, so any request already on the wire may still complete
/// remotely.
pub async fn translate_with_timeout(
    backend: &dyn TranslateBackend,
    text: &str,
    from: &str,
    to: &str,
    deadline: Duration,
) -> Result<String> {
    match tokio::time::timeout(deadline, backend.translate(text, from, to)).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Translation abandoned after {:?}", deadline);
            Err(TranslationError::TimeoutError { after: deadline })
        }
    }
}
