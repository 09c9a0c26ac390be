use std::sync::Arc;

use crate::constraints::CaptureConstraints;
use crate::error::CaptureError;
use crate::track::CaptureStream;

/// Environment seam for acquiring a screen-capture stream.
///
/// `acquire` covers the whole permission flow and may wait indefinitely on
/// the user; callers impose no timeout on it.
#[allow(async_fn_in_trait)]
pub trait CaptureProvider: Send + Sync {
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<CaptureStream, CaptureError>;
}

impl<P: CaptureProvider> CaptureProvider for Arc<P> {
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<CaptureStream, CaptureError> {
        (**self).acquire(constraints).await
    }
}
