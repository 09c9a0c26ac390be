use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("screen capture is not supported in this environment")]
    Unsupported,
    #[error("screen capture permission was denied or cancelled")]
    PermissionDenied,
    #[error("capture provider returned no stream")]
    NoStream,
    #[error("capture stream has no video track")]
    NoVideoTrack,
    #[error("video track has ended")]
    TrackEnded,
    #[error("frame grab failed: {0}")]
    Frame(String),
}
