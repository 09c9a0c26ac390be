//! Stream, track and frame-grab handles.
//!
//! A [`VideoTrack`] is a cheap cloneable handle. Frame pulls travel over an
//! internal request channel to whatever task the provider runs to serve
//! them; the ended signal is a `watch` flag shared by every clone, so
//! `stop()` from any handle ends the track for all of them.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use uuid::Uuid;

use crate::error::CaptureError;

/// One still image pulled from a live track. RGBA8, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// Byte length a well-formed RGBA8 buffer must have.
    pub fn expected_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }
}

/// A pending one-shot frame pull, answered by the provider's serving task.
pub struct FrameRequest {
    pub reply: oneshot::Sender<Result<Frame, CaptureError>>,
}

struct TrackInner {
    id: String,
    label: String,
    frames: mpsc::Sender<FrameRequest>,
    ended: watch::Sender<bool>,
}

/// Handle to one video track of a capture stream.
#[derive(Clone)]
pub struct VideoTrack {
    inner: Arc<TrackInner>,
}

impl VideoTrack {
    /// Create a track and the request receiver its provider serves.
    ///
    /// The provider must stop answering (and may drop the receiver) once
    /// the ended flag flips; in-flight requests then fail with
    /// [`CaptureError::TrackEnded`] on the grabber side.
    pub fn new(label: impl Into<String>) -> (Self, mpsc::Receiver<FrameRequest>) {
        let (frames, requests) = mpsc::channel(8);
        let (ended, _) = watch::channel(false);
        let track = Self {
            inner: Arc::new(TrackInner {
                id: Uuid::new_v4().to_string(),
                label: label.into(),
                frames,
                ended,
            }),
        };
        (track, requests)
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    pub fn is_ended(&self) -> bool {
        *self.inner.ended.borrow()
    }

    /// Stop the track. Idempotent; stopping an ended track is a no-op.
    pub fn stop(&self) {
        self.inner.ended.send_replace(true);
    }

    /// Wait until the track ends (via [`stop`](Self::stop) from any handle
    /// or the provider flipping the flag). Returns immediately if it
    /// already has.
    pub async fn ended(&self) {
        let mut rx = self.inner.ended.subscribe();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Sender gone means no frame will ever arrive again.
                return;
            }
        }
    }

    async fn request_frame(&self) -> Result<Frame, CaptureError> {
        if self.is_ended() {
            return Err(CaptureError::TrackEnded);
        }
        let (reply, rx) = oneshot::channel();
        self.inner
            .frames
            .send(FrameRequest { reply })
            .await
            .map_err(|_| CaptureError::TrackEnded)?;
        rx.await.map_err(|_| CaptureError::TrackEnded)?
    }
}

/// One-shot still-image puller, bound 1:1 to a single track.
#[derive(Clone)]
pub struct FrameGrabber {
    track: VideoTrack,
}

impl FrameGrabber {
    pub fn new(track: VideoTrack) -> Self {
        Self { track }
    }

    pub fn track(&self) -> &VideoTrack {
        &self.track
    }

    /// Pull exactly one still frame from the bound track.
    pub async fn grab_frame(&self) -> Result<Frame, CaptureError> {
        self.track.request_frame().await
    }
}

/// An acquired capture stream: an id plus its video tracks.
pub struct CaptureStream {
    id: String,
    tracks: Vec<VideoTrack>,
}

impl CaptureStream {
    pub fn new(tracks: Vec<VideoTrack>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tracks,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn video_tracks(&self) -> &[VideoTrack] {
        &self.tracks
    }

    pub fn first_video_track(&self) -> Option<VideoTrack> {
        self.tracks.first().cloned()
    }

    /// A stream is active while at least one of its tracks is still live.
    pub fn is_active(&self) -> bool {
        self.tracks.iter().any(|t| !t.is_ended())
    }
}
