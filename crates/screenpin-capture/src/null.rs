//! In-process capture provider serving synthetic frames.
//!
//! [`NullCapture`] stands in for a real screen-capture backend on platforms
//! and test rigs where none is available. Each acquired stream carries one
//! video track whose frames are deterministic gradients tagged with a frame
//! counter, so consumers can tell successive grabs apart.

use std::sync::Mutex;

use tracing::debug;

use crate::constraints::CaptureConstraints;
use crate::error::CaptureError;
use crate::provider::CaptureProvider;
use crate::track::{CaptureStream, Frame, VideoTrack};

const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 360;

/// Simulated permission outcome for the next `acquire` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPermission {
    #[default]
    Grant,
    Deny,
    Unsupported,
}

pub struct NullCapture {
    permission: NullPermission,
    /// Most recently acquired track, kept so tests can end it externally
    /// (the equivalent of revoking sharing from the browser chrome).
    last_track: Mutex<Option<VideoTrack>>,
}

impl NullCapture {
    pub fn new() -> Self {
        Self {
            permission: NullPermission::Grant,
            last_track: Mutex::new(None),
        }
    }

    /// A provider whose permission prompt always fails the given way.
    pub fn with_permission(permission: NullPermission) -> Self {
        Self {
            permission,
            last_track: Mutex::new(None),
        }
    }

    /// Handle to the track of the most recent acquire, if any.
    pub fn last_track(&self) -> Option<VideoTrack> {
        self.last_track.lock().unwrap().clone()
    }
}

impl Default for NullCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureProvider for NullCapture {
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<CaptureStream, CaptureError> {
        match self.permission {
            NullPermission::Grant => {}
            NullPermission::Deny => return Err(CaptureError::PermissionDenied),
            NullPermission::Unsupported => return Err(CaptureError::Unsupported),
        }

        let width = constraints.width.unwrap_or(DEFAULT_WIDTH);
        let height = constraints.height.unwrap_or(DEFAULT_HEIGHT);

        let (track, mut requests) = VideoTrack::new("null-screen");
        debug!(track = track.id(), width, height, "null capture acquired");

        let serving = track.clone();
        tokio::spawn(async move {
            let mut frame_count: u64 = 0;
            loop {
                tokio::select! {
                    _ = serving.ended() => break,
                    req = requests.recv() => match req {
                        Some(req) => {
                            let frame = gradient_frame(width, height, frame_count);
                            frame_count += 1;
                            let _ = req.reply.send(Ok(frame));
                        }
                        None => break,
                    },
                }
            }
        });

        *self.last_track.lock().unwrap() = Some(track.clone());
        Ok(CaptureStream::new(vec![track]))
    }
}

/// Deterministic RGBA gradient; the counter shifts the pattern per frame.
fn gradient_frame(width: u32, height: u32, frame_count: u64) -> Frame {
    let mut data = Vec::with_capacity(Frame::expected_len(width, height));
    let shift = (frame_count % 256) as u8;
    for y in 0..height {
        for x in 0..width {
            data.push((x % 256) as u8 ^ shift);
            data.push((y % 256) as u8);
            data.push(shift);
            data.push(0xff);
        }
    }
    Frame {
        width,
        height,
        data,
    }
}
