//! Screen-capture primitives behind a provider seam.
//!
//! The host environment supplies a [`CaptureProvider`]; everything above
//! this crate only sees [`CaptureStream`], [`VideoTrack`] and
//! [`FrameGrabber`] handles. [`NullCapture`] is a zero-dependency provider
//! that serves synthetic frames, useful for tests and development.

pub mod constraints;
pub mod error;
pub mod null;
pub mod provider;
pub mod track;

pub use constraints::{quality_presets, CaptureConstraints, QualityPreset};
pub use error::CaptureError;
pub use null::{NullCapture, NullPermission};
pub use provider::CaptureProvider;
pub use track::{CaptureStream, Frame, FrameGrabber, FrameRequest, VideoTrack};
