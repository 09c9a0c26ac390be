//! Screen-share capture sessions for a chat host, with still-frame
//! attachment to outgoing user messages.
//!
//! A host constructs a [`SessionManager`] around its [`CaptureProvider`]
//! and [`HostContext`], wires the manager's [`FrameInterceptor`] into its
//! outgoing-message pipeline under [`INTERCEPTOR_ID`], and drives the
//! toggle control through [`SessionManager::toggle`]. Everything fallible
//! is reported through the [`Notifier`] seam and `tracing`; nothing
//! propagates back into the host.

pub mod context;
pub mod encode;
pub mod events;
pub mod intercept;
pub mod notify;
pub mod session;

pub use context::HostContext;
pub use encode::{EncodeError, DATA_URI_PREFIX, JPEG_QUALITY};
pub use events::{HostEvent, HostEventBus, HostEventKind};
pub use intercept::{FrameInterceptor, INTERCEPTOR_ID};
pub use notify::{LogNotifier, NoopIndicator, Notifier, SessionIndicator};
pub use session::{ScreenShareSession, SessionManager};

pub use screenpin_capture::CaptureProvider;
pub use screenpin_models::{ApiBackend, ChatMessage, MessageExtra};
