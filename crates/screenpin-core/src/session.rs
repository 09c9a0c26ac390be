//! Screen-share session lifecycle.
//!
//! [`SessionManager`] owns the single session slot. A session is created by
//! [`start`](SessionManager::start) and torn down by exactly one of three
//! equivalent triggers: an explicit [`stop`](SessionManager::stop), the
//! video track's ended signal, or the host's chat-changed event. The two
//! external triggers are watched by listener tasks whose handles live
//! inside the slot, so clearing the slot also cancels whichever listener
//! has not fired.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use screenpin_capture::{
    CaptureConstraints, CaptureError, CaptureProvider, CaptureStream, FrameGrabber, VideoTrack,
};

use crate::context::HostContext;
use crate::events::{HostEventBus, HostEventKind};
use crate::notify::{LogNotifier, NoopIndicator, Notifier, SessionIndicator};

/// The active session bundle: a capture stream, the frame grabber bound to
/// its video track, and the track itself.
pub struct ScreenShareSession {
    pub stream: CaptureStream,
    pub grabber: FrameGrabber,
    pub track: VideoTrack,
}

/// Slot occupancy: the session plus its teardown listeners.
struct ActiveSession {
    session: ScreenShareSession,
    generation: u64,
    /// Ended-signal and chat-changed listeners, cancelled when the slot
    /// entry drops.
    _listeners: [ListenerGuard; 2],
}

/// Abort-on-drop handle to a spawned listener task.
struct ListenerGuard(JoinHandle<()>);

impl ListenerGuard {
    fn spawn(fut: impl std::future::Future<Output = ()> + Send + 'static) -> Self {
        Self(tokio::spawn(fut))
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// The single shared session slot, written by the manager and transiently
/// read by the interceptor.
pub(crate) struct SessionSlot {
    slot: RwLock<Option<ActiveSession>>,
    generation: AtomicU64,
}

/// What the interceptor captures from the slot before it starts grabbing.
pub(crate) struct SessionSnapshot {
    pub generation: u64,
    pub active: bool,
    pub grabber: FrameGrabber,
}

impl SessionSlot {
    fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub(crate) async fn snapshot(&self) -> Option<SessionSnapshot> {
        let guard = self.slot.read().await;
        guard.as_ref().map(|active| SessionSnapshot {
            generation: active.generation,
            active: active.session.stream.is_active(),
            grabber: active.session.grabber.clone(),
        })
    }

    /// Whether the slot still holds the same, still-active session the
    /// given generation stamp came from.
    pub(crate) async fn is_current_and_active(&self, generation: u64) -> bool {
        let guard = self.slot.read().await;
        guard
            .as_ref()
            .is_some_and(|a| a.generation == generation && a.session.stream.is_active())
    }
}

/// Owns the session slot and drives the Idle ↔ Active state machine.
pub struct SessionManager<P: CaptureProvider> {
    provider: P,
    context: Arc<HostContext>,
    notifier: Arc<dyn Notifier>,
    indicator: Arc<dyn SessionIndicator>,
    constraints: CaptureConstraints,
    slot: Arc<SessionSlot>,
}

impl<P: CaptureProvider> SessionManager<P> {
    pub fn new(provider: P, context: Arc<HostContext>) -> Self {
        Self {
            provider,
            context,
            notifier: Arc::new(LogNotifier),
            indicator: Arc::new(NoopIndicator),
            constraints: CaptureConstraints::video(),
            slot: Arc::new(SessionSlot::new()),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_indicator(mut self, indicator: Arc<dyn SessionIndicator>) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn with_constraints(mut self, constraints: CaptureConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// An interceptor sharing this manager's slot, for the host to invoke
    /// on every outgoing message batch.
    pub fn interceptor(&self) -> crate::intercept::FrameInterceptor {
        crate::intercept::FrameInterceptor::new(Arc::clone(&self.slot))
    }

    pub async fn is_active(&self) -> bool {
        self.slot.slot.read().await.is_some()
    }

    /// Start a screen-share session.
    ///
    /// No-op when a session is already active. Acquisition failures are
    /// reported through the notifier and logged; they never propagate.
    /// An unsupported backend or a disabled image-inlining toggle only
    /// warns, since the operator may fix either mid-session.
    pub async fn start(&self) {
        if self.is_active().await {
            debug!("start: session already active");
            return;
        }

        let stream = match self.provider.acquire(self.constraints.clone()).await {
            Ok(stream) => stream,
            Err(err) => {
                error!(error = %err, "failed to start screen sharing");
                self.notifier.error(&start_failure_message(&err));
                return;
            }
        };

        let Some(track) = stream.first_video_track() else {
            error!("capture stream has no video track");
            self.notifier
                .error(&start_failure_message(&CaptureError::NoVideoTrack));
            return;
        };

        let backend = self.context.backend();
        if !backend.supports_inline_images() {
            warn!(?backend, "selected backend does not support inline images");
            self.notifier.warning(
                "The selected backend does not support inline images. \
                 Captured frames will be ignored until it is switched.",
            );
        }
        if !self.context.image_inlining_enabled() {
            warn!("image inlining is turned off");
            self.notifier
                .warning("Image inlining is turned off. The screen share feature will not work.");
        }

        let generation = self.slot.generation.fetch_add(1, Ordering::Relaxed) + 1;

        // Both listeners are re-armed on every start and fire at most once.
        let ended_listener = {
            let slot = Arc::clone(&self.slot);
            let indicator = Arc::clone(&self.indicator);
            let track = track.clone();
            ListenerGuard::spawn(async move {
                track.ended().await;
                info!("video track ended, stopping session");
                // The track already ended on its own; do not stop it again.
                teardown(&slot, indicator.as_ref(), Some(generation), false).await;
            })
        };
        let chat_listener = {
            let slot = Arc::clone(&self.slot);
            let indicator = Arc::clone(&self.indicator);
            // Subscribe here, not inside the task, so an event raised right
            // after start() returns cannot slip past an unpolled listener.
            let chat_events = self.context.events().subscribe();
            ListenerGuard::spawn(async move {
                HostEventBus::next_of_kind(chat_events, HostEventKind::ChatChanged).await;
                info!("chat context changed, stopping session");
                teardown(&slot, indicator.as_ref(), Some(generation), true).await;
            })
        };

        let grabber = FrameGrabber::new(track.clone());
        let session = ScreenShareSession {
            stream,
            grabber,
            track,
        };

        {
            let mut guard = self.slot.slot.write().await;
            if guard.is_some() {
                // A concurrent start won the slot while we awaited the
                // permission prompt; release this capture grant.
                warn!("start: slot already occupied, discarding new capture");
                session.track.stop();
                return;
            }
            *guard = Some(ActiveSession {
                session,
                generation,
                _listeners: [ended_listener, chat_listener],
            });
        }

        info!(generation, "screen sharing started");
        self.indicator.session_changed(true);
    }

    /// Stop the active session. Safe to call when Idle (pure no-op, no
    /// duplicate indicator notification).
    pub async fn stop(&self) {
        teardown(&self.slot, self.indicator.as_ref(), None, true).await;
    }

    /// The toggle control's click handler: stop if Active, start if Idle.
    pub async fn toggle(&self) {
        if self.is_active().await {
            self.stop().await;
        } else {
            self.start().await;
        }
    }
}

/// Shared clear-and-notify sequence behind all three termination triggers.
///
/// `generation` filters listener-driven teardowns: a listener armed for a
/// session that has already been replaced must not clear its successor.
/// Past the `take` there is no await, so a listener tearing down its own
/// session (and thereby aborting its own guard) still runs to completion.
async fn teardown(
    slot: &SessionSlot,
    indicator: &dyn SessionIndicator,
    generation: Option<u64>,
    stop_track: bool,
) {
    let mut guard = slot.slot.write().await;
    let Some(active) = guard.take() else {
        debug!("teardown: no active session");
        return;
    };
    if generation.is_some_and(|g| active.generation != g) {
        debug!("teardown: slot holds a newer session, ignoring stale trigger");
        *guard = Some(active);
        return;
    }
    drop(guard);

    if stop_track {
        active.session.track.stop();
    }
    info!("screen sharing stopped");
    indicator.session_changed(false);
}

fn start_failure_message(err: &CaptureError) -> String {
    match err {
        CaptureError::Unsupported => {
            "Screen capture is not supported in this environment.".to_string()
        }
        CaptureError::PermissionDenied => {
            "Screen sharing permission was denied. Please try again.".to_string()
        }
        _ => "Failed to start screen sharing. Check the log for details.".to_string(),
    }
}
