//! Outgoing-message interception.
//!
//! The host invokes [`FrameInterceptor::intercept`] once per outgoing
//! batch, passing the full ordered chat history. When a screen-share
//! session is live and the newest message is a bare user message, one
//! still frame is captured, encoded and attached to a copy of that
//! message; everything else is a silent no-op.

use std::sync::Arc;

use tracing::{debug, info, warn};

use screenpin_models::ChatMessage;

use crate::encode::frame_to_data_uri;
use crate::session::SessionSlot;

/// Well-known name under which hosts register the interceptor entry point.
pub const INTERCEPTOR_ID: &str = "screen_share_frame_interceptor";

pub struct FrameInterceptor {
    slot: Arc<SessionSlot>,
}

impl FrameInterceptor {
    pub(crate) fn new(slot: Arc<SessionSlot>) -> Self {
        Self { slot }
    }

    /// Attach one captured frame to the latest user message, if every
    /// precondition holds; otherwise leave the batch untouched.
    ///
    /// The last message is never mutated in place, since it may still be
    /// reachable from persisted history: a deep copy is staged and
    /// swapped into the batch only after the whole pipeline succeeds.
    /// Failures are logged and swallowed; the session stays alive for the
    /// next attempt.
    pub async fn intercept(&self, chat: &mut Vec<ChatMessage>) {
        if chat.is_empty() {
            debug!("intercept: chat is empty");
            return;
        }
        let Some(snapshot) = self.slot.snapshot().await else {
            debug!("intercept: no active session");
            return;
        };
        if !snapshot.active {
            // Stale slot: the track ended but a termination listener has
            // not cleared it yet. Non-fatal.
            warn!("intercept: stream is not active");
            return;
        }

        let Some(last) = chat.last() else {
            return;
        };
        if !last.is_user {
            debug!("intercept: last message is not from the user");
            return;
        }
        if last.has_image() {
            debug!("intercept: message already has an image");
            return;
        }
        let mut staged = last.clone();

        let frame = match snapshot.grabber.grab_frame().await {
            Ok(frame) => frame,
            Err(err) => {
                warn!(error = %err, "frame grab failed, leaving batch unmodified");
                return;
            }
        };
        debug!(
            width = frame.width,
            height = frame.height,
            "encoding captured frame"
        );
        let image = match frame_to_data_uri(frame) {
            Ok(uri) => uri,
            Err(err) => {
                warn!(error = %err, "frame encode failed, leaving batch unmodified");
                return;
            }
        };

        // The grab and encode suspended; the session may have ended or
        // been superseded in the meantime. Re-read the slot and check the
        // generation stamp before touching the batch.
        if !self.slot.is_current_and_active(snapshot.generation).await {
            debug!("intercept: session ended or superseded mid-capture, frame discarded");
            return;
        }

        staged.extra_mut().image = Some(image);
        let last_index = chat.len() - 1;
        chat[last_index] = staged;
        info!("attached captured frame to the outgoing message");
    }
}
