use std::sync::{Arc, Mutex};
use std::time::Duration;

use screenpin_capture::{NullCapture, NullPermission};
use screenpin_core::{
    ApiBackend, HostContext, HostEventKind, Notifier, SessionIndicator, SessionManager,
};

// ── Test harness ────────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingIndicator {
    states: Mutex<Vec<bool>>,
}

impl RecordingIndicator {
    fn states(&self) -> Vec<bool> {
        self.states.lock().unwrap().clone()
    }
}

impl SessionIndicator for RecordingIndicator {
    fn session_changed(&self, active: bool) {
        self.states.lock().unwrap().push(active);
    }
}

#[derive(Default)]
struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

struct Harness {
    provider: Arc<NullCapture>,
    context: Arc<HostContext>,
    indicator: Arc<RecordingIndicator>,
    notifier: Arc<RecordingNotifier>,
    manager: SessionManager<Arc<NullCapture>>,
}

impl Harness {
    fn new() -> Self {
        Self::with_provider(NullCapture::new())
    }

    fn with_provider(provider: NullCapture) -> Self {
        let provider = Arc::new(provider);
        let context = Arc::new(HostContext::default());
        let indicator = Arc::new(RecordingIndicator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let manager = SessionManager::new(Arc::clone(&provider), Arc::clone(&context))
            .with_indicator(indicator.clone())
            .with_notifier(notifier.clone());
        Self {
            provider,
            context,
            indicator,
            notifier,
            manager,
        }
    }

    /// Wait for the termination listeners to clear the slot.
    async fn wait_until_idle(&self) {
        for _ in 0..100 {
            if !self.manager.is_active().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("session never became idle");
    }
}

// ── Start ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn start_transitions_to_active_and_notifies_once() {
    let h = Harness::new();
    h.manager.start().await;

    assert!(h.manager.is_active().await);
    assert_eq!(h.indicator.states(), vec![true]);
    assert!(h.notifier.errors().is_empty());
    assert!(h.notifier.warnings().is_empty());
}

#[tokio::test]
async fn start_while_active_is_a_noop() {
    let h = Harness::new();
    h.manager.start().await;
    h.manager.start().await;

    assert!(h.manager.is_active().await);
    assert_eq!(h.indicator.states(), vec![true]);
}

#[tokio::test]
async fn denied_permission_reports_and_stays_idle() {
    let h = Harness::with_provider(NullCapture::with_permission(NullPermission::Deny));
    h.manager.start().await;

    assert!(!h.manager.is_active().await);
    assert_eq!(h.notifier.errors().len(), 1);
    assert!(h.indicator.states().is_empty());
}

#[tokio::test]
async fn unsupported_environment_reports_and_stays_idle() {
    let h = Harness::with_provider(NullCapture::with_permission(NullPermission::Unsupported));
    h.manager.start().await;

    assert!(!h.manager.is_active().await);
    assert_eq!(h.notifier.errors().len(), 1);
}

#[tokio::test]
async fn unsupported_backend_warns_but_session_starts() {
    let h = Harness::new();
    h.context.set_backend(ApiBackend::TextCompletions);
    h.manager.start().await;

    assert!(h.manager.is_active().await);
    assert_eq!(h.notifier.warnings().len(), 1);
    assert!(h.notifier.errors().is_empty());
}

#[tokio::test]
async fn disabled_image_inlining_warns_but_session_starts() {
    let h = Harness::new();
    h.context.set_image_inlining(false);
    h.manager.start().await;

    assert!(h.manager.is_active().await);
    assert_eq!(h.notifier.warnings().len(), 1);
}

// ── Stop and external termination ───────────────────────────────────────────

#[tokio::test]
async fn stop_clears_the_slot_and_stops_the_track() {
    let h = Harness::new();
    h.manager.start().await;
    h.manager.stop().await;

    assert!(!h.manager.is_active().await);
    assert!(h.provider.last_track().unwrap().is_ended());
    assert_eq!(h.indicator.states(), vec![true, false]);
}

#[tokio::test]
async fn stop_twice_notifies_only_on_the_first_transition() {
    let h = Harness::new();
    h.manager.start().await;
    h.manager.stop().await;
    h.manager.stop().await;

    assert_eq!(h.indicator.states(), vec![true, false]);
}

#[tokio::test]
async fn stop_when_idle_is_a_noop() {
    let h = Harness::new();
    h.manager.stop().await;

    assert!(!h.manager.is_active().await);
    assert!(h.indicator.states().is_empty());
}

#[tokio::test]
async fn track_ended_externally_clears_the_slot() {
    let h = Harness::new();
    h.manager.start().await;

    // The user revokes sharing from outside the host.
    h.provider.last_track().unwrap().stop();
    h.wait_until_idle().await;

    assert_eq!(h.indicator.states(), vec![true, false]);
}

#[tokio::test]
async fn chat_changed_event_clears_the_slot_and_stops_the_track() {
    let h = Harness::new();
    h.manager.start().await;

    h.context.events().dispatch(HostEventKind::ChatChanged);
    h.wait_until_idle().await;

    assert!(h.provider.last_track().unwrap().is_ended());
    assert_eq!(h.indicator.states(), vec![true, false]);
}

#[tokio::test]
async fn termination_after_stop_has_no_further_effect() {
    let h = Harness::new();
    h.manager.start().await;
    h.manager.stop().await;

    h.context.events().dispatch(HostEventKind::ChatChanged);
    h.provider.last_track().unwrap().stop();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(h.indicator.states(), vec![true, false]);
}

#[tokio::test]
async fn listeners_are_rearmed_on_each_start() {
    let h = Harness::new();
    h.manager.start().await;
    h.manager.stop().await;
    h.manager.start().await;

    // The chat-changed subscription from the first session must be gone;
    // this dispatch should tear down only the second session, once.
    h.context.events().dispatch(HostEventKind::ChatChanged);
    h.wait_until_idle().await;

    assert_eq!(h.indicator.states(), vec![true, false, true, false]);
}

// ── Toggle control ──────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_follows_the_two_state_contract() {
    let h = Harness::new();

    h.manager.toggle().await;
    assert!(h.manager.is_active().await);

    h.manager.toggle().await;
    assert!(!h.manager.is_active().await);

    assert_eq!(h.indicator.states(), vec![true, false]);
}
