use tracing::{error, warn};

/// Non-blocking user notifications (the host's toast layer).
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
    fn warning(&self, message: &str);
}

/// Fallback notifier that downgrades everything to log lines.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        error!("{message}");
    }

    fn warning(&self, message: &str) {
        warn!("{message}");
    }
}

/// Two-state UI adapter: told `true` on every transition to Active and
/// `false` on every transition to Idle, never twice in a row for the same
/// state.
pub trait SessionIndicator: Send + Sync {
    fn session_changed(&self, active: bool);
}

/// Indicator for hosts without a visible control.
pub struct NoopIndicator;

impl SessionIndicator for NoopIndicator {
    fn session_changed(&self, _active: bool) {}
}
