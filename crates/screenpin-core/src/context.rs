use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use screenpin_models::ApiBackend;

use crate::events::HostEventBus;

/// Accessor for the host state the capture extension depends on: the event
/// bus, the selected completion backend, and the image-inlining toggle.
///
/// The backend and the toggle are operator-editable mid-session, which is
/// why a session still starts when either looks wrong at start time.
pub struct HostContext {
    events: HostEventBus,
    backend: RwLock<ApiBackend>,
    image_inlining: AtomicBool,
}

impl HostContext {
    pub fn new(backend: ApiBackend) -> Self {
        Self {
            events: HostEventBus::default(),
            backend: RwLock::new(backend),
            image_inlining: AtomicBool::new(true),
        }
    }

    pub fn events(&self) -> &HostEventBus {
        &self.events
    }

    pub fn backend(&self) -> ApiBackend {
        *self.backend.read().unwrap()
    }

    pub fn set_backend(&self, backend: ApiBackend) {
        *self.backend.write().unwrap() = backend;
    }

    pub fn image_inlining_enabled(&self) -> bool {
        self.image_inlining.load(Ordering::Relaxed)
    }

    pub fn set_image_inlining(&self, enabled: bool) {
        self.image_inlining.store(enabled, Ordering::Relaxed);
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new(ApiBackend::ChatCompletions)
    }
}
