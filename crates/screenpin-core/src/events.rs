use tokio::sync::broadcast;

/// Event kinds the host raises on its bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEventKind {
    /// The active chat context was switched or reloaded.
    ChatChanged,
    /// Host settings were updated.
    SettingsUpdated,
    /// An outgoing message batch finished sending.
    MessageSent,
}

#[derive(Debug, Clone)]
pub struct HostEvent {
    pub kind: HostEventKind,
    pub payload: serde_json::Value,
}

/// Broadcast-based event bus for host-side notifications.
#[derive(Clone)]
pub struct HostEventBus {
    sender: broadcast::Sender<HostEvent>,
}

impl HostEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: HostEvent) {
        // Ignore error if no receivers
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.sender.subscribe()
    }

    /// Helper: publish a kind with an empty payload.
    pub fn dispatch(&self, kind: HostEventKind) {
        self.publish(HostEvent {
            kind,
            payload: serde_json::Value::Null,
        });
    }

    /// One-shot subscription: resolve on the first event of `kind`, then
    /// drop the subscription. Also resolves if the bus shuts down, so a
    /// waiter never outlives the host.
    pub async fn wait_for(&self, kind: HostEventKind) {
        Self::next_of_kind(self.subscribe(), kind).await;
    }

    /// One-shot wait on an existing subscription. Taking the receiver
    /// up front lets a caller arm the subscription synchronously and defer
    /// only the waiting to a task.
    pub async fn next_of_kind(mut rx: broadcast::Receiver<HostEvent>, kind: HostEventKind) {
        loop {
            match rx.recv().await {
                Ok(event) if event.kind == kind => return,
                Ok(_) => continue,
                // A lagged receiver may have dropped the event it was
                // waiting for; resubscribing cannot recover it, so treat
                // the gap as a miss and keep listening.
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }
}

impl Default for HostEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
