use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A single entry in the host's chat history.
///
/// The host owns these; the interceptor only ever works on an owned copy.
/// `Clone` is a deep copy; every field is owned data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name of the author.
    pub name: String,
    /// `true` when the human operator authored the message.
    pub is_user: bool,
    pub send_date: DateTime<Utc>,
    pub content: String,
    /// Side-channel payloads attached to the message, absent until needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<MessageExtra>,
}

/// Per-message extension-data container.
///
/// Auxiliary payloads ride here without touching the message text. The
/// `image` key is the well-known slot for an inline-encoded still frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageExtra {
    /// Inline-encoded compressed image (a `data:` URI), if one is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Host-defined keys this crate does not interpret.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl ChatMessage {
    pub fn user(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_user: true,
            send_date: Utc::now(),
            content: content.into(),
            extra: None,
        }
    }

    pub fn assistant(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            is_user: false,
            ..Self::user(name, content)
        }
    }

    /// The extension-data container, created on first use.
    pub fn extra_mut(&mut self) -> &mut MessageExtra {
        self.extra.get_or_insert_with(MessageExtra::default)
    }

    /// Whether an image is already attached to this message.
    pub fn has_image(&self) -> bool {
        self.extra
            .as_ref()
            .is_some_and(|e| e.image.as_deref().is_some_and(|i| !i.is_empty()))
    }
}
