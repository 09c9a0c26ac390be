use serde::{Deserialize, Serialize};

/// The host's currently selected completion backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiBackend {
    /// Chat-completions style API with multimodal message support.
    ChatCompletions,
    /// Plain text-completions API.
    TextCompletions,
    Kobold,
    Novel,
    Horde,
}

impl ApiBackend {
    /// Whether the backend is known to accept inline image attachments.
    ///
    /// Only the chat-completions API carries images through to the model;
    /// everywhere else an attached frame is silently ignored by the host.
    pub fn supports_inline_images(self) -> bool {
        matches!(self, ApiBackend::ChatCompletions)
    }
}
