pub mod backend;
pub mod message;

pub use backend::ApiBackend;
pub use message::{ChatMessage, MessageExtra};
