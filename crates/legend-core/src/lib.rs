pub mod capability;
pub mod commands;
pub mod conversation;
pub mod error;
pub mod notify;
pub mod resolver;
pub mod session;

pub use capability::{Acquisition, CapabilityRegistry, CapabilityState, InitReport, TranslatorKey};
pub use conversation::{ConversationStore, Message, MessageDraft, Translation};
pub use error::{Capability, CommandError, InitError};
pub use notify::Notifier;
pub use session::Session;

#[cfg(test)]
mod tests;
