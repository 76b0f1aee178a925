use legend_types::{DetectedLanguage, MessageId, Role};
use tokio::sync::RwLock;

use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    /// Original text, never modified after append
    pub text: String,
    pub role: Role,
    pub detected_language: DetectedLanguage,
    pub translation: Option<Translation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub visible: bool,
}

/// A message before it gets its id
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub text: String,
    pub role: Role,
    pub detected_language: DetectedLanguage,
}

impl MessageDraft {
    pub fn user(text: String, detected_language: DetectedLanguage) -> Self {
        Self {
            text,
            role: Role::User,
            detected_language,
        }
    }

    pub fn system(text: String, detected_language: DetectedLanguage) -> Self {
        Self {
            text,
            role: Role::System,
            detected_language,
        }
    }
}

/// Append-only message log. Ids are sequence positions, so messages are
/// never removed or reordered.
#[derive(Default)]
pub struct ConversationStore {
    pub(crate) messages: RwLock<Vec<Message>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, draft: MessageDraft) -> MessageId {
        let mut messages = self.messages.write().await;
        push(&mut messages, draft)
    }

    pub async fn append_user(&self, text: String, detected_language: DetectedLanguage) -> MessageId {
        self.append(MessageDraft::user(text, detected_language)).await
    }

    pub async fn append_system(
        &self,
        text: String,
        detected_language: DetectedLanguage,
    ) -> MessageId {
        self.append(MessageDraft::system(text, detected_language)).await
    }

    /// User text followed by the system reply, under one lock so nothing
    /// can land between them
    pub async fn append_exchange(
        &self,
        user_text: String,
        system_text: String,
        detected_language: DetectedLanguage,
    ) -> (MessageId, MessageId) {
        let mut messages = self.messages.write().await;
        let user = push(
            &mut messages,
            MessageDraft::user(user_text, detected_language.clone()),
        );
        let system = push(
            &mut messages,
            MessageDraft::system(system_text, detected_language),
        );
        (user, system)
    }

    /// Replace the translation of `id` and make it visible
    pub async fn set_translation(&self, id: MessageId, text: String) -> Result<(), CommandError> {
        let mut messages = self.messages.write().await;
        let message = messages
            .get_mut(id.0)
            .ok_or(CommandError::UnknownMessage(id))?;

        message.translation = Some(Translation {
            text,
            visible: true,
        });

        Ok(())
    }

    /// Show or hide an existing translation, its text is left alone
    pub async fn set_translation_visible(
        &self,
        id: MessageId,
        visible: bool,
    ) -> Result<(), CommandError> {
        let mut messages = self.messages.write().await;
        let translation = messages
            .get_mut(id.0)
            .ok_or(CommandError::UnknownMessage(id))?
            .translation
            .as_mut()
            .ok_or(CommandError::NoTranslation(id))?;

        translation.visible = visible;
        Ok(())
    }

    pub async fn get(&self, id: MessageId) -> Option<Message> {
        self.messages.read().await.get(id.0).cloned()
    }

    /// Read projection for the UI
    pub async fn snapshot(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

fn push(messages: &mut Vec<Message>, draft: MessageDraft) -> MessageId {
    let id = MessageId(messages.len());
    messages.push(Message {
        id,
        text: draft.text,
        role: draft.role,
        detected_language: draft.detected_language,
        translation: None,
    });
    id
}
