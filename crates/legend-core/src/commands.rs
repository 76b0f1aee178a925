use legend_provider::Summarizer;
use legend_types::{DetectedLanguage, MessageId, SessionEvent};

use crate::error::{Capability, CommandError};
use crate::session::Session;

/// Summaries are refused below this many whitespace-separated words
pub const MIN_SUMMARY_WORDS: usize = 150;

/// Stored when a translator answers with nothing
pub const TRANSLATION_FAILED: &str = "Translation failed.";

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

impl Session {
    /// Detect the language of `text` and append it as a user message
    pub async fn detect(&self, text: &str) -> Result<MessageId, CommandError> {
        let result = self.run_detect(text).await;
        self.finish("detect", result, CommandError::detect_message)
            .await
    }

    /// Translate message `id`, read as `source`, into the current target selection
    pub async fn translate(
        &self,
        id: MessageId,
        source: &DetectedLanguage,
    ) -> Result<String, CommandError> {
        let result = self.run_translate(id, source).await;
        self.finish("translate", result, CommandError::to_string)
            .await
    }

    /// Show or hide the translation of message `id`
    pub async fn set_translation_visible(
        &self,
        id: MessageId,
        visible: bool,
    ) -> Result<(), CommandError> {
        let result = self.conversation.set_translation_visible(id, visible).await;
        if result.is_ok() {
            self.notifier
                .emit(SessionEvent::TranslationUpdated(id))
                .await;
        }
        self.finish("toggle translation", result, CommandError::to_string)
            .await
    }

    /// Summarize `text` and append it together with its summary
    pub async fn summarize(&self, text: &str) -> Result<(MessageId, MessageId), CommandError> {
        let result = self.run_summarize(text).await;
        self.finish("summarize", result, CommandError::to_string)
            .await
    }

    async fn run_detect(&self, text: &str) -> Result<MessageId, CommandError> {
        if text.trim().is_empty() {
            return Err(CommandError::EmptyInput);
        }
        self.clear_error().await;

        let detected = match self.detect_language(text).await {
            Ok(detected) => detected,
            Err(e) => {
                // The input is spent even if detection failed
                self.notifier.emit(SessionEvent::InputConsumed).await;
                return Err(e);
            }
        };

        let id = self
            .conversation
            .append_user(text.to_string(), detected.clone())
            .await;
        tracing::info!("Message {} detected as {}", id, detected);

        self.notifier.emit(SessionEvent::MessageAppended(id)).await;
        self.notifier.emit(SessionEvent::InputConsumed).await;

        Ok(id)
    }

    async fn run_translate(
        &self,
        id: MessageId,
        source: &DetectedLanguage,
    ) -> Result<String, CommandError> {
        if !self.registry.has_translators().await {
            return Err(CommandError::ServiceUnavailable(Capability::Translator));
        }

        let message = self
            .conversation
            .get(id)
            .await
            .ok_or(CommandError::UnknownMessage(id))?;

        // Read the selection now, not when the command was issued
        let target = self.target().await;
        let (key, translator) = self.registry.resolve(source, &target).await.ok_or_else(|| {
            CommandError::TranslatorMissing {
                from: source.clone(),
                to: target.clone(),
            }
        })?;

        tracing::debug!(
            "Translating message {} with {} ({})",
            id,
            key,
            translator.name()
        );

        self.set_loading(true).await;
        let result = self.call(translator.translate(&message.text)).await;
        self.set_loading(false).await;

        let translated = match result?.map_err(CommandError::TranslationFailed)? {
            Some(text) if !text.is_empty() => text,
            _ => {
                tracing::warn!("Translator {} returned nothing for message {}", key, id);
                TRANSLATION_FAILED.to_string()
            }
        };

        self.conversation
            .set_translation(id, translated.clone())
            .await?;
        self.notifier
            .emit(SessionEvent::TranslationUpdated(id))
            .await;

        Ok(translated)
    }

    async fn run_summarize(&self, text: &str) -> Result<(MessageId, MessageId), CommandError> {
        if text.trim().is_empty() {
            return Err(CommandError::EmptyInput);
        }

        let words = word_count(text);
        if words < MIN_SUMMARY_WORDS {
            return Err(CommandError::TooShort {
                min_words: MIN_SUMMARY_WORDS,
                words,
            });
        }

        let summarizer = self
            .registry
            .summarizer()
            .await
            .ok_or(CommandError::ServiceUnavailable(Capability::Summarizer))?;

        self.set_loading(true).await;
        let result = self.summarize_and_detect(summarizer.as_ref(), text).await;
        self.set_loading(false).await;
        let (summary, detected) = result?;

        let (user, system) = self
            .conversation
            .append_exchange(text.to_string(), summary, detected)
            .await;
        tracing::info!("Summary of message {} appended as {}", user, system);

        self.notifier.emit(SessionEvent::MessageAppended(user)).await;
        self.notifier.emit(SessionEvent::MessageAppended(system)).await;
        self.notifier.emit(SessionEvent::InputConsumed).await;

        Ok((user, system))
    }

    async fn summarize_and_detect(
        &self,
        summarizer: &dyn Summarizer,
        text: &str,
    ) -> Result<(String, DetectedLanguage), CommandError> {
        let summary = self
            .call(summarizer.summarize(text))
            .await?
            .map_err(CommandError::SummarizerError)?
            .filter(|summary| !summary.is_empty())
            .ok_or(CommandError::SummarizationFailed)?;

        // The summary shares the language of its source text
        let detected = self.detect_language(text).await?;

        Ok((summary, detected))
    }

    /// First (most confident) detection, `Unknown` when there is none
    async fn detect_language(&self, text: &str) -> Result<DetectedLanguage, CommandError> {
        let detector = self
            .registry
            .detector()
            .await
            .ok_or(CommandError::ServiceUnavailable(Capability::Detector))?;

        let detections = self
            .call(detector.detect(text))
            .await?
            .map_err(CommandError::DetectionFailed)?;

        Ok(detections
            .into_iter()
            .next()
            .map(|detection| detection.language)
            .into())
    }

    async fn finish<T>(
        &self,
        command: &str,
        result: Result<T, CommandError>,
        describe: fn(&CommandError) -> String,
    ) -> Result<T, CommandError> {
        if let Err(e) = &result {
            tracing::warn!("{} failed: {}", command, e);
            self.report_error(describe(e)).await;
        }
        result
    }
}
