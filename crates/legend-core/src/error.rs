use std::fmt;

use legend_provider::ProviderError;
use legend_types::{DetectedLanguage, LanguageCode, MessageId};

use crate::capability::Acquisition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Detector,
    Translator,
    Summarizer,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Detector => "Language Detector",
            Capability::Translator => "Translator",
            Capability::Summarizer => "Summarizer",
        };
        f.write_str(name)
    }
}

/// Failure of a user command. The display text is what the UI shows.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Please enter some text.")]
    EmptyInput,

    #[error("{0} is not available.")]
    ServiceUnavailable(Capability),

    #[error("Translator instance missing for: {from} → {to}")]
    TranslatorMissing {
        from: DetectedLanguage,
        to: LanguageCode,
    },

    #[error("Summarization is available only for texts with more than {min_words} words.")]
    TooShort { min_words: usize, words: usize },

    #[error("Summarization failed.")]
    SummarizationFailed,

    #[error("Error detecting language: {0}")]
    DetectionFailed(#[source] ProviderError),

    #[error("Error translating text: {0}")]
    TranslationFailed(#[source] ProviderError),

    #[error("Error summarizing text: {0}")]
    SummarizerError(#[source] ProviderError),

    #[error("No message with id {0}.")]
    UnknownMessage(MessageId),

    #[error("Message {0} has no translation.")]
    NoTranslation(MessageId),

    #[error("Operation cancelled.")]
    Cancelled,
}

impl CommandError {
    /// Error slot text for the detect command, where a missing detector
    /// reads as a detection error
    pub(crate) fn detect_message(&self) -> String {
        match self {
            CommandError::ServiceUnavailable(Capability::Detector) => {
                format!("Error detecting language: {self}")
            }
            other => other.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("AI APIs are not available.")]
    ProvidersUnavailable,

    #[error("Failed to acquire {target}: {source}")]
    ProviderAcquisitionFailed {
        target: Acquisition,
        source: ProviderError,
    },

    #[error("Initialization cancelled.")]
    Cancelled,
}
