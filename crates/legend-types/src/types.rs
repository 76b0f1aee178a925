use std::fmt;

use serde::{Deserialize, Serialize};

/// Short language tag ("en", "es", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Result of language detection on a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectedLanguage {
    Known(LanguageCode),
    #[default]
    Unknown,
}

impl DetectedLanguage {
    pub fn code(&self) -> Option<&LanguageCode> {
        match self {
            DetectedLanguage::Known(code) => Some(code),
            DetectedLanguage::Unknown => None,
        }
    }
}

impl fmt::Display for DetectedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectedLanguage::Known(code) => write!(f, "{code}"),
            DetectedLanguage::Unknown => f.write_str("Unknown"),
        }
    }
}

impl From<Option<LanguageCode>> for DetectedLanguage {
    fn from(code: Option<LanguageCode>) -> Self {
        code.map_or(DetectedLanguage::Unknown, DetectedLanguage::Known)
    }
}

/// Direction of a single translator instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl LanguagePair {
    pub fn new(source: LanguageCode, target: LanguageCode) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source, self.target)
    }
}

/// Position of a message in the conversation, assigned on append
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub usize);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    /// Produced by the app, e.g. a summary
    System,
}

/// Capability availability as seen by the UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    pub detector: bool,
    pub translators: usize,
    pub summarizer: bool,
}

impl Readiness {
    /// Translators may be partially available
    pub fn is_ready(&self) -> bool {
        self.detector && self.summarizer
    }
}

/// Commands sent from the UI to the app
#[derive(Debug, Clone)]
pub enum AppEvent {
    Detect(String),
    Translate {
        id: MessageId,
        source: DetectedLanguage,
    },
    Summarize(String),
    SetTranslationVisible {
        id: MessageId,
        visible: bool,
    },
    SelectTarget(LanguageCode),
    Shutdown,
}

/// State-change notifications sent from the app to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ReadinessChanged(Readiness),
    MessageAppended(MessageId),
    TranslationUpdated(MessageId),
    /// The pending input buffer was used by a command and should be cleared
    InputConsumed,
    LoadingChanged(bool),
    ErrorChanged(Option<String>),
    TargetChanged(LanguageCode),
}
