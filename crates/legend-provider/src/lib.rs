use std::sync::Arc;

use legend_types::{LanguageCode, LanguagePair};

/// Factory for language detector instances
#[async_trait::async_trait]
pub trait DetectorProvider: Send + Sync {
    async fn create(&self) -> Result<Arc<dyn LanguageDetector>, ProviderError>;
}

/// Language detection interface
#[async_trait::async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Candidate languages, highest confidence first (possibly empty)
    async fn detect(&self, text: &str) -> Result<Vec<Detection>, ProviderError>;
}

/// Factory for one-directional translator instances
#[async_trait::async_trait]
pub trait TranslatorProvider: Send + Sync {
    async fn create(&self, pair: &LanguagePair) -> Result<Arc<dyn Translator>, ProviderError>;
}

/// Translation interface, bound to the pair it was created for
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// `None` or an empty string when the provider produced nothing
    async fn translate(&self, text: &str) -> Result<Option<String>, ProviderError>;

    /// Backend name, for logs
    fn name(&self) -> &str;
}

/// Factory for summarizer instances
#[async_trait::async_trait]
pub trait SummarizerProvider: Send + Sync {
    async fn create(&self) -> Result<Arc<dyn Summarizer>, ProviderError>;
}

/// Summarization interface
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// `None` or an empty string when the provider produced nothing
    async fn summarize(&self, text: &str) -> Result<Option<String>, ProviderError>;
}

/// The factories available to a session, any of which may be missing
#[derive(Clone, Default)]
pub struct ProviderSet {
    pub detector: Option<Arc<dyn DetectorProvider>>,
    pub translator: Option<Arc<dyn TranslatorProvider>>,
    pub summarizer: Option<Arc<dyn SummarizerProvider>>,
}

impl ProviderSet {
    pub fn is_empty(&self) -> bool {
        self.detector.is_none() && self.translator.is_none() && self.summarizer.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub language: LanguageCode,
    pub confidence: Option<f32>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair { from: String, to: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Provider is not installed")]
    NotInstalled,
}
