mod resolver_tests;

use std::sync::Arc;

use legend_config::language::LanguageConfig;
use legend_provider::ProviderSet;
use legend_types::{DetectedLanguage, LanguageCode, LanguagePair};

use self::fakes::{FakeDetectorProvider, FakeSummarizerProvider, FakeTranslatorProvider};
use crate::Session;

pub(crate) fn code(code: &str) -> LanguageCode {
    LanguageCode::new(code)
}

pub(crate) fn known(language: &str) -> DetectedLanguage {
    DetectedLanguage::Known(code(language))
}

pub(crate) fn pair(source: &str, target: &str) -> LanguagePair {
    LanguagePair::new(code(source), code(target))
}

/// `count` words of filler text
pub(crate) fn words(count: usize) -> String {
    vec!["palabra"; count].join(" ")
}

pub(crate) fn provider_set(
    detector: FakeDetectorProvider,
    translator: FakeTranslatorProvider,
    summarizer: FakeSummarizerProvider,
) -> ProviderSet {
    ProviderSet {
        detector: Some(Arc::new(detector)),
        translator: Some(Arc::new(translator)),
        summarizer: Some(Arc::new(summarizer)),
    }
}

/// Session over the shipped language set with every capability acquired
pub(crate) async fn ready_session(detected: &str) -> Session {
    session_with(provider_set(
        FakeDetectorProvider::detecting(detected),
        FakeTranslatorProvider::new(),
        FakeSummarizerProvider::replying("A short summary."),
    ))
    .await
}

pub(crate) async fn session_with(providers: ProviderSet) -> Session {
    let session = Session::new(LanguageConfig::default());
    session
        .initialize(&providers)
        .await
        .expect("providers are installed");
    session
}
