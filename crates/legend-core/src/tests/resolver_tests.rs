use legend_types::DetectedLanguage;

use super::fakes::{FakeDetectorProvider, FakeSummarizerProvider, FakeTranslatorProvider};
use super::{code, known, pair, provider_set, ready_session, session_with};
use crate::resolver::translator_key;

#[test]
fn test_pivot_source_goes_out_of_pivot() {
    let pivot = code("en");

    assert_eq!(translator_key(&pivot, &code("en"), &code("es")), pair("en", "es"));
    assert_eq!(translator_key(&pivot, &code("en"), &code("en")), pair("en", "en"));
}

#[test]
fn test_other_sources_go_into_pivot() {
    let pivot = code("en");

    assert_eq!(translator_key(&pivot, &code("es"), &code("en")), pair("es", "en"));
    // No direct path between two non-pivot languages
    assert_eq!(translator_key(&pivot, &code("es"), &code("tr")), pair("es", "en"));
    assert_eq!(translator_key(&pivot, &code("ru"), &code("ru")), pair("ru", "en"));
}

#[tokio::test]
async fn test_resolve_returns_installed_handle() {
    let session = ready_session("es").await;

    let (key, _translator) = session
        .registry()
        .resolve(&known("es"), &code("en"))
        .await
        .expect("es -> en is installed");

    assert_eq!(key, pair("es", "en"));
}

#[tokio::test]
async fn test_resolve_missing_key_is_not_found() {
    let session = session_with(provider_set(
        FakeDetectorProvider::detecting("en"),
        FakeTranslatorProvider::new().without(pair("en", "tr")),
        FakeSummarizerProvider::replying("summary"),
    ))
    .await;
    let registry = session.registry();

    assert!(registry.resolve(&known("en"), &code("tr")).await.is_none());
    assert!(registry.resolve(&known("en"), &code("ru")).await.is_some());
    // Unconfigured source language never had a translator
    assert!(registry.resolve(&known("fr"), &code("en")).await.is_none());
}

#[tokio::test]
async fn test_resolve_unknown_source_is_not_found() {
    let session = ready_session("es").await;

    assert!(
        session
            .registry()
            .resolve(&DetectedLanguage::Unknown, &code("en"))
            .await
            .is_none()
    );
}
