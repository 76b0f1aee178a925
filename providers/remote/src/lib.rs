pub mod deepl;
pub mod ollama;

use std::sync::Arc;

use legend_config::provider::ProviderConfig;
use legend_provider::ProviderSet;

pub use deepl::{DeeplClient, DeeplDetector, DeeplTranslator, DeeplTranslatorProvider};
pub use ollama::{OllamaSummarizer, OllamaSummarizerProvider};

/// Factories for every backend enabled in `config`
pub fn provider_set(config: &ProviderConfig) -> ProviderSet {
    let mut providers = ProviderSet::default();

    if config.deepl.enabled {
        let client = DeeplClient::new(config.deepl.api_key.clone(), config.deepl.api_url.clone());
        providers.detector = Some(Arc::new(client.clone()));
        providers.translator = Some(Arc::new(DeeplTranslatorProvider::new(client)));
    } else {
        tracing::warn!("DeepL disabled, detection and translation unavailable");
    }

    if config.ollama.enabled {
        providers.summarizer = Some(Arc::new(OllamaSummarizerProvider::new(
            config.ollama.base_url.clone(),
            config.ollama.model.clone(),
        )));
    } else {
        tracing::warn!("Ollama disabled, summarization unavailable");
    }

    providers
}
