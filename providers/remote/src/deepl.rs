use std::sync::Arc;

use async_trait::async_trait;
use legend_provider::{
    Detection, DetectorProvider, LanguageDetector, ProviderError, Translator,
    TranslatorProvider,
};
use legend_types::{LanguageCode, LanguagePair};

/// Languages DeepL accepts on both sides of a translation
const SUPPORTED: &[&str] = &[
    "bg", "cs", "da", "de", "el", "en", "es", "et", "fi", "fr", "hu", "id", "it", "ja", "ko", "lt",
    "lv", "nb", "nl", "pl", "pt", "ro", "ru", "sk", "sl", "sv", "tr", "uk", "zh",
];

fn is_supported(code: &LanguageCode) -> bool {
    SUPPORTED.contains(&code.as_str())
}

/// DeepL wants a regional variant for some targets
fn target_code(code: &LanguageCode) -> String {
    match code.as_str() {
        "en" => "EN-US".to_string(),
        "pt" => "PT-BR".to_string(),
        other => other.to_uppercase(),
    }
}

#[derive(Clone)]
pub struct DeeplClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeeplClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }

    fn check_key(&self) -> Result<(), ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError);
        }
        Ok(())
    }

    async fn post(&self, params: &[(&str, &str)]) -> Result<serde_json::Value, ProviderError> {
        self.check_key()?;

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(ProviderError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(ProviderError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl DetectorProvider for DeeplClient {
    async fn create(&self) -> Result<Arc<dyn LanguageDetector>, ProviderError> {
        self.check_key()?;
        Ok(Arc::new(DeeplDetector {
            client: self.clone(),
        }))
    }
}

/// Detects by translating into English and reading back the source language
pub struct DeeplDetector {
    client: DeeplClient,
}

#[async_trait]
impl LanguageDetector for DeeplDetector {
    async fn detect(&self, text: &str) -> Result<Vec<Detection>, ProviderError> {
        let json = self
            .client
            .post(&[("text", text), ("target_lang", "EN-US")])
            .await?;

        let detected = json["translations"]
            .get(0)
            .and_then(|t| t["detected_source_language"].as_str());

        // DeepL reports a single language without a score
        Ok(detected
            .map(|code| Detection {
                language: LanguageCode::new(code.to_lowercase()),
                confidence: None,
            })
            .into_iter()
            .collect())
    }
}

pub struct DeeplTranslatorProvider {
    client: DeeplClient,
}

impl DeeplTranslatorProvider {
    pub fn new(client: DeeplClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TranslatorProvider for DeeplTranslatorProvider {
    async fn create(&self, pair: &LanguagePair) -> Result<Arc<dyn Translator>, ProviderError> {
        self.client.check_key()?;

        if pair.source == pair.target || !is_supported(&pair.source) || !is_supported(&pair.target)
        {
            return Err(ProviderError::UnsupportedLanguagePair {
                from: pair.source.to_string(),
                to: pair.target.to_string(),
            });
        }

        Ok(Arc::new(DeeplTranslator {
            client: self.client.clone(),
            pair: pair.clone(),
        }))
    }
}

pub struct DeeplTranslator {
    client: DeeplClient,
    pair: LanguagePair,
}

#[async_trait]
impl Translator for DeeplTranslator {
    async fn translate(&self, text: &str) -> Result<Option<String>, ProviderError> {
        let source = self.pair.source.as_str().to_uppercase();
        let target = target_code(&self.pair.target);

        let json = self
            .client
            .post(&[
                ("text", text),
                ("source_lang", source.as_str()),
                ("target_lang", target.as_str()),
            ])
            .await?;

        let translated = json["translations"]
            .get(0)
            .and_then(|t| t["text"].as_str())
            .map(str::to_string);

        if translated.is_none() {
            tracing::warn!("DeepL returned no translation for {}", self.pair);
        }

        Ok(translated)
    }

    fn name(&self) -> &str {
        "DeepL"
    }
}
