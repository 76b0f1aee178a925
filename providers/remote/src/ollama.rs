//! Summarization through a local Ollama server

use std::sync::Arc;

use async_trait::async_trait;
use legend_provider::{ProviderError, Summarizer, SummarizerProvider};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

fn summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following text in a few sentences. \
         Answer in the language of the text and output only the summary.\n\n{text}"
    )
}

/// Ollama tags models as `name:tag`, a bare name means `latest`
fn model_matches(installed: &str, wanted: &str) -> bool {
    installed == wanted || installed.strip_suffix(":latest") == Some(wanted)
}

pub struct OllamaSummarizerProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizerProvider {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }
}

#[async_trait]
impl SummarizerProvider for OllamaSummarizerProvider {
    /// Fails unless the server is up and has the model pulled
    async fn create(&self) -> Result<Arc<dyn Summarizer>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        if !tags.models.iter().any(|m| model_matches(&m.name, &self.model)) {
            return Err(ProviderError::ApiError(format!(
                "Model {} is not installed",
                self.model
            )));
        }

        Ok(Arc::new(OllamaSummarizer {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
        }))
    }
}

pub struct OllamaSummarizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str) -> Result<Option<String>, ProviderError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: summary_prompt(text),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let summary = generated.response.trim();
        if summary.is_empty() {
            tracing::warn!("Ollama model {} produced an empty summary", self.model);
            return Ok(None);
        }

        Ok(Some(summary.to_string()))
    }
}
