use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_deepl_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub deepl: DeeplConfig,
    pub ollama: OllamaConfig,
}

impl ProviderConfig {
    pub fn apply_env(&mut self) {
        if let Ok(api_key) = env::var("DEEPL_API_KEY") {
            self.deepl.api_key = api_key;
        }
        if let Ok(api_url) = env::var("DEEPL_API_URL") {
            self.deepl.api_url = api_url;
        }
        if let Ok(base_url) = env::var("OLLAMA_URL") {
            self.ollama.base_url = base_url;
        }
        if let Ok(model) = env::var("OLLAMA_MODEL") {
            self.ollama.model = model;
        }
    }
}

/// Detector and translator backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeeplConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_deepl_url")]
    pub api_url: String,
}

impl Default for DeeplConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: String::new(),
            api_url: default_deepl_url(),
        }
    }
}

/// Summarizer backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_ollama_url")]
    pub base_url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}
