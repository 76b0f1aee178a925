use std::env;

use legend_types::LanguageCode;
use serde::{Deserialize, Serialize};

use self::language::LanguageConfig;
use self::provider::ProviderConfig;

pub mod language;
pub mod provider;

fn default_event_capacity() -> usize {
    256
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub languages: LanguageConfig,
    pub providers: ProviderConfig,

    /// Capacity of the app -> UI state-change channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Ok(pivot) = env::var("LEGEND_PIVOT") {
            self.languages.pivot = LanguageCode::new(pivot);
        }

        if let Ok(target) = env::var("LEGEND_TARGET") {
            self.languages.default_target = LanguageCode::new(target);
        }

        self.event_capacity = env::var("LEGEND_EVENT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.event_capacity);

        self.providers.apply_env();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: LanguageConfig::default(),
            providers: ProviderConfig::default(),
            event_capacity: default_event_capacity(),
        }
    }
}
