use legend_types::{DetectedLanguage, LanguageCode};
use serde::{Deserialize, Serialize};

fn default_supported() -> Vec<LanguageOption> {
    [
        ("en", "English"),
        ("pt", "Portuguese"),
        ("es", "Spanish"),
        ("ru", "Russian"),
        ("tr", "Turkish"),
    ]
    .into_iter()
    .map(|(code, name)| LanguageOption {
        code: LanguageCode::new(code),
        name: name.to_string(),
    })
    .collect()
}

fn default_pivot() -> LanguageCode {
    LanguageCode::new("en")
}

fn default_target() -> LanguageCode {
    LanguageCode::new("es")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub code: LanguageCode,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Languages offered for translation, in acquisition order
    #[serde(default = "default_supported")]
    pub supported: Vec<LanguageOption>,
    /// Hub language every translator pair goes through
    #[serde(default = "default_pivot")]
    pub pivot: LanguageCode,
    /// Target selection at session start
    #[serde(default = "default_target")]
    pub default_target: LanguageCode,
}

impl LanguageConfig {
    pub fn codes(&self) -> impl Iterator<Item = &LanguageCode> {
        self.supported.iter().map(|option| &option.code)
    }

    pub fn is_supported(&self, code: &LanguageCode) -> bool {
        self.codes().any(|c| c == code)
    }

    /// Human readable name, "Unknown" for anything not configured
    pub fn display_name(&self, language: &DetectedLanguage) -> &str {
        language
            .code()
            .and_then(|code| self.supported.iter().find(|option| &option.code == code))
            .map_or("Unknown", |option| option.name.as_str())
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            supported: default_supported(),
            pivot: default_pivot(),
            default_target: default_target(),
        }
    }
}
