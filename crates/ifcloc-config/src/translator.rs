use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub fn default_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

pub fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

pub fn default_target_lang() -> String {
    "tr".to_string()
}

pub fn default_target_lang_name() -> String {
    "Turkish".to_string()
}

pub fn default_correction_attempts() -> u32 {
    1
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Language code used on the platform side
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Human-readable name used in the model prompt
    #[serde(default = "default_target_lang_name")]
    pub target_lang_name: String,
    /// Re-queries allowed when the model drops a protected token
    #[serde(default = "default_correction_attempts")]
    pub correction_attempts: u32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            target_lang: default_target_lang(),
            target_lang_name: default_target_lang_name(),
            correction_attempts: default_correction_attempts(),
        }
    }
}

impl TranslatorConfig {
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("OPENAI_API_KEY"));
        }
        Ok(&self.api_key)
    }
}
