use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::crowdin::{CrowdinConfig, UploadBody};
use self::translator::TranslatorConfig;

pub mod crowdin;
pub mod translator;

/// Platform hard cap on list page size
pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Run-wide settings, built once at start-up and handed to every component
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub crowdin: CrowdinConfig,
    pub translator: TranslatorConfig,
}

impl Config {
    /// Read settings from the process environment.
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = lookup("CROWDIN_PERSONAL_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("CROWDIN_PERSONAL_TOKEN"))?;

        // Empty ORGANIZATION selects crowdin.com instead of an enterprise host
        let organization = match lookup("ORGANIZATION") {
            Some(org) if org.trim().is_empty() => None,
            Some(org) => Some(org.trim().to_string()),
            None => Some(crowdin::default_organization()),
        };

        let project_id = get("CROWDIN_PROJECT_ID")
            .map(|v| parse_setting::<u64>("CROWDIN_PROJECT_ID", &v))
            .transpose()?;

        let upload_body = get("CROWDIN_UPLOAD_BODY")
            .map(|v| parse_setting::<UploadBody>("CROWDIN_UPLOAD_BODY", &v))
            .transpose()?
            .unwrap_or_default();

        let page_size = get("PAGE_SIZE")
            .map(|v| parse_setting::<u32>("PAGE_SIZE", &v))
            .transpose()?
            .unwrap_or(MAX_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let crowdin = CrowdinConfig {
            token,
            organization,
            project_id,
            api_url: get("CROWDIN_API_URL"),
            upload_body,
            page_size,
        };

        let correction_attempts = get("TOKEN_CORRECTION_ATTEMPTS")
            .map(|v| parse_setting::<u32>("TOKEN_CORRECTION_ATTEMPTS", &v))
            .transpose()?
            .unwrap_or_else(translator::default_correction_attempts);

        let translator = TranslatorConfig {
            api_key: lookup("OPENAI_API_KEY").unwrap_or_default(),
            api_url: get("OPENAI_API_URL").unwrap_or_else(translator::default_api_url),
            model: get("OPENAI_MODEL").unwrap_or_else(translator::default_model),
            target_lang: get("TARGET_LANG").unwrap_or_else(translator::default_target_lang),
            target_lang_name: get("TARGET_LANG_NAME")
                .unwrap_or_else(translator::default_target_lang_name),
            correction_attempts,
        };

        Ok(Config {
            crowdin,
            translator,
        })
    }
}

fn parse_setting<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
