use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub fn default_organization() -> String {
    "buildingsmart".to_string()
}

fn default_page_size() -> u32 {
    crate::MAX_PAGE_SIZE
}

/// Request-body shape accepted by the translation upload endpoint.
/// Some enterprise deployments only accept the `{"data": {...}}` wrapper.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadBody {
    /// Probe on first upload and stick with whatever the server accepts
    #[default]
    Auto,
    Plain,
    Wrapped,
}

impl FromStr for UploadBody {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(UploadBody::Auto),
            "plain" => Ok(UploadBody::Plain),
            "wrapped" | "data" => Ok(UploadBody::Wrapped),
            other => Err(format!("expected auto, plain or wrapped, got {other}")),
        }
    }
}

impl fmt::Display for UploadBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadBody::Auto => "auto",
            UploadBody::Plain => "plain",
            UploadBody::Wrapped => "wrapped",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdinConfig {
    /// Personal access token
    #[serde(skip_serializing)]
    pub token: String,
    /// Enterprise organization, `firstpart` of firstpart.crowdin.com
    pub organization: Option<String>,
    pub project_id: Option<u64>,
    /// Overrides the host derived from `organization`
    pub api_url: Option<String>,
    pub upload_body: UploadBody,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for CrowdinConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            organization: Some(default_organization()),
            project_id: None,
            api_url: None,
            upload_body: UploadBody::default(),
            page_size: default_page_size(),
        }
    }
}

impl CrowdinConfig {
    /// API v2 root without a trailing slash
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.api_url {
            return url.trim_end_matches('/').to_string();
        }

        match &self.organization {
            Some(org) => format!("https://{org}.api.crowdin.com/api/v2"),
            None => "https://api.crowdin.com/api/v2".to_string(),
        }
    }

    pub fn require_project_id(&self) -> Result<u64, ConfigError> {
        self.project_id
            .ok_or(ConfigError::Missing("CROWDIN_PROJECT_ID"))
    }
}
