#[derive(Debug, thiserror::Error)]
pub enum CrowdinError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Crowdin API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No project id configured, cannot {0}")]
    NoProject(&'static str),
}

impl CrowdinError {
    pub fn status(&self) -> Option<u16> {
        match self {
            CrowdinError::Api { status, .. } => Some(*status),
            CrowdinError::Http(e) => e.status().map(|s| s.as_u16()),
            CrowdinError::NoProject(_) => None,
        }
    }
}
