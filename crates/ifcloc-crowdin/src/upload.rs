use std::fmt;

use serde::Serialize;

/// Body shape of a translation upload request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// `{"stringId": .., "languageId": .., "text": ..}`
    Plain,
    /// Same payload under a `data` key
    Wrapped,
}

impl BodyShape {
    pub(crate) fn body(self, payload: &TranslationPayload<'_>) -> serde_json::Value {
        match self {
            BodyShape::Plain => serde_json::json!(payload),
            BodyShape::Wrapped => serde_json::json!({ "data": payload }),
        }
    }
}

impl fmt::Display for BodyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyShape::Plain => f.write_str("plain"),
            BodyShape::Wrapped => f.write_str("wrapped"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TranslationPayload<'a> {
    pub string_id: u64,
    pub language_id: &'a str,
    pub text: &'a str,
}

/// A request the server refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAttempt {
    pub shape: BodyShape,
    pub status: u16,
    pub body: String,
}

impl fmt::Display for RejectedAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} body: {} {}", self.shape, self.status, self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Created,
    /// HTTP 409, the platform already holds this translation
    AlreadyExists,
    /// Every attempted shape was refused
    Rejected(Vec<RejectedAttempt>),
}

impl UploadOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, UploadOutcome::Created)
    }
}

/// Result of a single POST
pub(crate) enum Attempt {
    Accepted,
    Conflict,
    Rejected(RejectedAttempt),
}
