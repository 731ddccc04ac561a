use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type LanguageCode = String;

/// Top-level container of localization files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
}

/// Untranslated text unit belonging to exactly one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceString {
    pub id: u64,
    #[serde(default)]
    pub file_id: Option<u64>,
    #[serde(default)]
    pub identifier: Option<String>,
    pub text: SourceText,
}

/// Plural strings come back as an object keyed by plural form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceText {
    Plain(String),
    Plural(BTreeMap<String, String>),
}

impl SourceText {
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            SourceText::Plain(text) => Some(text),
            SourceText::Plural(_) => None,
        }
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceText::Plain(text) => f.write_str(text),
            SourceText::Plural(forms) => {
                let joined = forms
                    .iter()
                    .map(|(form, text)| format!("{form}: {text}"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                write!(f, "{{{joined}}}")
            }
        }
    }
}

/// Existing translation of a string in some language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    #[serde(default, alias = "id")]
    pub translation_id: Option<u64>,
    #[serde(default)]
    pub string_id: Option<u64>,
}
