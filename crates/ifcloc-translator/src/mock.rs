//! Deterministic chat model for tests.
//!
//! ```ignore
//! let model = MockChat::echo("TR: ");
//! let calls = model.calls();
//! let translator = TokenSafeTranslator::new(model, "Turkish", 1);
//! assert_eq!(translator.translate("Wall").await?.text, "TR: Wall");
//! assert_eq!(calls.count(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::{ChatMessage, ChatModel, ProviderMetadata, Role, TranslateError};

#[derive(Debug, Clone)]
pub enum MockMode {
    /// Reply with the last user message behind a prefix
    Echo { prefix: String },
    /// Pop replies in order; an empty script is an API error
    Script(VecDeque<String>),
    /// Every call fails with this message
    Error(String),
}

/// Shared record of every conversation sent to a [`MockChat`]
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Vec<ChatMessage>>>>);

impl CallLog {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last(&self) -> Option<Vec<ChatMessage>> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn record(&self, messages: &[ChatMessage]) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(messages.to_vec());
    }
}

#[derive(Debug)]
pub struct MockChat {
    mode: Mutex<MockMode>,
    calls: CallLog,
}

impl MockChat {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode: Mutex::new(mode),
            calls: CallLog::default(),
        }
    }

    pub fn echo(prefix: impl Into<String>) -> Self {
        Self::new(MockMode::Echo {
            prefix: prefix.into(),
        })
    }

    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MockMode::Script(replies.into_iter().map(Into::into).collect()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockMode::Error(message.into()))
    }

    /// Handle to the call log that stays valid after the model is moved
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, TranslateError> {
        self.calls.record(messages);

        let mut mode = self.mode.lock().unwrap_or_else(PoisonError::into_inner);
        match &mut *mode {
            MockMode::Echo { prefix } => {
                let last_user = messages
                    .iter()
                    .rev()
                    .find(|m| m.role == Role::User)
                    .map(|m| m.content.as_str())
                    .unwrap_or_default();
                Ok(format!("{prefix}{last_user}"))
            }
            MockMode::Script(replies) => replies
                .pop_front()
                .ok_or_else(|| TranslateError::ApiError("mock script exhausted".to_string())),
            MockMode::Error(message) => Err(TranslateError::ApiError(message.clone())),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "mock".to_string(),
            model: "mock".to_string(),
        }
    }
}
