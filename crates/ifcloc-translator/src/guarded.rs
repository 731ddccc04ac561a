use ifcloc_config::translator::TranslatorConfig;

use crate::tokens::{missing_tokens, protected_tokens, restore_token};
use crate::{ChatMessage, ChatModel, ProviderMetadata, TranslateError, prompt};

/// Model output after protected-token validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedTranslation {
    pub text: String,
    /// Protected tokens found in the source
    pub tokens: Vec<String>,
    /// Correction round-trips spent on dropped tokens
    pub corrections: u32,
    /// Tokens re-bracketed in the output after the model gave up
    pub repaired: Vec<String>,
    /// Tokens still absent from `text`
    pub missing: Vec<String>,
}

impl CheckedTranslation {
    pub fn is_intact(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Translates single strings and checks that `[[...]]` tokens survive.
///
/// A reply that lost tokens is sent back to the model with an explicit
/// correction request; whatever is still missing afterwards goes through
/// [`restore_token`] and is reported on the result.
pub struct TokenSafeTranslator {
    model: Box<dyn ChatModel>,
    target_lang_name: String,
    correction_attempts: u32,
}

impl TokenSafeTranslator {
    pub fn new(
        model: impl ChatModel + 'static,
        target_lang_name: impl Into<String>,
        correction_attempts: u32,
    ) -> Self {
        Self {
            model: Box::new(model),
            target_lang_name: target_lang_name.into(),
            correction_attempts,
        }
    }

    pub fn from_config(model: impl ChatModel + 'static, config: &TranslatorConfig) -> Self {
        Self::new(
            model,
            config.target_lang_name.clone(),
            config.correction_attempts,
        )
    }

    pub fn metadata(&self) -> ProviderMetadata {
        self.model.metadata()
    }

    pub async fn translate(&self, source: &str) -> Result<CheckedTranslation, TranslateError> {
        let tokens = protected_tokens(source);

        let mut messages = vec![
            ChatMessage::system(prompt::system_prompt(&self.target_lang_name)),
            ChatMessage::user(source),
        ];
        let mut text = self.model.complete(&messages).await?.trim().to_string();
        let mut missing = missing_tokens(&tokens, &text);

        let mut corrections = 0;
        while !missing.is_empty() && corrections < self.correction_attempts {
            corrections += 1;
            tracing::debug!(
                "Reply dropped {} protected token(s), requesting correction {}/{}",
                missing.len(),
                corrections,
                self.correction_attempts
            );

            messages.push(ChatMessage::assistant(text.as_str()));
            messages.push(ChatMessage::user(prompt::correction_prompt(&missing)));
            text = self.model.complete(&messages).await?.trim().to_string();
            missing = missing_tokens(&tokens, &text);
        }

        let mut repaired = Vec::new();
        for token in missing {
            if let Some(restored) = restore_token(&text, token) {
                text = restored;
                repaired.push(token.to_string());
            }
        }

        if !repaired.is_empty() {
            tracing::warn!("Re-inserted protected tokens: {}", repaired.join(", "));
        }

        let missing: Vec<String> = missing_tokens(&tokens, &text)
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(CheckedTranslation {
            text,
            tokens: tokens.into_iter().map(str::to_string).collect(),
            corrections,
            repaired,
            missing,
        })
    }
}
