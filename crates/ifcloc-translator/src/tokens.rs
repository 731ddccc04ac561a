//! Protected `[[...]]` tokens.
//!
//! Source strings reference IFC entities as `[[IfcWall]]`; translations must
//! carry those tokens through unchanged.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[^\]]+\]\]").expect("valid protected token regex"));

/// Distinct tokens in order of first appearance
pub fn protected_tokens(text: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = Vec::new();
    for found in TOKEN_PATTERN.find_iter(text) {
        if !tokens.contains(&found.as_str()) {
            tokens.push(found.as_str());
        }
    }
    tokens
}

/// Tokens that do not occur verbatim in `output`
pub fn missing_tokens<'a>(tokens: &[&'a str], output: &str) -> Vec<&'a str> {
    tokens
        .iter()
        .copied()
        .filter(|token| !output.contains(token))
        .collect()
}

/// `[[IfcWall]]` -> `IfcWall`
pub fn inner_text(token: &str) -> &str {
    token
        .strip_prefix("[[")
        .and_then(|t| t.strip_suffix("]]"))
        .unwrap_or(token)
}

/// Re-bracket bare occurrences of the token's inner text.
///
/// Occurrences inside an existing `[[...]]` span are never touched. Whole-word
/// occurrences are preferred; when there are none, an occurrence carrying a
/// suffix (`IfcWallları`) is bracketed in place. Returns `None` when there was
/// nothing to restore.
pub fn restore_token(output: &str, token: &str) -> Option<String> {
    let inner = inner_text(token);
    if inner.is_empty() || inner == token {
        return None;
    }

    let protected: Vec<Range<usize>> = TOKEN_PATTERN.find_iter(output).map(|m| m.range()).collect();

    bracket_occurrences(output, token, &protected, true)
        .or_else(|| bracket_occurrences(output, token, &protected, false))
}

fn bracket_occurrences(
    output: &str,
    token: &str,
    protected: &[Range<usize>],
    whole_word: bool,
) -> Option<String> {
    let inner = inner_text(token);
    let mut restored = String::with_capacity(output.len() + 4);
    let mut cursor = 0;
    let mut replaced = 0;

    for (start, _) in output.match_indices(inner) {
        let end = start + inner.len();
        if start < cursor {
            continue;
        }
        if protected.iter().any(|span| start < span.end && span.start < end) {
            continue;
        }
        if whole_word && !is_word_boundary(output, start, end, inner) {
            continue;
        }

        restored.push_str(&output[cursor..start]);
        restored.push_str(token);
        cursor = end;
        replaced += 1;
    }

    if replaced == 0 {
        return None;
    }

    restored.push_str(&output[cursor..]);
    Some(restored)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_boundary(text: &str, start: usize, end: usize, inner: &str) -> bool {
    let starts_with_word = inner.chars().next().is_some_and(is_word_char);
    let ends_with_word = inner.chars().next_back().is_some_and(is_word_char);

    let before_ok = !starts_with_word || !text[..start].chars().next_back().is_some_and(is_word_char);
    let after_ok = !ends_with_word || !text[end..].chars().next().is_some_and(is_word_char);

    before_ok && after_ok
}
