//! Text shortening for long feature bullets and reviews.

use serde::Serialize;

pub const MAX_FEATURE_SUMMARY_CHARS: usize = 200;
pub const MAX_REVIEW_CHARS: usize = 300;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Truncated {
    pub text: String,
    pub is_truncated: bool,
}

/// Shortens a feature bullet to its first sentence when that sentence fits in
/// `max_chars`, otherwise to a word boundary with a trailing ellipsis.
#[must_use]
pub fn summarize_feature(text: &str, max_chars: usize) -> Truncated {
    if let Some(sentence) = first_sentence(text) {
        if sentence.chars().count() <= max_chars {
            return Truncated {
                text: sentence.to_string(),
                is_truncated: text.len() > sentence.len(),
            };
        }
    }

    truncate_at_word(text, max_chars)
}

/// Cuts `text` to at most `max_chars` characters, dropping the trailing
/// partial word, and appends `...`. Text that already fits is returned whole.
#[must_use]
pub fn truncate_at_word(text: &str, max_chars: usize) -> Truncated {
    if text.chars().count() <= max_chars {
        return Truncated {
            text: text.to_string(),
            is_truncated: false,
        };
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i);
    let mut truncated = drop_partial_word(&text[..cut]).to_string();
    truncated.push_str(ELLIPSIS);

    Truncated {
        text: truncated,
        is_truncated: true,
    }
}

/// Leading text up to and including the first `.`, `!` or `?`.
fn first_sentence(text: &str) -> Option<&str> {
    text.find(['.', '!', '?']).map(|i| &text[..=i])
}

/// Removes the last whitespace run and whatever non-whitespace follows it.
fn drop_partial_word(text: &str) -> &str {
    let trimmed = text.trim_end();
    if trimmed.len() < text.len() {
        return trimmed;
    }
    match text.rfind(char::is_whitespace) {
        Some(i) => text[..i].trim_end(),
        None => text,
    }
}
