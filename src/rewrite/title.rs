//! Title synthesis from rewritten text.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::normalizer::{compact_whitespace, split_sentences};

/// Advertising marker occasionally left at the head of syndicated items.
static ERID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^erid:[^,]+,\s*").expect("static regex"));

/// Punctuation that must not dangle at the end of a headline.
const DANGLING: &[char] = &['—', '–', '-', ',', ':', ';', ' '];

/// Derive a bounded-length headline from the first sentence of `text`.
///
/// A sentence longer than `desired_title_len` characters is truncated at
/// the last whitespace boundary within the limit, with no ellipsis. When
/// sentence splitting yields nothing, the first non-empty line is used
/// instead. The result is non-empty unless the entire input was empty.
pub fn synthesize_title(text: &str, desired_title_len: usize) -> String {
    let sentences = split_sentences(text);
    let base = match sentences.first() {
        Some(first) if !first.trim().is_empty() => first,
        _ => text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or(""),
    };
    let base = compact_whitespace(&ERID_RE.replace(base, ""));
    let base = base.trim_end_matches(DANGLING);
    if base.chars().count() <= desired_title_len {
        return base.to_string();
    }

    let mut kept: Vec<&str> = Vec::new();
    let mut length = 0;
    for word in base.split(' ') {
        let word_len = word.chars().count();
        let sep = usize::from(!kept.is_empty());
        if length + word_len + sep > desired_title_len {
            break;
        }
        kept.push(word);
        length += word_len + sep;
    }
    let joined = kept.join(" ");
    let trimmed = joined.trim_end_matches(DANGLING);
    if trimmed.is_empty() {
        // A single word longer than the whole limit.
        base.chars().take(desired_title_len).collect()
    } else {
        trimmed.to_string()
    }
}
