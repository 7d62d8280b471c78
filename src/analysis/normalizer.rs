//! Text normalization: sentence splitting and tokenization.
//!
//! [`normalize`] turns raw text into a [`NormalizedDocument`] — an ordered
//! sequence of sentences, each an ordered sequence of [`Token`]s. The
//! document is a derived view: it is never mutated, only re-derived after a
//! transform stage produces new text.
//!
//! Sentence splitting breaks on terminal punctuation (`.`, `!`, `?`, `…`)
//! with guards against common Russian abbreviation false-splits (`т.`,
//! `г.`, `ул.`, initials). Tokenization splits on whitespace and separates
//! leading/trailing punctuation from the word core using Unicode word
//! boundaries (UAX #29), so hyphenated words stay intact.
//!
//! # Examples
//!
//! ```
//! use falx::analysis::normalizer::normalize;
//!
//! let doc = normalize("Мост открыли в г. Казани. Движение запустили!");
//! assert_eq!(doc.sentences().len(), 2);
//! assert_eq!(doc.sentences()[0].render(), "Мост открыли в г. Казани.");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::Token;

/// Sentence-terminal punctuation characters.
pub const TERMINALS: &[char] = &['.', '!', '?', '…'];

/// Abbreviations that must not terminate a sentence when followed by a dot.
const ABBREVIATIONS: &[&str] = &[
    "т", "г", "ул", "им", "руб", "млн", "млрд", "тыс", "др", "пр", "см", "стр", "кв", "обл",
];

/// Editorial lead-ins stripped before analysis ("Коротко:", "Главное:", ...).
const LEAD_PREFIXES: &[&str] = &["коротко", "главное", "суть", "что произошло"];

/// An ordered sequence of tokens forming one sentence.
#[derive(Clone, Debug, Default)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// The tokens of this sentence, in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of word-bearing tokens (punctuation-only chunks excluded).
    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_word()).count()
    }

    /// Reconstruct the sentence's surface text.
    pub fn render(&self) -> String {
        let parts: Vec<String> = self.tokens.iter().map(|t| t.render()).collect();
        parts.join(" ")
    }
}

/// A normalized view of one text: sentences of tokens over an owned,
/// whitespace-compacted copy of the source.
#[derive(Clone, Debug, Default)]
pub struct NormalizedDocument {
    source: String,
    sentences: Vec<Sentence>,
}

impl NormalizedDocument {
    /// The compacted source text this document was derived from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The sentences of the document, in order.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Whether the document contains no word-bearing tokens at all.
    pub fn is_empty(&self) -> bool {
        self.sentences.iter().all(|s| s.word_count() == 0)
    }

    /// Flat sequence of normalized word forms, for similarity evaluation.
    pub fn normalized_tokens(&self) -> Vec<&str> {
        self.sentences
            .iter()
            .flat_map(|s| s.tokens())
            .filter(|t| t.is_word())
            .map(|t| t.normalized.as_str())
            .collect()
    }

    /// Reconstruct the full surface text.
    pub fn render(&self) -> String {
        let parts: Vec<String> = self.sentences.iter().map(|s| s.render()).collect();
        parts.join(" ")
    }
}

/// Collapse runs of spaces and tabs into single spaces and trim the ends.
///
/// Newlines are preserved so "first non-empty line" fallbacks stay possible.
pub fn compact_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_blank = false;
    for c in text.chars() {
        if c == ' ' || c == '\t' {
            in_blank = true;
            continue;
        }
        if in_blank && !out.is_empty() && c != '\n' {
            out.push(' ');
        }
        in_blank = false;
        out.push(c);
    }
    out.trim().to_string()
}

/// Strip an editorial lead-in ("Коротко:", "Главное," ...) from the start.
pub fn strip_lead(text: &str) -> &str {
    let lower = text.to_lowercase();
    for prefix in LEAD_PREFIXES {
        if lower.starts_with(prefix) {
            let mut rest = &text[prefix.len()..];
            let trimmed = rest.trim_start();
            if let Some(stripped) = trimmed.strip_prefix([':', ',']) {
                rest = stripped;
            } else if trimmed.len() == rest.len() {
                // No separator and no whitespace boundary: not a lead-in,
                // just a word that happens to start with the prefix.
                continue;
            }
            return rest.trim_start();
        }
    }
    text
}

/// Split text into trimmed sentence slices.
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_spans(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .collect()
}

/// Byte spans of trimmed sentences within `text`.
fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < chars.len() {
        let (pos, c) = chars[i];
        if TERMINALS.contains(&c) {
            // Consume a run of terminal punctuation and closing quotes.
            let mut j = i + 1;
            while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?' | '…' | '"' | '»' | ')') {
                j += 1;
            }
            let at_end = j >= chars.len();
            let boundary = at_end || chars[j].1.is_whitespace();
            if boundary && !(c == '.' && is_abbreviation_dot(text, pos)) {
                let end = if at_end { text.len() } else { chars[j].0 };
                if let Some(span) = trimmed_span(text, start, end) {
                    spans.push(span);
                }
                start = end;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    if let Some(span) = trimmed_span(text, start, text.len()) {
        spans.push(span);
    }
    spans
}

/// Trim whitespace off a span, returning `None` if nothing remains.
fn trimmed_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &text[start..end];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let offset = slice.len() - slice.trim_start().len();
    Some((start + offset, start + offset + trimmed.len()))
}

/// Whether the dot at `dot_pos` follows a known abbreviation or an initial.
fn is_abbreviation_dot(text: &str, dot_pos: usize) -> bool {
    let word: String = text[..dot_pos]
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    if word.is_empty() {
        return false;
    }
    if word.chars().count() == 1 {
        // Single-letter initials: "А. Пушкин".
        return true;
    }
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Tokenize one sentence slice. `base_offset` is the slice's byte offset
/// into the document source, so token offsets point into the source.
fn tokenize_sentence(sentence: &str, base_offset: usize) -> Sentence {
    let mut tokens = Vec::new();
    let mut chunk_start = None;
    let bytes_len = sentence.len();
    let mut push_chunk = |start: usize, end: usize, tokens: &mut Vec<Token>| {
        let chunk = &sentence[start..end];
        tokens.push(split_chunk(chunk, base_offset + start, base_offset + end));
    };
    for (pos, c) in sentence.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = chunk_start.take() {
                push_chunk(start, pos, &mut tokens);
            }
        } else if chunk_start.is_none() {
            chunk_start = Some(pos);
        }
    }
    if let Some(start) = chunk_start {
        push_chunk(start, bytes_len, &mut tokens);
    }
    Sentence { tokens }
}

/// Split a whitespace-free chunk into leading punctuation, word core and
/// trailing punctuation. The core spans from the first to the last Unicode
/// word segment containing an alphanumeric character, which keeps
/// hyphenated words ("кто-то") in one piece.
fn split_chunk(chunk: &str, start_offset: usize, end_offset: usize) -> Token {
    let mut first = None;
    let mut last = None;
    for (i, seg) in chunk.split_word_bound_indices() {
        if seg.chars().any(|c| c.is_alphanumeric()) {
            if first.is_none() {
                first = Some(i);
            }
            last = Some(i + seg.len());
        }
    }
    match (first, last) {
        (Some(f), Some(l)) => {
            let core = &chunk[f..l];
            Token::new(core, core.to_lowercase(), start_offset, end_offset)
                .with_punctuation(&chunk[..f], &chunk[l..])
        }
        _ => Token::new("", "", start_offset, end_offset).with_punctuation(chunk, ""),
    }
}

/// Build a [`NormalizedDocument`] from raw text.
///
/// The input is lead-stripped and whitespace-compacted first; empty input
/// yields a document with zero sentences.
pub fn normalize(text: &str) -> NormalizedDocument {
    let source = compact_whitespace(strip_lead(text));
    let mut sentences = Vec::new();
    for (start, end) in sentence_spans(&source) {
        let sentence = tokenize_sentence(&source[start..end], start);
        if !sentence.tokens().is_empty() {
            sentences.push(sentence);
        }
    }
    NormalizedDocument { source, sentences }
}
