//! Token types for text analysis.
//!
//! A [`Token`] carries both the surface form used for output reconstruction
//! and the normalized form used for comparison, plus the punctuation that
//! surrounded the word in the source. Byte offsets point into the document's
//! source string so sentences can be rebuilt losslessly.
//!
//! # Examples
//!
//! ```
//! use falx::analysis::token::Token;
//!
//! let token = Token::new("Москва", "москва", 0, 12).with_punctuation("«", "»,");
//! assert_eq!(token.render(), "«Москва»,");
//! assert_eq!(token.normalized, "москва");
//! ```

use serde::{Deserialize, Serialize};

/// A single analyzed token.
///
/// # Fields
///
/// - `surface` - The word as it appeared, without adjacent punctuation
/// - `normalized` - Lowercased surface form, used for comparison only
/// - `leading` / `trailing` - Punctuation immediately around the word
/// - `start_offset` / `end_offset` - Byte offsets into the source text,
///   covering the whole chunk including punctuation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The word as it appeared in the source (original casing).
    pub surface: String,

    /// The lowercased form used for dictionary lookup and similarity.
    pub normalized: String,

    /// Punctuation immediately preceding the word (e.g. an opening quote).
    pub leading: String,

    /// Punctuation immediately following the word (e.g. a comma or period).
    pub trailing: String,

    /// Byte offset where this token's chunk starts in the source text.
    pub start_offset: usize,

    /// Byte offset where this token's chunk ends in the source text.
    pub end_offset: usize,
}

impl Token {
    /// Create a new token without surrounding punctuation.
    pub fn new(
        surface: impl Into<String>,
        normalized: impl Into<String>,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            surface: surface.into(),
            normalized: normalized.into(),
            leading: String::new(),
            trailing: String::new(),
            start_offset,
            end_offset,
        }
    }

    /// Attach leading and trailing punctuation.
    pub fn with_punctuation(mut self, leading: impl Into<String>, trailing: impl Into<String>) -> Self {
        self.leading = leading.into();
        self.trailing = trailing.into();
        self
    }

    /// Whether the token carries an actual word (some chunks are punctuation only).
    pub fn is_word(&self) -> bool {
        !self.normalized.is_empty()
    }

    /// Reconstruct the token's chunk as it appeared in the source.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.leading.len() + self.surface.len() + self.trailing.len());
        out.push_str(&self.leading);
        out.push_str(&self.surface);
        out.push_str(&self.trailing);
        out
    }

    /// Render the token with `replacement` substituted for the surface form,
    /// keeping the surrounding punctuation.
    pub fn render_with(&self, replacement: &str) -> String {
        let mut out = String::with_capacity(self.leading.len() + replacement.len() + self.trailing.len());
        out.push_str(&self.leading);
        out.push_str(replacement);
        out.push_str(&self.trailing);
        out
    }
}
