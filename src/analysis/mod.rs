//! Text analysis: normalization, sentence splitting and tokenization.
//!
//! This module produces the [`NormalizedDocument`](normalizer::NormalizedDocument)
//! view that every other component consumes. Normalization lower-cases and
//! strips punctuation for comparison purposes only — surface forms keep
//! their original casing unless a transform explicitly changes it.

pub mod normalizer;
pub mod token;

pub use normalizer::{NormalizedDocument, Sentence, compact_whitespace, normalize, split_sentences};
pub use token::Token;
