//! The rewrite-and-originality-verification engine.
//!
//! Raw text enters the [`pipeline`] orchestrator, which normalizes it once
//! and drives the three-stage escalation over the [`lexical`] and
//! [`structural`] transform engines, measuring each candidate with the
//! similarity evaluators. The [`title`] synthesizer and [`markdown`]
//! escaper run once on the accepted text just before return.

pub mod lexical;
pub mod markdown;
pub mod pipeline;
pub mod rules;
pub mod structural;
pub mod title;

pub use pipeline::{
    RewriteEngine, RewriteOptions, RewriteResult, Stage, Warning, rewrite,
};
pub use rules::{RuleSet, SynonymEntry, SynonymTable};

use crate::analysis::normalizer::compact_whitespace;

/// Final polish applied to every stage's candidate: typo/whitespace
/// cleanup rules, whitespace compaction, and a terminal period when the
/// text ends without sentence-terminal punctuation.
pub(crate) fn polish(text: &str, rules: &RuleSet) -> String {
    let mut out = compact_whitespace(&rules.apply_cleanups(text));
    if !out.is_empty() && !out.ends_with(['.', '!', '?', '…']) {
        out.push('.');
    }
    out
}

/// Character length of the candidate's final form: polished, then escaped.
/// The structural stages compress against this measure so the budget check
/// sees exactly what the caller will receive.
pub(crate) fn final_len(text: &str, rules: &RuleSet) -> usize {
    markdown::escaped_len(&polish(text, rules))
}
