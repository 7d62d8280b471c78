//! Fallback orchestrator: the SOFT → COMPRESSION → STRENGTHENED state
//! machine.
//!
//! One rewrite run normalizes the source once, then applies transform
//! stages of increasing aggressiveness. After each stage the candidate is
//! polished, escaped and measured — final length plus Jaccard similarity
//! and Hamming distance **against the original input**, never against an
//! intermediate attempt. A stage is accepted when all three bars are met;
//! otherwise the machine escalates. Escalation is monotonic: a later stage
//! never falls back to an earlier one, and the STRENGTHENED output is
//! accepted unconditionally with a warning per unmet criterion.
//!
//! The engine is a pure, synchronous computation: no shared mutable state,
//! no I/O, bounded work proportional to input length. Rule tables are read
//! only, so one [`RewriteEngine`] is safely callable from many threads.
//!
//! # Examples
//!
//! ```
//! use falx::rewrite::pipeline::{RewriteEngine, RewriteOptions};
//!
//! let engine = RewriteEngine::default();
//! let result = engine
//!     .rewrite("Строительство моста началось.", &RewriteOptions::new(200))
//!     .unwrap();
//! assert!(!result.title.is_empty());
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{self, NormalizedDocument};
use crate::error::{FalxError, Result};
use crate::rewrite::rules::RuleSet;
use crate::rewrite::{lexical, markdown, polish, structural, title};
use crate::similarity::shingle::{DEFAULT_SHINGLE_SIZE, ShingleSet, jaccard};
use crate::similarity::simhash::{FINGERPRINT_BITS, Fingerprint, hamming_distance};

/// Default character budget for the rewritten text.
pub const DEFAULT_DESIRED_LEN: usize = 3500;

/// Default minimum Hamming distance a rewrite must reach.
pub const DEFAULT_MIN_HAMMING_DISTANCE: u32 = 16;

/// Default maximum Jaccard similarity a rewrite may keep.
pub const DEFAULT_MAX_JACCARD: f64 = 0.85;

/// Default character budget for the headline.
pub const DEFAULT_TITLE_LEN: usize = 110;

/// Thresholds and budgets for one rewrite call.
///
/// Defaults are explicit parameters rather than ambient state, so the
/// engine stays a pure function of its inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewriteOptions {
    /// Target character budget for the escaped text. Must be positive.
    pub desired_len: usize,
    /// Minimum Hamming distance vs. the source, in `0..=64`.
    pub min_hamming_distance: u32,
    /// Maximum Jaccard similarity vs. the source, in `[0, 1]`.
    pub max_jaccard: f64,
    /// Character budget for the headline. Must be positive.
    pub desired_title_len: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            desired_len: DEFAULT_DESIRED_LEN,
            min_hamming_distance: DEFAULT_MIN_HAMMING_DISTANCE,
            max_jaccard: DEFAULT_MAX_JACCARD,
            desired_title_len: DEFAULT_TITLE_LEN,
        }
    }
}

impl RewriteOptions {
    /// Options with the given text budget and default thresholds.
    pub fn new(desired_len: usize) -> Self {
        RewriteOptions {
            desired_len,
            ..RewriteOptions::default()
        }
    }

    /// Reject thresholds outside their valid ranges before any stage runs.
    fn validate(&self) -> Result<()> {
        if self.desired_len == 0 {
            return Err(FalxError::config("desired_len must be positive"));
        }
        if self.min_hamming_distance > FINGERPRINT_BITS {
            return Err(FalxError::config(format!(
                "min_hamming_distance must be in 0..={FINGERPRINT_BITS}"
            )));
        }
        if !(0.0..=1.0).contains(&self.max_jaccard) {
            return Err(FalxError::config("max_jaccard must be in [0, 1]"));
        }
        if self.desired_title_len == 0 {
            return Err(FalxError::config("desired_title_len must be positive"));
        }
        Ok(())
    }
}

/// Rewrite stages, in escalation order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Synonym substitution and clause reordering.
    Soft,
    /// Pattern templates plus aggressive synonyms, with sentence elision.
    Compression,
    /// Unconditional templates and synonyms; always yields a result.
    Strengthened,
}

impl Stage {
    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Soft => "soft",
            Stage::Compression => "compression",
            Stage::Strengthened => "strengthened",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal signals attached to a result for downstream moderation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// The source contained no tokens after normalization.
    EmptyInput,
    /// No stage brought the escaped text under the budget.
    LengthExceeded,
    /// The final Hamming distance is below the threshold.
    DistanceTooLow,
    /// The final Jaccard similarity is above the threshold.
    SimilarityTooHigh,
}

impl Warning {
    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Warning::EmptyInput => "empty_input",
            Warning::LengthExceeded => "length_exceeded",
            Warning::DistanceTooLow => "distance_too_low",
            Warning::SimilarityTooHigh => "similarity_too_high",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The finished, immutable product of one rewrite run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewriteResult {
    /// Escaped headline, at most `desired_title_len` characters.
    pub title: String,
    /// Escaped body, at most `desired_len` characters unless
    /// [`Warning::LengthExceeded`] is present.
    pub text: String,
    /// Jaccard similarity vs. the original input, in `[0, 1]`.
    pub similarity: f64,
    /// Hamming distance vs. the original input, in `0..=64`.
    pub distance: u32,
    /// The stage whose output was accepted.
    pub stage: Stage,
    /// Unmet targets, for moderation decisions. Empty on a clean accept.
    pub warnings: Vec<Warning>,
}

/// One stage's candidate, measured and ready for the accept/escalate
/// decision. Produced and discarded per stage.
#[derive(Debug)]
struct RewriteAttempt {
    stage: Stage,
    raw: String,
    escaped: String,
    similarity: f64,
    distance: u32,
    within_length: bool,
}

impl RewriteAttempt {
    fn meets(&self, options: &RewriteOptions) -> bool {
        self.within_length
            && self.distance >= options.min_hamming_distance
            && self.similarity <= options.max_jaccard
    }
}

/// The rewrite-and-originality-verification engine.
///
/// Holds the shared, read-only rule tables; everything else is per-call
/// stack state, so `&self` calls are freely concurrent.
#[derive(Clone, Debug)]
pub struct RewriteEngine {
    rules: Arc<RuleSet>,
}

impl Default for RewriteEngine {
    fn default() -> Self {
        RewriteEngine {
            rules: Arc::new(RuleSet::builtin().clone()),
        }
    }
}

impl RewriteEngine {
    /// Create an engine over custom rule tables.
    pub fn new(rules: RuleSet) -> Self {
        RewriteEngine {
            rules: Arc::new(rules),
        }
    }

    /// The engine's rule tables.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Rewrite `text` into a publishable `(title, text)` pair.
    ///
    /// # Errors
    ///
    /// Only configuration errors abort the call; every per-item shortfall
    /// is reported through [`RewriteResult::warnings`] instead.
    pub fn rewrite(&self, text: &str, options: &RewriteOptions) -> Result<RewriteResult> {
        options.validate()?;

        let doc = normalizer::normalize(text);
        if doc.is_empty() {
            debug!("empty input, nothing to rewrite");
            return Ok(RewriteResult {
                title: String::new(),
                text: String::new(),
                similarity: 0.0,
                distance: 0,
                stage: Stage::Soft,
                warnings: vec![Warning::EmptyInput],
            });
        }

        let source_tokens = doc.normalized_tokens();
        let source_shingles = ShingleSet::build(&source_tokens, DEFAULT_SHINGLE_SIZE);
        let source_fingerprint = Fingerprint::from_tokens(&source_tokens);

        let mut accepted = None;
        for stage in [Stage::Soft, Stage::Compression] {
            let attempt =
                self.evaluate_stage(stage, &doc, &source_shingles, source_fingerprint, options);
            if attempt.meets(options) {
                accepted = Some(attempt);
                break;
            }
            info!(
                "{stage} stage missed targets (len={}, distance={}, similarity={:.3}), escalating",
                attempt.escaped.chars().count(),
                attempt.distance,
                attempt.similarity
            );
        }
        let attempt = match accepted {
            Some(attempt) => attempt,
            None => self.evaluate_stage(
                Stage::Strengthened,
                &doc,
                &source_shingles,
                source_fingerprint,
                options,
            ),
        };

        let mut warnings = Vec::new();
        if !attempt.within_length {
            warnings.push(Warning::LengthExceeded);
        }
        if attempt.distance < options.min_hamming_distance {
            warnings.push(Warning::DistanceTooLow);
        }
        if attempt.similarity > options.max_jaccard {
            warnings.push(Warning::SimilarityTooHigh);
        }
        if !warnings.is_empty() {
            warn!(
                "rewrite finished at {} with unmet targets: {:?}",
                attempt.stage, warnings
            );
        }

        let title = fit_title(&attempt.raw, options.desired_title_len);
        Ok(RewriteResult {
            title,
            text: attempt.escaped,
            similarity: attempt.similarity,
            distance: attempt.distance,
            stage: attempt.stage,
            warnings,
        })
    }

    /// Produce and measure one stage's candidate.
    fn evaluate_stage(
        &self,
        stage: Stage,
        doc: &NormalizedDocument,
        source_shingles: &ShingleSet,
        source_fingerprint: Fingerprint,
        options: &RewriteOptions,
    ) -> RewriteAttempt {
        let rules = self.rules.as_ref();
        let raw = match stage {
            Stage::Soft => lexical::apply_soft(doc, rules).0,
            Stage::Compression => structural::apply_compression(doc, rules, options.desired_len),
            Stage::Strengthened => {
                structural::apply_strengthened(doc, rules, options.desired_len)
            }
        };
        let polished = polish(&raw, rules);
        let escaped = markdown::escape(&polished);

        let candidate = normalizer::normalize(&polished);
        let candidate_tokens = candidate.normalized_tokens();
        let similarity = jaccard(
            source_shingles,
            &ShingleSet::build(&candidate_tokens, DEFAULT_SHINGLE_SIZE),
        );
        let distance =
            hamming_distance(source_fingerprint, Fingerprint::from_tokens(&candidate_tokens));
        let within_length = escaped.chars().count() <= options.desired_len;
        debug!(
            "{stage} stage: len={}, within={}, distance={}, similarity={:.3}",
            escaped.chars().count(),
            within_length,
            distance,
            similarity
        );

        RewriteAttempt {
            stage,
            raw: polished,
            escaped,
            similarity,
            distance,
            within_length,
        }
    }
}

/// Synthesize the headline and shrink it until its escaped form fits the
/// title budget (escaping may push a fitting headline over the limit).
fn fit_title(text: &str, desired_title_len: usize) -> String {
    let mut title = title::synthesize_title(text, desired_title_len);
    loop {
        let escaped = markdown::escape(&title);
        if escaped.chars().count() <= desired_title_len {
            return escaped;
        }
        let shortened = match title.rsplit_once(' ') {
            Some((head, _)) => head.trim_end().to_string(),
            None => {
                let keep = title.chars().count().saturating_sub(1);
                title.chars().take(keep).collect()
            }
        };
        title = shortened;
    }
}

static DEFAULT_ENGINE: LazyLock<RewriteEngine> = LazyLock::new(RewriteEngine::default);

/// Rewrite with the built-in rule tables.
///
/// The primary entry point for callers that do not customize rules.
pub fn rewrite(text: &str, options: &RewriteOptions) -> Result<RewriteResult> {
    DEFAULT_ENGINE.rewrite(text, options)
}
