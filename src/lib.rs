//! # Falx
//!
//! A deterministic news rewriting engine for Rust. Falx takes one news
//! item's raw text and produces a publishable `(title, text)` pair that
//! fits a hard character budget, is provably different enough from the
//! source by two independent similarity metrics, and degrades gracefully
//! through increasingly aggressive rewriting strategies.
//!
//! ## Features
//!
//! - Pure Rust implementation, no external services
//! - Shingle/Jaccard and SimHash/Hamming originality verification
//! - Deterministic synonym substitution and pattern-template rewriting
//! - Three-stage fallback escalation (soft → compression → strengthened)
//! - MarkdownV2-safe output with escape-aware length accounting
//! - User-extensible JSON rule tables
//!
//! ## Quick start
//!
//! ```
//! use falx::rewrite::{RewriteOptions, rewrite};
//!
//! let result = rewrite(
//!     "Застройщик сообщил, что строительство моста началось.",
//!     &RewriteOptions::new(300),
//! )
//! .unwrap();
//! assert!(result.text.chars().count() <= 300 || !result.warnings.is_empty());
//! ```
//!
//! The engine is a pure function of its inputs: rule tables are loaded
//! once and shared read-only, every per-call value is stack-local, and
//! all "random" choices are deterministic functions of token position, so
//! one engine can serve many threads without locking.

pub mod analysis;
pub mod cli;
pub mod error;
pub mod rewrite;
pub mod similarity;

pub mod prelude {
    //! Commonly used types, re-exported for convenience.
    pub use crate::error::{FalxError, Result};
    pub use crate::rewrite::{
        RewriteEngine, RewriteOptions, RewriteResult, RuleSet, Stage, Warning, rewrite,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
