//! Command line argument parsing for the Falx CLI using clap.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::rewrite::pipeline::{
    DEFAULT_DESIRED_LEN, DEFAULT_MAX_JACCARD, DEFAULT_MIN_HAMMING_DISTANCE, DEFAULT_TITLE_LEN,
};
use crate::rewrite::RewriteOptions;

/// Falx - rewrite a news post and verify its originality
#[derive(Parser, Debug, Clone)]
#[command(name = "falx")]
#[command(about = "Rewrite a news post into a length-bounded, sufficiently original version")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(group(ArgGroup::new("source").required(true).args(["input", "file"])))]
pub struct FalxArgs {
    /// Input text to rewrite
    #[arg(long, value_name = "TEXT")]
    pub input: Option<String>,

    /// Path to a UTF-8 text file to rewrite
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Maximum length of the rewritten text, in characters
    #[arg(long, default_value_t = DEFAULT_DESIRED_LEN, value_name = "N")]
    pub max_chars: usize,

    /// Minimum SimHash distance the rewrite must reach (0..64)
    #[arg(long, default_value_t = DEFAULT_MIN_HAMMING_DISTANCE, value_name = "N")]
    pub min_distance: u32,

    /// Maximum shingle Jaccard similarity the rewrite may keep (0..1)
    #[arg(long, default_value_t = DEFAULT_MAX_JACCARD, value_name = "F")]
    pub max_jaccard: f64,

    /// Desired headline length, in characters
    #[arg(long, default_value_t = DEFAULT_TITLE_LEN, value_name = "N")]
    pub title_len: usize,

    /// Path to a JSON rule file overriding the built-in tables
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl FalxArgs {
    /// Get the effective verbosity level.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Rewrite options assembled from the flags.
    pub fn options(&self) -> RewriteOptions {
        RewriteOptions {
            desired_len: self.max_chars,
            min_hamming_distance: self.min_distance,
            max_jaccard: self.max_jaccard,
            desired_title_len: self.title_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_and_file_are_mutually_exclusive() {
        let parsed = FalxArgs::try_parse_from(["falx", "--input", "текст", "--file", "a.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_one_source_is_required() {
        assert!(FalxArgs::try_parse_from(["falx"]).is_err());
    }

    #[test]
    fn test_defaults_mirror_engine_defaults() {
        let args = FalxArgs::try_parse_from(["falx", "--input", "текст"]).unwrap();
        let options = args.options();
        assert_eq!(options.desired_len, 3500);
        assert_eq!(options.min_hamming_distance, 16);
        assert_eq!(options.max_jaccard, 0.85);
        assert_eq!(options.desired_title_len, 110);
    }
}
