//! Command implementation for the Falx CLI.

use std::fs;

use log::debug;

use crate::cli::args::FalxArgs;
use crate::cli::output::{ErrorDocument, print_error, print_result};
use crate::error::{FalxError, Result};
use crate::rewrite::rules::RuleSet;
use crate::rewrite::RewriteEngine;

/// Execute the CLI: read input, run the engine, emit JSON.
pub fn execute(args: FalxArgs) -> Result<()> {
    let engine = match &args.rules {
        Some(path) => {
            debug!("loading rule tables from {}", path.display());
            RewriteEngine::new(RuleSet::load_from_file(path)?)
        }
        None => RewriteEngine::default(),
    };

    let text = match (&args.input, &args.file) {
        (Some(input), _) => input.clone(),
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                // The contract is a structured error document on stdout and
                // a non-zero exit, not a panic.
                let message = format!("failed to read file '{}': {e}", path.display());
                print_error(&ErrorDocument::new(&message))?;
                return Err(FalxError::other(message));
            }
        },
        (None, None) => {
            // clap's arg group guarantees one source is present.
            return Err(FalxError::other("no input source given"));
        }
    };

    let result = engine.rewrite(&text, &args.options())?;
    print_result(&result, args.pretty)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_execute_with_literal_input() {
        let args =
            FalxArgs::try_parse_from(["falx", "--input", "Строительство моста началось."]).unwrap();
        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_execute_with_file_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Мост открыли после ремонта.").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let args = FalxArgs::try_parse_from(["falx", "--file", &path]).unwrap();
        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_unreadable_file_fails_without_panicking() {
        let args = FalxArgs::try_parse_from(["falx", "--file", "/nonexistent/post.txt"]).unwrap();
        assert!(execute(args).is_err());
    }
}
