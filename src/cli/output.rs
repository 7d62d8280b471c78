//! Output formatting for the Falx CLI.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rewrite::RewriteResult;

/// Structured error document emitted on stdout when input cannot be read.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub error: String,
}

impl ErrorDocument {
    /// Wrap an error message.
    pub fn new(message: impl Into<String>) -> Self {
        ErrorDocument {
            error: message.into(),
        }
    }
}

/// Print the rewrite result as JSON to stdout.
pub fn print_result(result: &RewriteResult, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Print a structured error document to stdout.
pub fn print_error(document: &ErrorDocument) -> Result<()> {
    println!("{}", serde_json::to_string(document)?);
    Ok(())
}
