//! CLI support for cwfilter
//!
//! Provides programmatic access to the cwfilter commands so other tools can
//! embed them without spawning the binary.

mod check;
mod convert;
mod docs;
mod onboard;
mod task;

pub use check::{CheckOptions, CheckResult, EvalOptions, execute_check, execute_eval};
pub use convert::{json_to_record, read_json_rows};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use onboard::get_onboarding_content;
pub use task::{ShapeOptions, TaskOptions, execute_shape, execute_task};

use std::io;

use thiserror::Error;

use crate::{
    CatalogError, EvalError, ParseError, ValidationError,
    config::ConfigError,
    task::{ShapeError, TaskError},
};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {error}\n{}", caret(.input, .error.position()))]
    Parse { input: String, error: ParseError },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown category: '{0}'\nRun 'cwfilter docs' to see available categories.")]
    UnknownCategory(String),
}

impl CliError {
    pub fn parse(input: &str, error: ParseError) -> Self {
        CliError::Parse {
            input: input.to_string(),
            error,
        }
    }
}

/// The filter on one line and a caret under the character at `position`.
pub fn caret(input: &str, position: usize) -> String {
    let line: String = input
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    format!("  {}\n  {}^", line, " ".repeat(position))
}
