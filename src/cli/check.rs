//! Check and evaluate filters

use std::path::PathBuf;

use super::{CliError, json_to_record};
use crate::{Schema, evaluate, output, parse, validate};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter to check
    pub filter: String,
    /// Catalog snapshot to validate against
    pub schema: Option<PathBuf>,
    /// Print the multi-line form
    pub pretty: bool,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Canonical (or pretty) rendering of the parsed filter
    pub rendered: String,
    /// Whether the filter was validated against a schema
    pub validated: bool,
}

/// Parse a filter, validate it when a schema is given, and render it back.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = parse(&options.filter).map_err(|e| CliError::parse(&options.filter, e))?;

    let validated = match &options.schema {
        Some(path) => {
            let schema = Schema::load(path)?;
            validate(&expr, &schema)?;
            true
        }
        None => false,
    };

    let rendered = if options.pretty {
        output::to_filter_string_pretty(&expr)
    } else {
        output::to_filter_string(&expr)
    };
    Ok(CheckResult {
        rendered,
        validated,
    })
}

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The filter to evaluate
    pub filter: String,
    /// JSON object holding one respondent record
    pub input: Option<String>,
}

/// Evaluate a filter against a single JSON record
pub fn execute_eval(options: &EvalOptions) -> Result<bool, CliError> {
    let expr = parse(&options.filter).map_err(|e| CliError::parse(&options.filter, e))?;

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let record = json_to_record(serde_json::from_str(json_str)?)?;

    Ok(evaluate(&expr, &record)?)
}
