//! Build task descriptors and shape raw results

use std::path::PathBuf;

use super::{CliError, read_json_rows};
use crate::{
    Expr, Schema, parse,
    task::{ReportType, Table, TaskDescriptor, shape_result},
};

/// Options for the task command
#[derive(Debug, Clone)]
pub struct TaskOptions {
    pub report_type: ReportType,
    pub name: String,
    /// Periods written as `FROM:TO`
    pub dates: Vec<String>,
    pub usage_types: Vec<u32>,
    pub geo: Option<String>,
    pub demo: Option<String>,
    pub media: Option<String>,
    pub slices: Vec<String>,
    pub statistics: Vec<String>,
    /// Catalog snapshot to validate the filters against
    pub schema: Option<PathBuf>,
}

fn parse_optional(filter: Option<&String>) -> Result<Option<Expr>, CliError> {
    filter
        .map(|f| parse(f).map_err(|e| CliError::parse(f, e)))
        .transpose()
}

/// Assemble a descriptor and render its JSON request body
pub fn execute_task(options: &TaskOptions) -> Result<serde_json::Value, CliError> {
    let mut builder = TaskDescriptor::builder(options.report_type, options.name.clone())
        .usage_types(options.usage_types.iter().copied())
        .slices(options.slices.iter().cloned())
        .statistics(options.statistics.iter().cloned());

    for period in &options.dates {
        let (from, to) = period.split_once(':').ok_or_else(|| {
            CliError::InvalidInput(format!("period '{}' is not written as FROM:TO", period))
        })?;
        builder = builder.date_range(from.trim(), to.trim());
    }

    if let Some(expr) = parse_optional(options.geo.as_ref())? {
        builder = builder.geo_filter(expr);
    }
    if let Some(expr) = parse_optional(options.demo.as_ref())? {
        builder = builder.demo_filter(expr);
    }
    if let Some(expr) = parse_optional(options.media.as_ref())? {
        builder = builder.media_filter(expr);
    }

    let descriptor = builder.build()?;
    if let Some(path) = &options.schema {
        descriptor.validate_filters(&Schema::load(path)?)?;
    }
    Ok(descriptor.to_json())
}

/// Options for the shape command
#[derive(Debug, Clone, Default)]
pub struct ShapeOptions {
    /// Raw rows as JSON
    pub input: Option<String>,
    pub slices: Vec<String>,
    /// Display label placed in the first column
    pub label: String,
}

/// Flatten raw result rows into a table
pub fn execute_shape(options: &ShapeOptions) -> Result<Table, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let rows = read_json_rows(json_str)?;
    Ok(shape_result(&rows, &options.slices, &options.label)?)
}
