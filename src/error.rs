use thiserror::Error;

use crate::{
    ast::Expr,
    parser::{ParseError, parse},
    schema::Schema,
    validator::{ValidationError, validate},
};

/// Local, non-retryable problems with a filter. The caller has to change
/// the filter text; resubmitting it unchanged fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Parses `input` and validates the tree against `schema`.
pub fn parse_validated(input: &str, schema: &Schema) -> Result<Expr, FilterError> {
    let expr = parse(input)?;
    validate(&expr, schema)?;
    Ok(expr)
}
