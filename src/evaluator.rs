use std::{cmp::Ordering, collections::HashMap};

use thiserror::Error;

use crate::{
    ast::{CompareOp, Expr},
    value::Literal,
};

/// Errors that can occur while evaluating a filter against a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The record has no value for a variable the filter references
    #[error("record has no value for '{0}'")]
    MissingVariable(String),

    /// Integer compared with string, or an unsupported record value
    #[error("type mismatch for '{variable}': {message}")]
    TypeMismatch { variable: String, message: String },
}

/// Supplies variable values for one respondent record.
pub trait VariableSource {
    /// Looks up the value of `name`; `Ok(None)` when the record lacks it.
    fn lookup(&self, name: &str) -> Result<Option<Literal>, EvalError>;
}

impl VariableSource for HashMap<String, Literal> {
    fn lookup(&self, name: &str) -> Result<Option<Literal>, EvalError> {
        Ok(self.get(name).cloned())
    }
}

/// JSON records: integers and strings only.
impl VariableSource for serde_json::Map<String, serde_json::Value> {
    fn lookup(&self, name: &str) -> Result<Option<Literal>, EvalError> {
        match self.get(name) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(s)) => Ok(Some(Literal::String(s.clone()))),
            Some(serde_json::Value::Number(n)) => n
                .as_i64()
                .map(|n| Some(Literal::Integer(n)))
                .ok_or_else(|| EvalError::TypeMismatch {
                    variable: name.to_string(),
                    message: format!("{} is not an integer", n),
                }),
            Some(other) => Err(EvalError::TypeMismatch {
                variable: name.to_string(),
                message: format!("unsupported record value {}", other),
            }),
        }
    }
}

fn compare(variable: &str, left: &Literal, right: &Literal) -> Result<Ordering, EvalError> {
    match (left, right) {
        (Literal::Integer(a), Literal::Integer(b)) => Ok(a.cmp(b)),
        (Literal::String(a), Literal::String(b)) => Ok(a.cmp(b)),
        (a, b) => Err(EvalError::TypeMismatch {
            variable: variable.to_string(),
            message: format!("cannot compare {} value {} with {}", a.kind(), a, b),
        }),
    }
}

fn fetch(record: &impl VariableSource, variable: &str) -> Result<Literal, EvalError> {
    record
        .lookup(variable)?
        .ok_or_else(|| EvalError::MissingVariable(variable.to_string()))
}

/// Evaluates a filter against a single record.
///
/// `AND` and `OR` short-circuit left to right, so a variable referenced only
/// on the untaken side of a combinator does not need to be present.
///
/// # Examples
///
/// ```
/// use crossweb_filter::{evaluate, parse, Literal};
/// use std::collections::HashMap;
///
/// let mut respondent = HashMap::new();
/// respondent.insert("sex".to_string(), Literal::Integer(1));
/// respondent.insert("ageGroup".to_string(), Literal::Integer(4));
///
/// let filter = parse("sex = 1 AND ageGroup = 4").unwrap();
/// assert!(evaluate(&filter, &respondent).unwrap());
/// ```
pub fn evaluate(expr: &Expr, record: &impl VariableSource) -> Result<bool, EvalError> {
    match expr {
        Expr::Comparison {
            variable,
            op,
            value,
        } => {
            let actual = fetch(record, variable)?;
            let ordering = compare(variable, &actual, value)?;
            Ok(match op {
                CompareOp::Equal => ordering == Ordering::Equal,
                CompareOp::NotEqual => ordering != Ordering::Equal,
                CompareOp::LessThan => ordering == Ordering::Less,
                CompareOp::GreaterThan => ordering == Ordering::Greater,
                CompareOp::LessEqual => ordering != Ordering::Greater,
                CompareOp::GreaterEqual => ordering != Ordering::Less,
            })
        }
        Expr::Membership { variable, values } => {
            let actual = fetch(record, variable)?;
            for candidate in values {
                if compare(variable, &actual, candidate)? == Ordering::Equal {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Expr::And { left, right } => Ok(evaluate(left, record)? && evaluate(right, record)?),
        Expr::Or { left, right } => Ok(evaluate(left, record)? || evaluate(right, record)?),
        Expr::Group(inner) => evaluate(inner, record),
    }
}

impl Expr {
    /// Shorthand for [`evaluate`].
    pub fn matches(&self, record: &impl VariableSource) -> Result<bool, EvalError> {
        evaluate(self, record)
    }
}
