//! Local validation of filter expressions against a catalog schema.
//!
//! Validation collects every violation in one pass so a caller can fix a
//! filter in a single round instead of discovering problems one remote
//! submission at a time.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{CompareOp, Expr},
    schema::{Domain, Schema, is_valid_identifier},
    value::{Literal, LiteralKind},
};

/// A single problem found in an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Reported once per distinct name, at its first occurrence.
    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String },

    #[error("'{variable}' takes {expected} values, found {found}")]
    TypeMismatch {
        variable: String,
        expected: LiteralKind,
        found: Literal,
    },

    #[error("{value} is not an allowed value of '{variable}'")]
    ValueOutOfDomain { variable: String, value: Literal },

    #[error("empty membership list for '{variable}'")]
    EmptyMembershipList { variable: String },

    #[error("'{name}' is not a valid variable name")]
    InvalidIdentifier { name: String },
}

/// Every violation found in an expression, in left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid filter: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn unknown_variables(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().filter_map(|v| match v {
            Violation::UnknownVariable { name } => Some(name.as_str()),
            _ => None,
        })
    }
}

struct Validator<'a> {
    schema: Option<&'a Schema>,
    violations: Vec<Violation>,
    reported: HashSet<&'a str>,
}

impl<'a> Validator<'a> {
    fn new(schema: Option<&'a Schema>) -> Self {
        Validator {
            schema,
            violations: Vec::new(),
            reported: HashSet::new(),
        }
    }

    fn visit(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Comparison {
                variable,
                op,
                value,
            } => {
                if let Some(domain) = self.resolve(variable) {
                    // Ordering comparisons against a range may legitimately
                    // reach past its bounds.
                    let check_bounds = !matches!(domain, Domain::Range { .. })
                        || *op == CompareOp::Equal;
                    self.check_literal(variable, domain, value, check_bounds);
                }
            }
            Expr::Membership { variable, values } => {
                if values.is_empty() {
                    self.violations.push(Violation::EmptyMembershipList {
                        variable: variable.clone(),
                    });
                }
                if let Some(domain) = self.resolve(variable) {
                    for value in values {
                        self.check_literal(variable, domain, value, true);
                    }
                }
            }
            Expr::And { left, right } | Expr::Or { left, right } => {
                self.visit(left);
                self.visit(right);
            }
            Expr::Group(inner) => self.visit(inner),
        }
    }

    /// Returns the domain to check literals against, recording name
    /// problems on the way.
    fn resolve(&mut self, name: &'a str) -> Option<&'a Domain> {
        if !is_valid_identifier(name) {
            if self.reported.insert(name) {
                self.violations.push(Violation::InvalidIdentifier {
                    name: name.to_string(),
                });
            }
            return None;
        }

        let schema = self.schema?;
        match schema.get(name) {
            Some(variable) => Some(&variable.domain),
            None => {
                if self.reported.insert(name) {
                    self.violations.push(Violation::UnknownVariable {
                        name: name.to_string(),
                    });
                }
                None
            }
        }
    }

    fn check_literal(&mut self, variable: &str, domain: &Domain, value: &Literal, bounds: bool) {
        if let Some(expected) = domain.expected_kind()
            && expected != value.kind()
        {
            self.violations.push(Violation::TypeMismatch {
                variable: variable.to_string(),
                expected,
                found: value.clone(),
            });
            return;
        }

        if bounds && !domain.contains(value) {
            self.violations.push(Violation::ValueOutOfDomain {
                variable: variable.to_string(),
                value: value.clone(),
            });
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        debug!(violations = self.violations.len(), "filter validated");
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}

/// Validates an expression against a schema.
///
/// Checks variable names, literal kinds, discrete code sets, range bounds
/// (for `=` and `IN` only) and membership lists. The tree is not modified.
///
/// # Examples
///
/// ```
/// use crossweb_filter::{parse, validate};
/// use crossweb_filter::schema::{Domain, Schema, Variable};
///
/// let schema = Schema::from_variables([
///     Variable::new("sex", "Sex", Domain::discrete([1, 2])),
/// ])
/// .unwrap();
///
/// assert!(validate(&parse("sex = 1").unwrap(), &schema).is_ok());
///
/// let err = validate(&parse("sex = 3 AND gender = 1").unwrap(), &schema).unwrap_err();
/// assert_eq!(err.violations.len(), 2);
/// ```
pub fn validate(expr: &Expr, schema: &Schema) -> Result<(), ValidationError> {
    let mut validator = Validator::new(Some(schema));
    validator.visit(expr);
    validator.finish()
}

/// Schema-free checks: empty membership lists and malformed variable names.
///
/// Parsed trees always pass; trees assembled by hand may not.
pub fn check_structure(expr: &Expr) -> Result<(), ValidationError> {
    let mut validator = Validator::new(None);
    validator.visit(expr);
    validator.finish()
}
