//! Fluent construction of filter expressions.
//!
//! Composing trees through these helpers instead of concatenating strings
//! keeps filters well-formed: operator spelling, quoting and parenthesization
//! are handled by the serializer.
//!
//! ```
//! use crossweb_filter::builder::{all_of, var};
//!
//! let not_managers = var("ageGroup")
//!     .is_in([3, 4, 5])
//!     .and(var("occupation").ne(1));
//! assert_eq!(not_managers.to_string(), "ageGroup IN (3, 4, 5) AND occupation != 1");
//!
//! let adults = all_of([var("age").ge(20), var("age").le(56)]).unwrap();
//! assert_eq!(adults.to_string(), "age >= 20 AND age <= 56");
//! ```

use crate::{
    ast::{CompareOp, Expr, LogicalOp},
    value::Literal,
};

/// Handle on a named variable; each method yields a leaf expression.
#[derive(Debug, Clone)]
pub struct Var {
    name: String,
}

/// Starts an expression on the variable `name`.
pub fn var(name: impl Into<String>) -> Var {
    Var { name: name.into() }
}

impl Var {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn compare(&self, op: CompareOp, value: impl Into<Literal>) -> Expr {
        Expr::Comparison {
            variable: self.name.clone(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(&self, value: impl Into<Literal>) -> Expr {
        self.compare(CompareOp::Equal, value)
    }

    pub fn ne(&self, value: impl Into<Literal>) -> Expr {
        self.compare(CompareOp::NotEqual, value)
    }

    pub fn gt(&self, value: impl Into<Literal>) -> Expr {
        self.compare(CompareOp::GreaterThan, value)
    }

    pub fn lt(&self, value: impl Into<Literal>) -> Expr {
        self.compare(CompareOp::LessThan, value)
    }

    pub fn ge(&self, value: impl Into<Literal>) -> Expr {
        self.compare(CompareOp::GreaterEqual, value)
    }

    pub fn le(&self, value: impl Into<Literal>) -> Expr {
        self.compare(CompareOp::LessEqual, value)
    }

    /// `name IN (...)`. An empty list builds a tree that validation rejects.
    pub fn is_in<L: Into<Literal>>(&self, values: impl IntoIterator<Item = L>) -> Expr {
        Expr::Membership {
            variable: self.name.clone(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl Expr {
    pub fn and(self, other: Expr) -> Expr {
        Expr::logical(LogicalOp::And, self, other)
    }

    pub fn or(self, other: Expr) -> Expr {
        Expr::logical(LogicalOp::Or, self, other)
    }

    /// Wraps the expression in explicit parentheses.
    pub fn group(self) -> Expr {
        Expr::Group(Box::new(self))
    }
}

fn fold(op: LogicalOp, exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    exprs
        .into_iter()
        .reduce(|acc, next| Expr::logical(op, acc, next))
}

/// Left-deep AND chain; `None` when `exprs` is empty.
pub fn all_of(exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    fold(LogicalOp::And, exprs)
}

/// Left-deep OR chain; `None` when `exprs` is empty.
pub fn any_of(exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    fold(LogicalOp::Or, exprs)
}
