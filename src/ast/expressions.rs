use std::fmt;

use crate::ast::{CompareOp, LogicalOp};
use crate::value::Literal;

/// Abstract Syntax Tree node representing a filter expression.
///
/// Trees are immutable once built: combinators take their operands by value
/// and return a new node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Variable compared against a literal
    ///
    /// # Examples
    /// ```text
    /// sex = 1
    /// age >= 20
    /// occupation != 1
    /// ```
    Comparison {
        variable: String,
        op: CompareOp,
        value: Literal,
    },

    /// Set membership
    ///
    /// Equivalent to an OR of equalities, but kept as its own node so it
    /// serializes back to the `IN` form.
    ///
    /// # Example
    /// ```text
    /// ageGroup IN (3, 4, 5)
    /// ```
    Membership {
        variable: String,
        values: Vec<Literal>,
    },

    /// Logical AND
    And { left: Box<Expr>, right: Box<Expr> },

    /// Logical OR
    Or { left: Box<Expr>, right: Box<Expr> },

    /// Explicit parentheses, preserved on serialization
    Group(Box<Expr>),
}

impl Expr {
    /// The combinator of an `And`/`Or` node, `None` for leaves and groups.
    pub fn logical_op(&self) -> Option<LogicalOp> {
        match self {
            Expr::And { .. } => Some(LogicalOp::And),
            Expr::Or { .. } => Some(LogicalOp::Or),
            _ => None,
        }
    }

    /// Builds an `And` or `Or` node for the given combinator.
    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
        let (left, right) = (Box::new(left), Box::new(right));
        match op {
            LogicalOp::And => Expr::And { left, right },
            LogicalOp::Or => Expr::Or { left, right },
        }
    }

    /// Variable names in left-to-right order, repeats included.
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Comparison { variable, .. } | Expr::Membership { variable, .. } => {
                names.push(variable)
            }
            Expr::And { left, right } | Expr::Or { left, right } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Expr::Group(inner) => inner.collect_variables(names),
        }
    }

    /// Strips any number of enclosing `Group` nodes.
    pub fn ungrouped(&self) -> &Expr {
        match self {
            Expr::Group(inner) => inner.ungrouped(),
            other => other,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::output::to_filter_string(self))
    }
}
