//! Filter string serialization.
//!
//! This module renders expression trees back into the filter grammar, in a
//! canonical single-line form or a pretty multi-line form. Both outputs
//! re-parse into a tree that prints identically.
//!
//! # Features
//!
//! - **Canonical output** via [`to_filter_string()`] - the form embedded in task descriptors
//! - **Pretty output** via [`to_filter_string_pretty()`] - groups split over indented lines
//! - **Explicit groups** - `Group` nodes always print their parentheses
//! - **Implicit groups** - an AND chain nested directly under OR (or the
//!   reverse) is parenthesized so the output never mixes combinators
//!
//! # Examples
//!
//! ```
//! use crossweb_filter::builder::var;
//! use crossweb_filter::output::{to_filter_string, to_filter_string_pretty};
//!
//! let men = var("sex").eq(1).and(var("ageGroup").eq(2));
//! let women = var("sex").eq(2).and(var("ageGroup").eq(3));
//! let expr = men.or(women);
//!
//! assert_eq!(
//!     to_filter_string(&expr),
//!     "(sex = 1 AND ageGroup = 2) OR (sex = 2 AND ageGroup = 3)"
//! );
//! assert_eq!(
//!     to_filter_string_pretty(&expr),
//!     "(\n  sex = 1 AND ageGroup = 2\n) OR (\n  sex = 2 AND ageGroup = 3\n)"
//! );
//! ```

use crate::ast::{Expr, LogicalOp};

pub struct FilterPrinter {
    pretty: bool,
}

impl FilterPrinter {
    pub fn new(pretty: bool) -> Self {
        FilterPrinter { pretty }
    }

    pub fn print(&self, expr: &Expr) -> String {
        self.print_expr(expr, 0)
    }

    fn print_expr(&self, expr: &Expr, indent: usize) -> String {
        match expr {
            Expr::Comparison {
                variable,
                op,
                value,
            } => format!("{} {} {}", variable, op, value),
            Expr::Membership { variable, values } => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                format!("{} IN ({})", variable, items.join(", "))
            }
            Expr::And { left, right } => self.print_chain(LogicalOp::And, left, right, indent),
            Expr::Or { left, right } => self.print_chain(LogicalOp::Or, left, right, indent),
            Expr::Group(inner) => self.print_group(inner, indent),
        }
    }

    fn print_chain(&self, op: LogicalOp, left: &Expr, right: &Expr, indent: usize) -> String {
        format!(
            "{} {} {}",
            self.print_operand(op, left, indent),
            op,
            self.print_operand(op, right, indent)
        )
    }

    /// Operands of the other combinator get parentheses.
    fn print_operand(&self, parent: LogicalOp, operand: &Expr, indent: usize) -> String {
        match operand.logical_op() {
            Some(op) if op != parent => self.print_group(operand, indent),
            _ => self.print_expr(operand, indent),
        }
    }

    fn print_group(&self, inner: &Expr, indent: usize) -> String {
        if self.pretty {
            format!(
                "(\n{}{}\n{})",
                self.indent(indent + 1),
                self.print_expr(inner, indent + 1),
                self.indent(indent)
            )
        } else {
            format!("({})", self.print_expr(inner, indent))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

/// Renders the canonical single-line filter string.
///
/// The same tree always yields the same string, and parsing that string
/// yields a tree that renders identically.
pub fn to_filter_string(expr: &Expr) -> String {
    FilterPrinter::new(false).print(expr)
}

/// Renders a multi-line filter string with 2-space indentation per group
/// level.
pub fn to_filter_string_pretty(expr: &Expr) -> String {
    FilterPrinter::new(true).print(expr)
}
