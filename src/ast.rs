//! # Filter Expression Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for audience filter
//! expressions: boolean predicates over catalog variables that select a
//! socio-demographic, geographic or media segment.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (comparisons, membership, AND/OR, groups)
//! - **[operators]** - Comparison operators and boolean combinators
//!
//! ## Quick Start
//!
//! ```text
//! sex = 1 AND ageGroup = 4
//! ```
//!
//! Selects men aged 35-44: `sex` code 1 and `ageGroup` code 4.
//!
//! ## Core Concepts
//!
//! ### Leaves
//!
//! - **Comparison** `var op literal` with `=`, `!=`, `>`, `<`, `>=`, `<=`
//! - **Membership** `var IN (a, b, c)`
//!
//! ### Combinators
//!
//! `AND` and `OR` are uppercase keywords. A chain of one combinator
//! associates left to right. Mixing them requires parentheses:
//!
//! ```text
//! sex = 1 OR ageGroup = 4 AND occupation = 1      // rejected
//! sex = 1 OR (ageGroup = 4 AND occupation = 1)    // accepted
//! ```
//!
//! ## Examples
//!
//! ### Age range
//!
//! ```text
//! age >= 20 AND age <= 56
//! ```
//!
//! ### Two segments
//!
//! ```text
//! (sex = 1 AND ageGroup = 2) OR (sex = 2 AND ageGroup = 3)
//! ```
//!
//! ### Membership with exclusion
//!
//! ```text
//! ageGroup IN (3, 4, 5) AND occupation != 1
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{CompareOp, LogicalOp};
pub use tokens::{Spanned, Token};
