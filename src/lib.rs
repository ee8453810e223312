pub mod ast;
pub mod builder;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod schema;
pub mod task;
pub mod validator;
pub mod value;

pub use ast::{CompareOp, Expr, LogicalOp, Token};
pub use catalog::{Catalog, CatalogError};
pub use error::{FilterError, parse_validated};
pub use evaluator::{EvalError, VariableSource, evaluate};
pub use lexer::Lexer;
pub use output::{to_filter_string, to_filter_string_pretty};
pub use parser::{ParseError, Parser, parse};
pub use schema::{Domain, Schema, Variable};
pub use validator::{ValidationError, Violation, check_structure, validate};
pub use value::{Literal, LiteralKind};
