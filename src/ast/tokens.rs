use std::fmt;

use crate::value::Literal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Literals
    /// Integer, optionally negative
    ///
    /// # Examples
    /// ```text
    /// 1
    /// 1067
    /// -3
    /// ```
    Integer(i64),

    /// String literal enclosed in single or double quotes
    ///
    /// # Examples
    /// ```text
    /// 'Moscow'
    /// "web desktop"
    /// ```
    String(String),

    // Identifiers
    /// Variable name
    ///
    /// Must start with a letter, followed by letters or digits.
    ///
    /// # Examples
    /// ```text
    /// sex
    /// ageGroup
    /// crossMediaResourceId
    /// ```
    Identifier(String),

    // Comparison
    /// Equality operator (`=`)
    Eq,

    /// Inequality operator (`!=`)
    NotEq,

    /// Less than
    Lt,

    /// Greater than
    Gt,

    /// Less than or equal
    LtEq,

    /// Greater than or equal
    GtEq,

    // Keywords
    /// Logical AND (uppercase keyword)
    ///
    /// # Examples
    /// ```text
    /// sex = 1 AND ageGroup = 4
    /// ```
    And,

    /// Logical OR (uppercase keyword)
    ///
    /// # Examples
    /// ```text
    /// (sex = 1 AND ageGroup = 2) OR (sex = 2 AND ageGroup = 3)
    /// ```
    Or,

    /// Set membership (uppercase keyword)
    ///
    /// # Examples
    /// ```text
    /// ageGroup IN (3, 4, 5)
    /// ```
    In,

    // Delimiters
    /// Left parenthesis for grouping or membership lists
    LParen,

    /// Right parenthesis
    RParen,

    /// Comma separating membership literals
    Comma,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "{}", Literal::String(s.clone())),
            Token::Identifier(name) => f.write_str(name),
            Token::Eq => f.write_str("="),
            Token::NotEq => f.write_str("!="),
            Token::Lt => f.write_str("<"),
            Token::Gt => f.write_str(">"),
            Token::LtEq => f.write_str("<="),
            Token::GtEq => f.write_str(">="),
            Token::And => f.write_str("AND"),
            Token::Or => f.write_str("OR"),
            Token::In => f.write_str("IN"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

/// A token together with the character offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}
