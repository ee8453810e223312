use std::mem;

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{CompareOp, Expr, LogicalOp, Spanned, Token},
    lexer::Lexer,
    value::Literal,
};

/// Syntax errors. All of them are fatal: the parser does not recover.
///
/// Positions are 0-based character offsets into the filter string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected {found} at position {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        position: usize,
    },

    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { found: char, position: usize },

    #[error("unknown operator '{found}' at position {position}")]
    UnknownOperator { found: String, position: usize },

    #[error("keywords are uppercase (AND, OR, IN): found '{found}' at position {position}")]
    LowercaseKeyword { found: String, position: usize },

    #[error("unterminated string starting at position {position}")]
    UnterminatedString { fragment: String, position: usize },

    #[error("invalid escape sequence '\\{found}' at position {position}")]
    InvalidEscape { found: char, position: usize },

    #[error("unterminated group: '(' at position {position} is never closed")]
    UnterminatedGroup { position: usize },

    #[error("empty membership list for '{variable}' at position {position}")]
    EmptyMembershipList { variable: String, position: usize },

    #[error(
        "ambiguous precedence: '{found}' at position {position} mixes AND and OR without parentheses"
    )]
    AmbiguousPrecedence { found: String, position: usize },

    #[error("integer literal '{found}' at position {position} is out of range")]
    IntegerOverflow { found: String, position: usize },

    #[error("'(' at position {position} nests deeper than {} levels", MAX_NESTING_DEPTH)]
    NestingTooDeep { position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedCharacter { position, .. }
            | ParseError::UnknownOperator { position, .. }
            | ParseError::LowercaseKeyword { position, .. }
            | ParseError::UnterminatedString { position, .. }
            | ParseError::InvalidEscape { position, .. }
            | ParseError::UnterminatedGroup { position }
            | ParseError::EmptyMembershipList { position, .. }
            | ParseError::AmbiguousPrecedence { position, .. }
            | ParseError::IntegerOverflow { position, .. } => *position,
            ParseError::NestingTooDeep { position } => *position,
        }
    }

    /// The offending piece of input.
    pub fn fragment(&self) -> String {
        match self {
            ParseError::UnexpectedToken { found, .. }
            | ParseError::UnknownOperator { found, .. }
            | ParseError::LowercaseKeyword { found, .. }
            | ParseError::AmbiguousPrecedence { found, .. }
            | ParseError::IntegerOverflow { found, .. } => found.clone(),
            ParseError::UnterminatedString { fragment, .. } => fragment.clone(),
            ParseError::UnexpectedCharacter { found, .. } => found.to_string(),
            ParseError::InvalidEscape { found, .. } => format!("\\{}", found),
            ParseError::UnterminatedGroup { .. } | ParseError::NestingTooDeep { .. } => {
                "(".to_string()
            }
            ParseError::EmptyMembershipList { variable, .. } => format!("{} IN ()", variable),
        }
    }
}

/// Maximum number of open parentheses around any term.
pub const MAX_NESTING_DEPTH: usize = 64;

fn is_keyword_spelling(word: &str) -> bool {
    ["AND", "OR", "IN"]
        .iter()
        .any(|kw| word.eq_ignore_ascii_case(kw))
}

/// Recursive-descent parser over the token stream.
///
/// `AND` and `OR` chains are parsed in a single loop: the first combinator
/// seen at a nesting level fixes the kind for that level, and a different
/// combinator at the same level is rejected instead of being given an
/// implicit precedence.
pub struct Parser {
    lexer: Lexer,
    current: Spanned,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current.token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match &self.current.token {
            Token::Identifier(word) if is_keyword_spelling(word) => ParseError::LowercaseKeyword {
                found: word.clone(),
                position: self.current.position,
            },
            token => ParseError::UnexpectedToken {
                found: match token {
                    Token::Eof | Token::String(_) => token.to_string(),
                    _ => format!("'{}'", token),
                },
                expected,
                position: self.current.position,
            },
        }
    }

    /// Parses a complete filter; trailing input is an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if self.check(&Token::Eof) {
            Ok(expr)
        } else {
            Err(self.unexpected("AND, OR or end of input"))
        }
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        let mut chain: Option<LogicalOp> = None;

        loop {
            let op = match &self.current.token {
                Token::And => LogicalOp::And,
                Token::Or => LogicalOp::Or,
                _ => break,
            };
            if chain.is_some_and(|existing| existing != op) {
                return Err(ParseError::AmbiguousPrecedence {
                    found: op.keyword().to_string(),
                    position: self.current.position,
                });
            }
            chain = Some(op);

            self.advance()?;
            let right = self.parse_term()?;
            left = Expr::logical(op, left, right);
        }
        Ok(left)
    }

    /// Parse terms: comparison, membership, or a parenthesized group
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let position = self.current.position;
        match mem::replace(&mut self.current.token, Token::Eof) {
            Token::LParen => {
                if self.depth == MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep { position });
                }
                self.depth += 1;
                self.advance()?;
                let inner = self.parse_expression()?;
                self.depth -= 1;
                match self.current.token {
                    Token::RParen => self.advance()?,
                    Token::Eof => return Err(ParseError::UnterminatedGroup { position }),
                    _ => return Err(self.unexpected("')', AND or OR")),
                }
                Ok(Expr::Group(Box::new(inner)))
            }
            Token::Identifier(variable) => {
                self.advance()?;
                self.parse_predicate(variable)
            }
            token => {
                self.current.token = token;
                Err(self.unexpected("a comparison, a membership test or '('"))
            }
        }
    }

    fn parse_predicate(&mut self, variable: String) -> Result<Expr, ParseError> {
        let op = match &self.current.token {
            Token::Eq => CompareOp::Equal,
            Token::NotEq => CompareOp::NotEqual,
            Token::Lt => CompareOp::LessThan,
            Token::Gt => CompareOp::GreaterThan,
            Token::LtEq => CompareOp::LessEqual,
            Token::GtEq => CompareOp::GreaterEqual,
            Token::In => return self.parse_membership(variable),
            Token::Identifier(word) if !is_keyword_spelling(word) => {
                return Err(ParseError::UnknownOperator {
                    found: word.clone(),
                    position: self.current.position,
                });
            }
            _ => return Err(self.unexpected("a comparison operator or IN")),
        };

        self.advance()?;
        let value = self.parse_literal()?;
        Ok(Expr::Comparison {
            variable,
            op,
            value,
        })
    }

    fn parse_membership(&mut self, variable: String) -> Result<Expr, ParseError> {
        let in_position = self.current.position;
        self.advance()?; // IN

        if !self.check(&Token::LParen) {
            return Err(self.unexpected("'(' after IN"));
        }
        let open = self.current.position;
        self.advance()?;

        if self.check(&Token::RParen) {
            return Err(ParseError::EmptyMembershipList {
                variable,
                position: in_position,
            });
        }

        let mut values = vec![];
        loop {
            values.push(self.parse_literal()?);

            match self.current.token {
                Token::Comma => self.advance()?,
                Token::RParen => {
                    self.advance()?;
                    break;
                }
                Token::Eof => return Err(ParseError::UnterminatedGroup { position: open }),
                _ => return Err(self.unexpected("',' or ')'")),
            }
        }

        Ok(Expr::Membership { variable, values })
    }

    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        match mem::replace(&mut self.current.token, Token::Eof) {
            Token::Integer(n) => {
                self.advance()?;
                Ok(Literal::Integer(n))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Literal::String(s))
            }
            token => {
                self.current.token = token;
                Err(self.unexpected("an integer or a quoted string"))
            }
        }
    }
}

/// Parses a filter string into an expression tree.
///
/// # Examples
///
/// ```
/// use crossweb_filter::{parse, Expr};
///
/// let expr = parse("sex = 1 AND ageGroup = 4").unwrap();
/// assert!(matches!(expr, Expr::And { .. }));
/// assert_eq!(expr.to_string(), "sex = 1 AND ageGroup = 4");
/// ```
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    debug!(chars = input.chars().count(), "parsing filter expression");
    let mut parser = Parser::new(Lexer::new(input))?;
    parser.parse().inspect_err(|e| debug!(error = %e, "filter expression rejected"))
}
