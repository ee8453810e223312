use crate::ast::{Spanned, Token};
use crate::parser::ParseError;

/// Character-level scanner for filter strings.
///
/// Positions are 0-based character offsets into the input.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    let escape_at = self.position;
                    self.advance();
                    match self.current_char() {
                        Some(c @ ('\\' | '\'' | '"')) => result.push(c),
                        Some(c) => {
                            return Err(ParseError::InvalidEscape {
                                found: c,
                                position: escape_at,
                            });
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(ParseError::UnterminatedString {
            fragment: self.input[start..].iter().collect(),
            position: start,
        })
    }

    fn read_integer(&mut self) -> Result<Token, ParseError> {
        let start = self.position;
        let mut number = String::new();

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        number
            .parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| ParseError::IntegerOverflow {
                found: number,
                position: start,
            })
    }

    /// Consumes `len` characters and yields `token`.
    fn single(&mut self, token: Token, len: usize) -> Token {
        self.position += len;
        token
    }

    fn unknown_operator(&self, len: usize) -> ParseError {
        let end = (self.position + len).min(self.input.len());
        ParseError::UnknownOperator {
            found: self.input[self.position..end].iter().collect(),
            position: self.position,
        }
    }

    pub fn next_token(&mut self) -> Result<Spanned, ParseError> {
        self.skip_whitespace();
        let position = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('(') => self.single(Token::LParen, 1),
            Some(')') => self.single(Token::RParen, 1),
            Some(',') => self.single(Token::Comma, 1),
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    return Err(self.unknown_operator(2));
                }
                self.single(Token::Eq, 1)
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.single(Token::NotEq, 2)
                } else {
                    return Err(self.unknown_operator(1));
                }
            }
            Some('<') => match self.peek_char(1) {
                Some('=') => self.single(Token::LtEq, 2),
                Some('>') => return Err(self.unknown_operator(2)),
                _ => self.single(Token::Lt, 1),
            },
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.single(Token::GtEq, 2)
                } else {
                    self.single(Token::Gt, 1)
                }
            }
            Some(q @ ('\'' | '"')) => Token::String(self.read_string(q)?),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_integer()?
            }
            Some(ch) if ch.is_ascii_digit() => self.read_integer()?,
            Some(ch) if ch.is_ascii_alphabetic() => {
                let ident = self.read_identifier();

                match ident.as_str() {
                    "AND" => Token::And,
                    "OR" => Token::Or,
                    "IN" => Token::In,
                    _ => Token::Identifier(ident),
                }
            }
            Some(ch) => {
                return Err(ParseError::UnexpectedCharacter {
                    found: ch,
                    position,
                });
            }
        };

        Ok(Spanned { token, position })
    }

    /// Scans the whole input, ending with a single `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("AND OR IN and");
    assert_eq!(lexer.next_token().unwrap().token, Token::And);
    assert_eq!(lexer.next_token().unwrap().token, Token::Or);
    assert_eq!(lexer.next_token().unwrap().token, Token::In);
    assert_eq!(
        lexer.next_token().unwrap().token,
        Token::Identifier("and".to_string())
    );
}

#[test]
fn test_membership_tokens() {
    let mut lexer = Lexer::new("ageGroup IN (3, 4)");
    assert_eq!(
        lexer.next_token().unwrap().token,
        Token::Identifier("ageGroup".to_string())
    );
    assert_eq!(lexer.next_token().unwrap().token, Token::In);
    assert_eq!(lexer.next_token().unwrap().token, Token::LParen);
    assert_eq!(lexer.next_token().unwrap().token, Token::Integer(3));
    assert_eq!(lexer.next_token().unwrap().token, Token::Comma);
    assert_eq!(lexer.next_token().unwrap().token, Token::Integer(4));
    assert_eq!(lexer.next_token().unwrap().token, Token::RParen);
    assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
}
