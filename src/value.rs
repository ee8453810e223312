use std::fmt;

/// A literal operand in a filter expression.
///
/// The grammar only knows integers and quoted strings; catalog codes are
/// integers and free-text variables take strings.
///
/// # Examples
///
/// ```
/// use crossweb_filter::Literal;
///
/// let code = Literal::from(4);
/// let city = Literal::from("Moscow");
///
/// assert_eq!(code.to_string(), "4");
/// assert_eq!(city.to_string(), "'Moscow'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Literal {
    /// Integer number, usually a catalog code
    Integer(i64),

    /// UTF-8 string
    String(String),
}

/// The two literal kinds, used in type-mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    String,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Integer => f.write_str("integer"),
            LiteralKind::String => f.write_str("string"),
        }
    }
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Integer(_) => LiteralKind::Integer,
            Literal::String(_) => LiteralKind::String,
        }
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Integer(n) => Some(*n),
            Literal::String(_) => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            Literal::Integer(_) => None,
        }
    }
}

/// Canonical rendering: integers as-is, strings single-quoted with `\` and
/// `'` escaped.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::String(s) => {
                f.write_str("'")?;
                for ch in s.chars() {
                    match ch {
                        '\\' => f.write_str("\\\\")?,
                        '\'' => f.write_str("\\'")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("'")
            }
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Integer(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Integer(i64::from(n))
    }
}

impl From<u32> for Literal {
    fn from(n: u32) -> Self {
        Literal::Integer(i64::from(n))
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}
