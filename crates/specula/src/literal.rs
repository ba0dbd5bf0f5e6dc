//! Owned constants stored inside predicate trees.
//!
//! Unlike [`Value`], which borrows from the entity being inspected, a
//! [`Literal`] owns its data so it can live in a specification that is built
//! once and reused across requests.

use std::fmt;

use regex::Regex;

use crate::value::{Number, Timestamp, Value};

/// Constant operand of a predicate.
#[derive(Debug, Clone)]
pub enum Literal {
    /// String value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Timestamp value.
    Timestamp(Timestamp),
    /// Single enum discriminant.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
    /// Set of values, the right-hand side of `In`.
    List(Vec<Literal>),
    /// Compiled regular expression, the right-hand side of `Matches`.
    Regex(Regex),
    /// Absent value.
    Null,
}

impl Literal {
    /// Creates an enum literal from a discriminant.
    pub fn enumeration(discriminant: u32) -> Self {
        Literal::Enum(discriminant)
    }

    /// Creates a list literal.
    pub fn list<I, L>(items: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        Literal::List(items.into_iter().map(Into::into).collect())
    }

    /// Borrows this literal as a runtime value.
    ///
    /// Lists and regexes have no scalar form and read as [`Value::None`];
    /// the interpreter handles them directly.
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Literal::String(s) => Value::from(s.as_str()),
            Literal::Number(n) => Value::Number(*n),
            Literal::Timestamp(t) => Value::Timestamp(*t),
            Literal::Enum(d) => Value::Enum(*d),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::List(_) | Literal::Regex(_) | Literal::Null => Value::None,
        }
    }

    /// Returns `true` for [`Literal::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

// Regexes compare by their source pattern.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::String(a), Literal::String(b)) => a == b,
            (Literal::Number(a), Literal::Number(b)) => a == b,
            (Literal::Timestamp(a), Literal::Timestamp(b)) => a == b,
            (Literal::Enum(a), Literal::Enum(b)) => a == b,
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::List(a), Literal::List(b)) => a == b,
            (Literal::Regex(a), Literal::Regex(b)) => a.as_str() == b.as_str(),
            (Literal::Null, Literal::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::Number(Number::I64(n)) => write!(f, "{n}"),
            Literal::Number(Number::U64(n)) => write!(f, "{n}"),
            Literal::Number(Number::F64(n)) => write!(f, "{n}"),
            Literal::Timestamp(t) => write!(f, "@{}", t.as_millis()),
            Literal::Enum(d) => write!(f, "#{d}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Literal::Regex(r) => write!(f, "/{}/", r.as_str()),
            Literal::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<&String> for Literal {
    fn from(s: &String) -> Self {
        Literal::String(s.clone())
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

impl From<Timestamp> for Literal {
    fn from(t: Timestamp) -> Self {
        Literal::Timestamp(t)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<Regex> for Literal {
    fn from(r: Regex) -> Self {
        Literal::Regex(r)
    }
}

impl<L: Into<Literal>> From<Option<L>> for Literal {
    fn from(value: Option<L>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

macro_rules! literal_from_number {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Literal {
                fn from(n: $source) -> Self {
                    Literal::Number(Number::from(n))
                }
            }
        )+
    };
}

literal_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
