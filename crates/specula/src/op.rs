//! Operators that can appear in a predicate tree.
//!
//! [`CompareOp`] covers comparisons, [`ArithOp`] binary arithmetic and
//! [`Func`] the small set of built-in calls. Not all operators are valid for
//! all value types; an inapplicable comparison simply does not match.

use std::cmp::Ordering;
use std::fmt;

use crate::ordering::compare_values;
use crate::value::Value;

/// Comparison operator.
///
/// Operators are grouped by the types they support:
/// - **Ordering**: `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte` - strings, numbers,
///   timestamps (enums and bools only support `Eq`/`Ne`)
/// - **String**: `StartsWith`, `EndsWith`, `Contains`, `Matches`
/// - **Membership**: `In` - right-hand side is a list literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// String starts with prefix.
    StartsWith,
    /// String ends with suffix.
    EndsWith,
    /// String contains substring.
    Contains,
    /// String matches regular expression.
    Matches,
    /// Value is one of the given set.
    In,
}

impl CompareOp {
    /// Returns `true` for operators decided by an [`Ordering`].
    pub fn is_ordering_op(self) -> bool {
        matches!(
            self,
            CompareOp::Eq
                | CompareOp::Ne
                | CompareOp::Gt
                | CompareOp::Gte
                | CompareOp::Lt
                | CompareOp::Lte
        )
    }

    /// Returns `true` if this operator is valid for string comparisons.
    pub fn is_string_op(self) -> bool {
        self.is_ordering_op()
            || matches!(
                self,
                CompareOp::StartsWith | CompareOp::EndsWith | CompareOp::Contains | CompareOp::Matches
            )
    }

    /// Returns `true` if this operator is valid for enum and bool values.
    pub fn is_equality_op(self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::Ne)
    }

    /// Evaluates a comparison given an ordering result.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Gte => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Compares two scalar values.
    ///
    /// A `None` operand never matches, not even for `Ne`. Type mismatches
    /// and NaN never match. `Matches` and `In` need their literal operand
    /// and are decided by the interpreter, so they return `false` here.
    pub fn test(self, left: &Value<'_>, right: &Value<'_>) -> bool {
        if left.is_none() || right.is_none() {
            return false;
        }

        match (left, right) {
            (Value::String(field), Value::String(pattern)) if !self.is_ordering_op() => {
                match self {
                    CompareOp::StartsWith => field.starts_with(&**pattern),
                    CompareOp::EndsWith => field.ends_with(&**pattern),
                    CompareOp::Contains => field.contains(&**pattern),
                    _ => false,
                }
            }
            (Value::Enum(_), _) | (Value::Bool(_), _) if !self.is_equality_op() => false,
            _ if self.is_ordering_op() => compare_values(left, right)
                .map(|ordering| self.eval_ordering(ordering))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Returns the display symbol of this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::StartsWith => "starts_with",
            CompareOp::EndsWith => "ends_with",
            CompareOp::Contains => "contains",
            CompareOp::Matches => "matches",
            CompareOp::In => "in",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    /// Returns the display symbol of this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Built-in function callable from a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    /// Lowercases a string.
    Lower,
    /// Uppercases a string.
    Upper,
    /// Strips leading and trailing whitespace.
    Trim,
    /// Length of a string in characters.
    Length,
    /// `true` when the argument is absent.
    IsNone,
}

impl Func {
    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        1
    }

    /// Returns the name used when rendering the function.
    pub fn name(self) -> &'static str {
        match self {
            Func::Lower => "lower",
            Func::Upper => "upper",
            Func::Trim => "trim",
            Func::Length => "length",
            Func::IsNone => "is_none",
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
