//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is what an entity hands back when a predicate reads one
//! of its fields, and what every node of the predicate AST evaluates to.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Runtime value for comparison.
///
/// Strings are borrowed from the entity whenever possible. Computed values
/// (for example the result of `lower(name)`) are owned.
///
/// # Example
///
/// ```
/// use specula::{Entity, Number, Value};
///
/// struct Player {
///     segment: String,
///     level: u32,
/// }
///
/// impl Entity for Player {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "segment" => Value::from(self.segment.as_str()),
///             "level" => Value::Number(Number::from(self.level)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value.
    String(Cow<'a, str>),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Enum discriminant value.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Missing, null or unsupported.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` only for `Bool(true)`.
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    /// The string contents, for `String` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Detaches the value from the entity it was read from.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
            Value::Number(n) => Value::Number(n),
            Value::Timestamp(t) => Value::Timestamp(t),
            Value::Enum(d) => Value::Enum(d),
            Value::Bool(b) => Value::Bool(b),
            Value::None => Value::None,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Timestamp> for Value<'_> {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision.
/// Comparisons and arithmetic between different variants fall back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `false` for NaN and infinities.
    pub fn is_finite(self) -> bool {
        self.to_f64().is_finite()
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (Number::U64(a), Number::I64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Adds two numbers. Integer overflow yields `None`.
    pub fn checked_add(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.checked_add(b).map(Number::I64),
            (Number::U64(a), Number::U64(b)) => a.checked_add(b).map(Number::U64),
            _ => Some(Number::F64(self.to_f64() + other.to_f64())),
        }
    }

    /// Subtracts `other` from `self`. Integer overflow yields `None`.
    pub fn checked_sub(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.checked_sub(b).map(Number::I64),
            (Number::U64(a), Number::U64(b)) if a >= b => Some(Number::U64(a - b)),
            (Number::U64(a), Number::U64(b)) => {
                let (a, b) = (i64::try_from(a).ok()?, i64::try_from(b).ok()?);
                a.checked_sub(b).map(Number::I64)
            }
            _ => Some(Number::F64(self.to_f64() - other.to_f64())),
        }
    }

    /// Multiplies two numbers. Integer overflow yields `None`.
    pub fn checked_mul(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.checked_mul(b).map(Number::I64),
            (Number::U64(a), Number::U64(b)) => a.checked_mul(b).map(Number::U64),
            _ => Some(Number::F64(self.to_f64() * other.to_f64())),
        }
    }

    /// Divides `self` by `other`. Integer division truncates; dividing an
    /// integer by zero yields `None`.
    pub fn checked_div(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.checked_div(b).map(Number::I64),
            (Number::U64(a), Number::U64(b)) => a.checked_div(b).map(Number::U64),
            _ => Some(Number::F64(self.to_f64() / other.to_f64())),
        }
    }

    /// Interprets the number as whole milliseconds, for timestamp arithmetic.
    pub fn as_millis(self) -> Option<i64> {
        match self {
            Number::I64(n) => Some(n),
            Number::U64(n) => i64::try_from(n).ok(),
            Number::F64(n) if n.is_finite() => Some(n as i64),
            Number::F64(_) => None,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// Timezone-agnostic and totally ordered. Convert from your datetime type
/// of choice through [`EntityTimestamp`](crate::EntityTimestamp).
///
/// ```
/// use specula::Timestamp;
///
/// let now = Timestamp::from_secs(1_700_000_000);
/// assert!(now.minus_days(30) < now);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current wall-clock time.
    ///
    /// Clocks set before the epoch read as the epoch itself.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Timestamp(millis)
    }

    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }

    /// The instant `days` whole days before this one.
    pub fn minus_days(self, days: i64) -> Self {
        Timestamp(self.0.saturating_sub(days.saturating_mul(MILLIS_PER_DAY)))
    }

    /// The instant `days` whole days after this one.
    pub fn plus_days(self, days: i64) -> Self {
        Timestamp(self.0.saturating_add(days.saturating_mul(MILLIS_PER_DAY)))
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}
