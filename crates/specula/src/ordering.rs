//! Ordering types for result sorting.
//!
//! Provides [`Dir`] for sort direction, [`OrderKey`] for a single key and
//! [`SortOrder`] for the two-level (primary, secondary) ordering a
//! specification can declare.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::Result;
use crate::predicate::Projection;
use crate::value::{Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ordering key: a projection of the entity plus a direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderKey {
    selector: Projection,
    dir: Dir,
}

impl OrderKey {
    /// Creates an ordering key with the given direction.
    pub fn new(selector: impl Into<Projection>, dir: Dir) -> Self {
        OrderKey {
            selector: selector.into(),
            dir,
        }
    }

    /// Creates an ascending ordering key.
    pub fn asc(selector: impl Into<Projection>) -> Self {
        OrderKey::new(selector, Dir::Asc)
    }

    /// Creates a descending ordering key.
    pub fn desc(selector: impl Into<Projection>) -> Self {
        OrderKey::new(selector, Dir::Desc)
    }

    /// The projection sorted on.
    pub fn selector(&self) -> &Projection {
        &self.selector
    }

    /// The sort direction.
    pub fn dir(&self) -> Dir {
        self.dir
    }

    /// Reads this key's sort value from an entity.
    pub fn key_of<'a, T: Entity>(&'a self, entity: &'a T) -> Result<Value<'a>> {
        self.selector.evaluate(entity)
    }

    /// Compares two key values according to this key's direction.
    ///
    /// Uses [`total_order`], so any two values compare.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        self.dir.apply(total_order(a, b))
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.selector, self.dir)
    }
}

/// Up to two ordering keys declared by a specification.
///
/// The secondary key is only a tie-breaker: it is never applied unless a
/// primary key is present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortOrder {
    primary: Option<OrderKey>,
    secondary: Option<OrderKey>,
}

impl SortOrder {
    /// An ordering that imposes nothing.
    pub const fn unordered() -> Self {
        SortOrder {
            primary: None,
            secondary: None,
        }
    }

    /// Replaces the primary key.
    pub fn with_primary(mut self, key: OrderKey) -> Self {
        self.primary = Some(key);
        self
    }

    /// Replaces the secondary key.
    pub fn with_secondary(mut self, key: OrderKey) -> Self {
        self.secondary = Some(key);
        self
    }

    /// The primary key, if any.
    pub fn primary(&self) -> Option<&OrderKey> {
        self.primary.as_ref()
    }

    /// The secondary key as declared, whether or not it will be applied.
    pub fn secondary(&self) -> Option<&OrderKey> {
        self.secondary.as_ref()
    }

    /// Returns `true` when no primary key is set.
    pub fn is_unordered(&self) -> bool {
        self.primary.is_none()
    }

    /// The keys that take effect, primary first.
    pub fn effective_keys(&self) -> impl Iterator<Item = &OrderKey> {
        let secondary = self.primary.as_ref().and(self.secondary.as_ref());
        self.primary.iter().chain(secondary)
    }
}

/// Compares two values of the same type.
///
/// Returns `None` if the types don't match or comparison is not possible (NaN).
/// Predicates use this; sorting uses [`total_order`].
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some((**a).cmp(&**b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        // None values sort last
        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

/// Orders any two values, for sorting.
///
/// Values of the same kind compare naturally. Across kinds the rank is
/// strings, numbers, timestamps, enums, booleans, then missing values. A NaN
/// ranks with the missing values, so both sort last in ascending order.
pub fn total_order(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    let (rank_a, rank_b) = (sort_rank(a), sort_rank(b));
    if rank_a != rank_b || rank_a == MISSING_RANK {
        return rank_a.cmp(&rank_b);
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .compare(*y)
            .unwrap_or_else(|| x.to_f64().total_cmp(&y.to_f64())),
        _ => compare_values(a, b).unwrap_or(Ordering::Equal),
    }
}

const MISSING_RANK: u8 = 5;

fn sort_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::String(_) => 0,
        Value::Number(Number::F64(n)) if n.is_nan() => MISSING_RANK,
        Value::Number(_) => 1,
        Value::Timestamp(_) => 2,
        Value::Enum(_) => 3,
        Value::Bool(_) => 4,
        Value::None => MISSING_RANK,
    }
}

/// Compares two rows of precomputed key values using the given keys.
///
/// Uses the first key as the primary sort key, the second to break ties, and
/// so on.
pub fn compare_key_rows(a: &[Value<'_>], b: &[Value<'_>], keys: &[&OrderKey]) -> Ordering {
    keys.iter()
        .zip(a)
        .zip(b)
        .map(|((key, val_a), val_b)| key.compare(val_a, val_b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
