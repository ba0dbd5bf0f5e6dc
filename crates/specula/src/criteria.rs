//! Reusable single-field criteria.
//!
//! Each criterion is a small factory: its arguments are checked once, at
//! construction, and it then always produces the same predicate. Each is
//! generic over the [`Entity`] it reads and is meant to be wrapped by named,
//! domain-specific specifications.
//!
//! ```
//! use specula::criteria::{AtLeast, FieldEquals};
//! use specula::{Entity, Number, Specification, Value};
//!
//! struct Player { segment: &'static str, level: u32 }
//!
//! impl Entity for Player {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "segment" => Value::from(self.segment),
//!             "level" => Value::Number(Number::from(self.level)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let vip_veterans = FieldEquals::new("segment", "VIP")?.and(AtLeast::new("level", 20)?);
//! assert!(vip_veterans.is_satisfied_by(&Player { segment: "VIP", level: 25 }));
//! assert!(!vip_veterans.is_satisfied_by(&Player { segment: "VIP", level: 3 }));
//! # Ok::<(), specula::SpecError>(())
//! ```

use std::fmt;
use std::marker::PhantomData;

use regex::Regex;

use crate::entity::Entity;
use crate::error::{Result, SpecError};
use crate::literal::Literal;
use crate::predicate::Predicate;
use crate::spec::Specification;
use crate::value::{Number, Timestamp};

fn field_name(field: impl Into<String>) -> Result<String> {
    let field = field.into();
    if field.trim().is_empty() {
        return Err(SpecError::invalid_argument("field", "field name is empty"));
    }
    Ok(field)
}

macro_rules! criterion_impls {
    ($name:ident { $($field:ident),+ }) => {
        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                $name {
                    $($field: self.$field.clone(),)+
                    _entity: PhantomData,
                }
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    $(.field(stringify!($field), &self.$field))+
                    .finish()
            }
        }
    };
}

/// The field equals a constant.
pub struct FieldEquals<T> {
    field: String,
    value: Literal,
    _entity: PhantomData<fn(&T) -> bool>,
}

criterion_impls!(FieldEquals { field, value });

impl<T: Entity> FieldEquals<T> {
    /// Fails on an empty field name, an empty string value, or a null value.
    pub fn new(field: impl Into<String>, value: impl Into<Literal>) -> Result<Self> {
        let field = field_name(field)?;
        let value = value.into();
        match &value {
            Literal::Null => {
                return Err(SpecError::invalid_argument("value", "value is null"));
            }
            Literal::String(s) if s.trim().is_empty() => {
                return Err(SpecError::invalid_argument("value", "value is empty"));
            }
            Literal::List(_) | Literal::Regex(_) => {
                return Err(SpecError::invalid_argument(
                    "value",
                    "equality needs a scalar value",
                ));
            }
            _ => {}
        }
        Ok(FieldEquals {
            field,
            value,
            _entity: PhantomData,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &Literal {
        &self.value
    }
}

impl<T: Entity> Specification<T> for FieldEquals<T> {
    fn to_predicate(&self) -> Predicate {
        Predicate::build(|it| it.field(self.field.as_str()).eq(self.value.clone()))
    }
}

/// Case-insensitive string equality.
pub struct FieldEqualsIgnoreCase<T> {
    field: String,
    lowered: String,
    _entity: PhantomData<fn(&T) -> bool>,
}

criterion_impls!(FieldEqualsIgnoreCase { field, lowered });

impl<T: Entity> FieldEqualsIgnoreCase<T> {
    pub fn new(field: impl Into<String>, value: impl AsRef<str>) -> Result<Self> {
        let field = field_name(field)?;
        let value = value.as_ref();
        if value.trim().is_empty() {
            return Err(SpecError::invalid_argument("value", "value is empty"));
        }
        Ok(FieldEqualsIgnoreCase {
            field,
            lowered: value.to_lowercase(),
            _entity: PhantomData,
        })
    }
}

impl<T: Entity> Specification<T> for FieldEqualsIgnoreCase<T> {
    fn to_predicate(&self) -> Predicate {
        Predicate::build(|it| it.field(self.field.as_str()).lower().eq(self.lowered.as_str()))
    }
}

/// A numeric field is at least a threshold.
pub struct AtLeast<T> {
    field: String,
    threshold: Number,
    _entity: PhantomData<fn(&T) -> bool>,
}

criterion_impls!(AtLeast { field, threshold });

impl<T: Entity> AtLeast<T> {
    /// Fails on NaN or infinite thresholds.
    pub fn new(field: impl Into<String>, threshold: impl Into<Number>) -> Result<Self> {
        let field = field_name(field)?;
        let threshold = threshold.into();
        if !threshold.is_finite() {
            return Err(SpecError::invalid_argument(
                "threshold",
                "threshold must be a finite number",
            ));
        }
        Ok(AtLeast {
            field,
            threshold,
            _entity: PhantomData,
        })
    }

    pub fn threshold(&self) -> Number {
        self.threshold
    }
}

impl<T: Entity> Specification<T> for AtLeast<T> {
    fn to_predicate(&self) -> Predicate {
        Predicate::build(|it| it.field(self.field.as_str()).gte(self.threshold))
    }
}

/// A timestamp field falls within the last `days` days.
///
/// The cutoff is fixed when the criterion is built, so one value answers
/// the same way no matter when it is evaluated.
pub struct ActiveWithin<T> {
    field: String,
    cutoff: Timestamp,
    _entity: PhantomData<fn(&T) -> bool>,
}

criterion_impls!(ActiveWithin { field, cutoff });

impl<T: Entity> ActiveWithin<T> {
    /// Active within `days` days of now.
    pub fn new(field: impl Into<String>, days: i64) -> Result<Self> {
        Self::as_of(field, days, Timestamp::now())
    }

    /// Active within `days` days of `now`.
    pub fn as_of(field: impl Into<String>, days: i64, now: Timestamp) -> Result<Self> {
        let field = field_name(field)?;
        if days < 0 {
            return Err(SpecError::invalid_argument(
                "days",
                format!("expected a non-negative day count, got {days}"),
            ));
        }
        Ok(ActiveWithin {
            field,
            cutoff: now.minus_days(days),
            _entity: PhantomData,
        })
    }

    /// The earliest timestamp that still counts as active.
    pub fn cutoff(&self) -> Timestamp {
        self.cutoff
    }
}

impl<T: Entity> Specification<T> for ActiveWithin<T> {
    fn to_predicate(&self) -> Predicate {
        Predicate::build(|it| it.field(self.field.as_str()).gte(self.cutoff))
    }
}

/// A string field matches a regular expression.
pub struct FieldMatches<T> {
    field: String,
    regex: Regex,
    _entity: PhantomData<fn(&T) -> bool>,
}

criterion_impls!(FieldMatches { field, regex });

impl<T: Entity> FieldMatches<T> {
    /// Fails with [`SpecError::InvalidRegex`] if `pattern` does not compile.
    pub fn new(field: impl Into<String>, pattern: &str) -> Result<Self> {
        let field = field_name(field)?;
        let regex = Regex::new(pattern)?;
        Ok(FieldMatches {
            field,
            regex,
            _entity: PhantomData,
        })
    }
}

impl<T: Entity> Specification<T> for FieldMatches<T> {
    fn to_predicate(&self) -> Predicate {
        Predicate::build(|it| it.field(self.field.as_str()).matches(self.regex.clone()))
    }
}
