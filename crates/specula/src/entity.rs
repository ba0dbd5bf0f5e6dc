//! Traits an entity type implements to be queried.
//!
//! This module provides the [`Entity`] trait, which is implemented by the
//! `#[derive(Entity)]` macro to give predicates field access, plus the
//! [`EntityEnum`] and [`EntityTimestamp`] helpers the derive relies on and
//! the [`Relation`] handle used for typed include paths.

use std::fmt;
use std::marker::PhantomData;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::include::RelationPath;
use crate::value::{Timestamp, Value};

/// A type whose fields can be read by a predicate.
///
/// Usually derived with `#[derive(Entity)]` from the `specula-macros` crate,
/// but can also be implemented by hand.
///
/// # Derive Usage
///
/// ```ignore
/// use specula::{Entity, Predicate};
/// use specula_macros::Entity;
///
/// #[derive(Entity)]
/// struct Player {
///     #[entity(String)]
///     segment: String,
///     #[entity(Number)]
///     level: u32,
///     #[entity(relation)]
///     guild: Option<Guild>,
/// }
///
/// let vip = Predicate::build(|it| it.field(Player::SEGMENT).eq("VIP"));
/// let include = Player::GUILD.path();
/// ```
///
/// # Manual Implementation
///
/// ```
/// use specula::{Entity, Number, Value};
///
/// struct Player {
///     email: String,
///     level: u32,
/// }
///
/// impl Entity for Player {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "email" => Value::from(self.email.as_str()),
///             "level" => Value::Number(Number::from(self.level)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Entity {
    /// Returns the value of a field, or [`Value::None`] if the field doesn't
    /// exist or is not queryable.
    fn field_value(&self, field: &str) -> Value<'_>;
}

impl<T: Entity + ?Sized> Entity for &T {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

/// Converts an enum to a stable discriminant.
///
/// Used by the derive macro for fields marked `#[entity(Enum)]`. Use
/// explicit values rather than declaration order so stored specifications
/// keep their meaning when variants are added.
pub trait EntityEnum {
    fn entity_discriminant(&self) -> u32;
}

/// Converts a datetime type to a [`Timestamp`].
///
/// Used by the derive macro for fields marked `#[entity(Timestamp)]`.
pub trait EntityTimestamp {
    fn entity_timestamp(&self) -> Timestamp;
}

impl EntityTimestamp for Timestamp {
    fn entity_timestamp(&self) -> Timestamp {
        *self
    }
}

impl EntityTimestamp for i64 {
    fn entity_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl EntityTimestamp for u64 {
    fn entity_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl EntityTimestamp for SystemTime {
    fn entity_timestamp(&self) -> Timestamp {
        let millis = match self.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis())
                .map(|m| -m)
                .unwrap_or(i64::MIN),
        };
        Timestamp::from_millis(millis)
    }
}

/// Typed handle to a navigation property of `T`.
///
/// Generated as an associated constant by `#[entity(relation)]`, so an
/// include written against it is checked by the compiler.
pub struct Relation<T> {
    name: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Relation<T> {
    pub const fn new(name: &'static str) -> Self {
        Relation {
            name,
            _entity: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The include path this relation stands for.
    pub fn path(&self) -> RelationPath {
        RelationPath::new(short_type_name::<T>(), self.name)
    }
}

impl<T> Clone for Relation<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Relation<T> {}

impl<T> fmt::Debug for Relation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("entity", &short_type_name::<T>())
            .field("name", &self.name)
            .finish()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
