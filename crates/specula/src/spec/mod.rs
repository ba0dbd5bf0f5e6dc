//! Specifications: named, composable selection criteria for an entity type.
//!
//! A [`Specification`] wraps a [`Predicate`] together with the eager-load
//! hints and ordering a listing needs. Small specifications combine with
//! [`and`](Specification::and), [`or`](Specification::or) and
//! [`not`](Specification::not) into new ones without touching their operands.
//!
//! [`Spec`] is the value form: it owns a predicate, an include list and a
//! [`SortOrder`], and is what callers build when they need more than a bare
//! filter.
//!
//! ```
//! use specula::{Entity, Spec, Specification, Value};
//!
//! struct Player { segment: &'static str }
//!
//! impl Entity for Player {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "segment" => Value::from(self.segment),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let vip = Spec::<Player>::build(|it| it.field("segment").eq("VIP"));
//! let not_vip = vip.clone().not();
//!
//! assert!(vip.is_satisfied_by(&Player { segment: "VIP" }));
//! assert!(not_vip.is_satisfied_by(&Player { segment: "casual" }));
//! ```

mod combinators;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::warn;

pub use combinators::{And, Not, Or};

use crate::entity::Entity;
use crate::error::Result;
use crate::include::Include;
use crate::ordering::{OrderKey, SortOrder};
use crate::predicate::{Expr, Param, Predicate, Projection};

static UNORDERED: SortOrder = SortOrder::unordered();

/// Selection criteria over entities of type `T`.
pub trait Specification<T: Entity> {
    /// The filter this specification stands for.
    fn to_predicate(&self) -> Predicate;

    /// Eager-load hints, in declaration order.
    fn includes(&self) -> &[Include] {
        &[]
    }

    fn ordering(&self) -> &SortOrder {
        &UNORDERED
    }

    /// Tests one entity in memory.
    ///
    /// Agrees with the in-memory evaluator whenever the predicate evaluates.
    /// They differ only on an evaluation error, which the evaluator returns
    /// from `fetch` but this method logs at `warn` and reports as `false`.
    /// The one such error is a body reading a parameter other than its own,
    /// for example an outer [`Param`] captured by a nested
    /// [`Predicate::build`]. Use [`try_satisfied_by`] to get the error.
    ///
    /// [`try_satisfied_by`]: Specification::try_satisfied_by
    fn is_satisfied_by(&self, entity: &T) -> bool {
        match self.try_satisfied_by(entity) {
            Ok(satisfied) => satisfied,
            Err(err) => {
                warn!(error = %err, "specification could not be evaluated");
                false
            }
        }
    }

    /// Tests one entity in memory, returning evaluation errors as the
    /// evaluator does.
    fn try_satisfied_by(&self, entity: &T) -> Result<bool> {
        self.to_predicate().evaluate(entity)
    }

    /// Entities satisfying both `self` and `other`.
    fn and<S>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        And::new(self, other)
    }

    /// Entities satisfying `self`, `other`, or both.
    fn or<S>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        Or::new(self, other)
    }

    /// Entities not satisfying `self`.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not::new(self)
    }
}

impl<T: Entity, S: Specification<T> + ?Sized> Specification<T> for &S {
    fn to_predicate(&self) -> Predicate {
        (**self).to_predicate()
    }

    fn includes(&self) -> &[Include] {
        (**self).includes()
    }

    fn ordering(&self) -> &SortOrder {
        (**self).ordering()
    }

    /// Tests one entity in memory, returning evaluation errors as the
    /// evaluator does.
    fn try_satisfied_by(&self, entity: &T) -> Result<bool> {
        (**self).try_satisfied_by(entity)
    }
}

impl<T: Entity, S: Specification<T> + ?Sized> Specification<T> for Box<S> {
    fn to_predicate(&self) -> Predicate {
        (**self).to_predicate()
    }

    fn includes(&self) -> &[Include] {
        (**self).includes()
    }

    fn ordering(&self) -> &SortOrder {
        (**self).ordering()
    }

    /// Tests one entity in memory, returning evaluation errors as the
    /// evaluator does.
    fn try_satisfied_by(&self, entity: &T) -> Result<bool> {
        (**self).try_satisfied_by(entity)
    }
}

impl<T: Entity, S: Specification<T> + ?Sized> Specification<T> for Arc<S> {
    fn to_predicate(&self) -> Predicate {
        (**self).to_predicate()
    }

    fn includes(&self) -> &[Include] {
        (**self).includes()
    }

    fn ordering(&self) -> &SortOrder {
        (**self).ordering()
    }

    /// Tests one entity in memory, returning evaluation errors as the
    /// evaluator does.
    fn try_satisfied_by(&self, entity: &T) -> Result<bool> {
        (**self).try_satisfied_by(entity)
    }
}

/// A specification held as a value: predicate, includes and ordering.
pub struct Spec<T> {
    predicate: Predicate,
    includes: Vec<Include>,
    ordering: SortOrder,
    _entity: PhantomData<fn(&T) -> bool>,
}

impl<T: Entity> Spec<T> {
    pub fn new(predicate: Predicate) -> Self {
        Spec {
            predicate,
            includes: Vec::new(),
            ordering: SortOrder::unordered(),
            _entity: PhantomData,
        }
    }

    /// Builds the predicate from a closure over the entity parameter.
    pub fn build(f: impl FnOnce(&Param) -> Expr) -> Self {
        Spec::new(Predicate::build(f))
    }

    /// Matches every entity.
    pub fn all() -> Self {
        Spec::new(Predicate::always())
    }

    /// Captures any specification as a value, keeping its includes and
    /// ordering.
    ///
    /// Combinators drop both, so this is how a composite gets them back:
    ///
    /// ```ignore
    /// let listing = Spec::from_specification(&vip.and(active))
    ///     .order_by_descending("last_login");
    /// ```
    pub fn from_specification<S: Specification<T>>(spec: &S) -> Self {
        Spec {
            predicate: spec.to_predicate(),
            includes: spec.includes().to_vec(),
            ordering: spec.ordering().clone(),
            _entity: PhantomData,
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Adds an eager-load hint. Duplicates are kept.
    pub fn include(mut self, include: impl Into<Include>) -> Self {
        self.includes.push(include.into());
        self
    }

    /// Adds a dotted eager-load path such as `"guild.members"`.
    pub fn include_path(self, path: impl Into<String>) -> Result<Self> {
        Ok(self.include(Include::named(path)?))
    }

    /// Sets the primary ordering, ascending. Replaces any earlier primary.
    pub fn order_by(mut self, selector: impl Into<Projection>) -> Self {
        self.ordering = self.ordering.with_primary(OrderKey::asc(selector));
        self
    }

    /// Sets the primary ordering, descending. Replaces any earlier primary.
    pub fn order_by_descending(mut self, selector: impl Into<Projection>) -> Self {
        self.ordering = self.ordering.with_primary(OrderKey::desc(selector));
        self
    }

    /// Sets the tie-breaking ordering, ascending.
    pub fn then_by(mut self, selector: impl Into<Projection>) -> Self {
        self.ordering = self.ordering.with_secondary(OrderKey::asc(selector));
        self
    }

    /// Sets the tie-breaking ordering, descending.
    pub fn then_by_descending(mut self, selector: impl Into<Projection>) -> Self {
        self.ordering = self.ordering.with_secondary(OrderKey::desc(selector));
        self
    }
}

impl<T: Entity> Specification<T> for Spec<T> {
    fn to_predicate(&self) -> Predicate {
        self.predicate.clone()
    }

    fn includes(&self) -> &[Include] {
        &self.includes
    }

    fn ordering(&self) -> &SortOrder {
        &self.ordering
    }

    /// Tests one entity in memory, returning evaluation errors as the
    /// evaluator does.
    fn try_satisfied_by(&self, entity: &T) -> Result<bool> {
        self.predicate.evaluate(entity)
    }
}

impl<T> Clone for Spec<T> {
    fn clone(&self) -> Self {
        Spec {
            predicate: self.predicate.clone(),
            includes: self.includes.clone(),
            ordering: self.ordering.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Spec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spec")
            .field("predicate", &self.predicate)
            .field("includes", &self.includes)
            .field("ordering", &self.ordering)
            .finish()
    }
}
