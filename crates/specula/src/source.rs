//! The query-source abstraction the evaluator drives.
//!
//! A [`QuerySource`] is a lazily built query over some store: every method
//! records one instruction and hands the source back. Nothing is read until
//! [`fetch`](QuerySource::fetch). The in-memory implementation is
//! [`MemorySource`](crate::MemorySource); a database-backed one would
//! translate the predicate tree into its own query language.

use crate::entity::Entity;
use crate::include::Include;
use crate::ordering::OrderKey;
use crate::predicate::Predicate;

/// A deferred query over entities of type `T`.
///
/// Instructions are applied in call order. The evaluator always calls them
/// as filter, includes, `order_by`, `then_by`, `skip`, `take`.
pub trait QuerySource<T: Entity>: Sized {
    /// What one fetched row looks like.
    type Item;

    /// Failure raised while materializing. The evaluator passes it through
    /// unchanged.
    type Error: std::error::Error + Send + 'static;

    /// Keeps only the entities the predicate accepts.
    fn filter(self, predicate: &Predicate) -> Self;

    /// Requests that a related entity be loaded alongside each row.
    fn include(self, include: &Include) -> Self;

    /// Makes `key` the primary ordering. An earlier ordering only survives
    /// as the relative order of ties.
    fn order_by(self, key: &OrderKey) -> Self;

    /// Breaks ties left by the current ordering.
    fn then_by(self, key: &OrderKey) -> Self;

    /// Drops the first `count` rows.
    fn skip(self, count: usize) -> Self;

    /// Keeps at most `count` rows.
    fn take(self, count: usize) -> Self;

    /// Runs the query.
    fn fetch(self) -> Result<Vec<Self::Item>, Self::Error>;
}
