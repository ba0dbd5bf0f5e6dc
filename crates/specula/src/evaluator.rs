//! Applies a specification to a query source.
//!
//! The evaluator layers the parts of a specification onto a
//! [`QuerySource`] in a fixed order:
//!
//! 1. filter by the predicate
//! 2. every include, in declaration order
//! 3. the primary ordering, then the secondary one if a primary exists
//! 4. the page window, if any
//!
//! Paging last means page boundaries are computed over the fully filtered,
//! fully ordered result, so consecutive pages neither overlap nor skip rows.
//! The evaluator reads nothing itself; the returned source is unexecuted.

use tracing::{debug, trace};

use crate::entity::Entity;
use crate::error::Result;
use crate::page::Page;
use crate::source::QuerySource;
use crate::spec::Specification;

/// Drives a [`QuerySource`] from a [`Specification`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificationEvaluator;

impl SpecificationEvaluator {
    /// Applies filter, includes and ordering.
    pub fn apply<T, Q, S>(source: Q, spec: &S) -> Q
    where
        T: Entity,
        Q: QuerySource<T>,
        S: Specification<T> + ?Sized,
    {
        let predicate = spec.to_predicate();
        let ordering = spec.ordering();
        debug!(
            predicate = %predicate,
            fields = ?predicate.field_names(),
            includes = spec.includes().len(),
            ordered = !ordering.is_unordered(),
            "applying specification"
        );

        let mut source = source.filter(&predicate);
        for include in spec.includes() {
            trace!(include = %include, "include");
            source = source.include(include);
        }

        let mut keys = ordering.effective_keys();
        if let Some(primary) = keys.next() {
            trace!(key = %primary, "order by");
            source = source.order_by(primary);
            for key in keys {
                trace!(key = %key, "then by");
                source = source.then_by(key);
            }
        }
        source
    }

    /// Applies the specification, then the page window.
    pub fn apply_paginated<T, Q, S>(source: Q, spec: &S, page: Page) -> Q
    where
        T: Entity,
        Q: QuerySource<T>,
        S: Specification<T> + ?Sized,
    {
        let source = Self::apply(source, spec);
        debug!(
            page = page.number(),
            size = page.size(),
            skip = page.skip(),
            "applying page window"
        );
        source.skip(page.skip()).take(page.take())
    }
}

/// Applies `spec` to `source` and returns the unexecuted query.
pub fn evaluate<T, Q, S>(source: Q, spec: &S) -> Q
where
    T: Entity,
    Q: QuerySource<T>,
    S: Specification<T> + ?Sized,
{
    SpecificationEvaluator::apply(source, spec)
}

/// Like [`evaluate`], restricted to one 1-based page.
///
/// Fails with [`SpecError::InvalidPage`](crate::SpecError::InvalidPage) if
/// either value is zero; out-of-range values are never clamped.
pub fn evaluate_paginated<T, Q, S>(
    source: Q,
    spec: &S,
    page_number: usize,
    page_size: usize,
) -> Result<Q>
where
    T: Entity,
    Q: QuerySource<T>,
    S: Specification<T> + ?Sized,
{
    let page = Page::new(page_number, page_size)?;
    Ok(SpecificationEvaluator::apply_paginated(source, spec, page))
}
