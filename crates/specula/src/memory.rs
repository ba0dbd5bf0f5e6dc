//! In-memory query source over a slice.

use tracing::trace;

use crate::entity::Entity;
use crate::error::{Result, SpecError};
use crate::include::Include;
use crate::ordering::{compare_key_rows, OrderKey};
use crate::predicate::Predicate;
use crate::source::QuerySource;
use crate::value::Value;

#[derive(Debug, Clone)]
enum Stage {
    Filter(Predicate),
    Sort(Vec<OrderKey>),
    Skip(usize),
    Take(usize),
}

/// A [`QuerySource`] over borrowed entities.
///
/// Instructions are recorded and replayed by [`fetch`](QuerySource::fetch).
/// Sorting is stable, so rows that compare equal on every key keep their
/// slice order. Includes have nothing to load in memory; they are kept so
/// callers and tests can see what was requested.
#[derive(Debug, Clone)]
pub struct MemorySource<'a, T> {
    items: &'a [T],
    stages: Vec<Stage>,
    includes: Vec<Include>,
}

impl<'a, T: Entity> MemorySource<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        MemorySource {
            items,
            stages: Vec::new(),
            includes: Vec::new(),
        }
    }

    /// The include hints applied so far, in order.
    pub fn includes(&self) -> &[Include] {
        &self.includes
    }

    /// Number of rows [`fetch`](QuerySource::fetch) would return.
    pub fn count(self) -> Result<usize> {
        Ok(self.run()?.len())
    }

    /// The first row, if any.
    pub fn first(self) -> Result<Option<&'a T>> {
        Ok(self.take(1).run()?.into_iter().next())
    }

    fn run(self) -> Result<Vec<&'a T>> {
        let mut rows: Vec<&'a T> = self.items.iter().collect();
        for stage in &self.stages {
            match stage {
                Stage::Filter(predicate) => {
                    let mut kept = Vec::with_capacity(rows.len());
                    for row in rows {
                        if predicate.evaluate(row)? {
                            kept.push(row);
                        }
                    }
                    rows = kept;
                }
                Stage::Sort(keys) => rows = sort_rows(rows, keys)?,
                Stage::Skip(count) => {
                    rows.drain(..(*count).min(rows.len()));
                }
                Stage::Take(count) => rows.truncate(*count),
            }
        }
        Ok(rows)
    }
}

fn sort_rows<'a, T: Entity>(rows: Vec<&'a T>, keys: &[OrderKey]) -> Result<Vec<&'a T>> {
    let key_refs: Vec<&OrderKey> = keys.iter().collect();
    let mut keyed: Vec<(Vec<Value<'static>>, &'a T)> = Vec::with_capacity(rows.len());
    for row in rows {
        let values = keys
            .iter()
            .map(|key| key.key_of(row).map(Value::into_owned))
            .collect::<Result<Vec<_>>>()?;
        keyed.push((values, row));
    }
    keyed.sort_by(|(a, _), (b, _)| compare_key_rows(a, b, &key_refs));
    Ok(keyed.into_iter().map(|(_, row)| row).collect())
}

impl<'a, T: Entity> QuerySource<T> for MemorySource<'a, T> {
    type Item = &'a T;
    type Error = SpecError;

    fn filter(mut self, predicate: &Predicate) -> Self {
        self.stages.push(Stage::Filter(predicate.clone()));
        self
    }

    fn include(mut self, include: &Include) -> Self {
        trace!(include = %include, "recording include on in-memory source");
        self.includes.push(include.clone());
        self
    }

    fn order_by(mut self, key: &OrderKey) -> Self {
        self.stages.push(Stage::Sort(vec![key.clone()]));
        self
    }

    fn then_by(mut self, key: &OrderKey) -> Self {
        match self.stages.last_mut() {
            Some(Stage::Sort(keys)) => keys.push(key.clone()),
            _ => self.stages.push(Stage::Sort(vec![key.clone()])),
        }
        self
    }

    fn skip(mut self, count: usize) -> Self {
        self.stages.push(Stage::Skip(count));
        self
    }

    fn take(mut self, count: usize) -> Self {
        self.stages.push(Stage::Take(count));
        self
    }

    fn fetch(self) -> Result<Vec<&'a T>> {
        self.run()
    }
}
