//! Eager-load hints carried by a specification.

use std::fmt;

use crate::error::{Result, SpecError};

/// A navigation property reached through a typed [`Relation`](crate::Relation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationPath {
    entity: &'static str,
    name: &'static str,
}

impl RelationPath {
    pub(crate) fn new(entity: &'static str, name: &'static str) -> Self {
        RelationPath { entity, name }
    }

    /// Short name of the entity type that owns the relation.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// One eager-load hint.
///
/// Typed includes come from generated relation constants; named includes are
/// dotted paths such as `"guild.members"` for nested relations the type
/// system does not describe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Include {
    Typed(RelationPath),
    Named(String),
}

impl Include {
    /// A dotted include path. Every segment must be non-empty.
    pub fn named(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(SpecError::invalid_argument("path", "include path is empty"));
        }
        if path.split('.').any(|segment| segment.trim().is_empty()) {
            return Err(SpecError::invalid_argument(
                "path",
                format!("include path '{path}' has an empty segment"),
            ));
        }
        Ok(Include::Named(path))
    }

    /// The path as a dotted string.
    pub fn path(&self) -> String {
        match self {
            Include::Typed(relation) => relation.name.to_string(),
            Include::Named(path) => path.clone(),
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Include::Typed(_))
    }
}

impl From<RelationPath> for Include {
    fn from(path: RelationPath) -> Self {
        Include::Typed(path)
    }
}

impl<T> From<crate::entity::Relation<T>> for Include {
    fn from(relation: crate::entity::Relation<T>) -> Self {
        Include::Typed(relation.path())
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Include::Typed(relation) => write!(f, "{}::{}", relation.entity, relation.name),
            Include::Named(path) => write!(f, "{path}"),
        }
    }
}
