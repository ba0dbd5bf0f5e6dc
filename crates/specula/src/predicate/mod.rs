//! Predicate trees, traversal, and in-memory evaluation.
//!
//! - [`ast`]: the [`Expr`] node type and its builders
//! - [`fold`]: the [`Fold`]/[`Visit`] traversals and parameter rebinding
//! - [`Predicate`] and [`Projection`]: single-parameter lambdas

pub mod ast;
pub mod fold;
mod interpret;
mod lambda;

pub use ast::{Expr, Param, ParamId};
pub use fold::{bind, fold_expr, visit_expr, FieldNames, Fold, FreeParams, ParameterRebinder, Visit};
pub use lambda::{Predicate, Projection};
