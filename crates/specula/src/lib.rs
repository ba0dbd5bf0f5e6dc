//! Specula - Composable, storage-agnostic specifications over Rust entities.
//!
//! A specification describes *which* entities a caller wants, independent of
//! where they live. It supports:
//!
//! - A predicate tree over one entity parameter, evaluated in memory or
//!   handed to a query source for translation
//! - `and`, `or` and `not` combinators that stay valid across independently
//!   built specifications
//! - Eager-load hints, typed or dotted
//! - Up to two ordering keys
//! - Pagination applied after filtering and ordering
//!
//! # Quick Start
//!
//! ```rust
//! use specula::{evaluate_paginated, Entity, MemorySource, Number, QuerySource, Spec, Specification, Value};
//!
//! struct Player {
//!     name: String,
//!     segment: String,
//!     level: u32,
//! }
//!
//! impl Entity for Player {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::from(self.name.as_str()),
//!             "segment" => Value::from(self.segment.as_str()),
//!             "level" => Value::Number(Number::from(self.level)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let players = vec![
//!     Player { name: "ana".into(), segment: "VIP".into(), level: 30 },
//!     Player { name: "bo".into(), segment: "casual".into(), level: 12 },
//!     Player { name: "cy".into(), segment: "VIP".into(), level: 7 },
//! ];
//!
//! let vip = Spec::<Player>::build(|it| it.field("segment").eq("VIP"));
//! let veteran = Spec::<Player>::build(|it| it.field("level").gte(10));
//!
//! let listing = Spec::from_specification(&vip.or(veteran)).order_by_descending("level");
//!
//! let page = evaluate_paginated(MemorySource::new(&players), &listing, 1, 2)?.fetch()?;
//! let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["ana", "bo"]);
//! # Ok::<(), specula::SpecError>(())
//! ```
//!
//! # Composition
//!
//! Every specification is built over its own parameter. [`And`] and [`Or`]
//! rebind both operands onto one fresh parameter before joining the trees,
//! so the result always has a single parameter no matter how the operands
//! were built. [`Not`] wraps its operand unchanged. Combinators carry the
//! filter only; layer includes and ordering back on with
//! [`Spec::from_specification`].
//!
//! # Evaluation
//!
//! | Step | Source call |
//! |------|-------------|
//! | Filter | `filter(predicate)` |
//! | Includes, in order | `include(path)` |
//! | Primary ordering | `order_by(key)` |
//! | Secondary ordering (only with a primary) | `then_by(key)` |
//! | Page window | `skip((n - 1) * size)`, `take(size)` |

pub mod criteria;
mod entity;
mod error;
mod evaluator;
mod include;
mod literal;
mod memory;
mod op;
mod ordering;
mod page;
pub mod predicate;
mod source;
mod spec;
mod value;

// Re-export public API
pub use entity::{Entity, EntityEnum, EntityTimestamp, Relation};
pub use error::{Result, SpecError};
pub use evaluator::{evaluate, evaluate_paginated, SpecificationEvaluator};
pub use include::{Include, RelationPath};
pub use literal::Literal;
pub use memory::MemorySource;
pub use op::{ArithOp, CompareOp, Func};
pub use ordering::{compare_values, total_order, Dir, OrderKey, SortOrder};
pub use page::{Page, PaginationConfig};
pub use predicate::{Expr, Param, ParamId, Predicate, Projection};
pub use source::QuerySource;
pub use spec::{And, Not, Or, Spec, Specification};
pub use value::{Number, Timestamp, Value, MILLIS_PER_DAY};
