//! Single-parameter lambdas over an entity.

use std::collections::BTreeSet;
use std::fmt;

use super::ast::{Expr, Param, ParamId};
use super::fold::{self, FieldNames, FreeParams, Visit};
use super::interpret::Interpreter;
use crate::entity::Entity;
use crate::error::{Result, SpecError};
use crate::value::Value;

/// A boolean expression over one entity parameter.
///
/// Every parameter node in the body refers to [`Predicate::param`]. The
/// public constructors guarantee it: [`Predicate::build`] only hands out one
/// parameter, and [`Predicate::from_parts`] checks the tree.
///
/// ```
/// use specula::Predicate;
///
/// let vip = Predicate::build(|it| it.field("segment").eq("VIP"));
/// assert!(vip.to_string().ends_with(".segment == \"VIP\")"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    param: ParamId,
    body: Expr,
}

impl Predicate {
    /// Builds a predicate over a fresh parameter.
    pub fn build(f: impl FnOnce(&Param) -> Expr) -> Self {
        let param = Param::new(ParamId::fresh());
        let body = f(&param);
        Predicate {
            param: param.id(),
            body,
        }
    }

    /// Assembles a predicate from a parameter and a body built elsewhere.
    ///
    /// Fails if the body references any other parameter.
    pub fn from_parts(param: ParamId, body: Expr) -> Result<Self> {
        let mut free = FreeParams::default();
        free.visit_expr(&body);
        if let Some(found) = free.params.into_iter().find(|id| *id != param) {
            return Err(SpecError::UnboundParameter {
                found,
                expected: param,
            });
        }
        Ok(Predicate { param, body })
    }

    pub(crate) fn from_bound(param: ParamId, body: Expr) -> Self {
        Predicate { param, body }
    }

    /// The predicate that accepts every entity.
    pub fn always() -> Self {
        Predicate::build(|_| Expr::always())
    }

    pub fn param(&self) -> ParamId {
        self.param
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }

    pub fn into_parts(self) -> (ParamId, Expr) {
        (self.param, self.body)
    }

    /// This predicate rewritten onto `target`. See [`bind`](fold::bind).
    pub fn bind(&self, target: ParamId) -> Predicate {
        fold::bind(self, target)
    }

    /// Every parameter the body reads.
    pub fn free_params(&self) -> BTreeSet<ParamId> {
        let mut free = FreeParams::default();
        free.visit_expr(&self.body);
        free.params
    }

    /// Every field name the body reads, at any depth.
    pub fn field_names(&self) -> BTreeSet<String> {
        let mut fields = FieldNames::default();
        fields.visit_expr(&self.body);
        fields.names
    }

    /// Tests an entity against this predicate.
    pub fn evaluate<T: Entity>(&self, entity: &T) -> Result<bool> {
        let value = Interpreter::new(self.param, entity).eval(&self.body)?;
        Ok(value.is_true())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}| {}", self.param, self.body)
    }
}

/// An expression over one entity parameter that yields a value.
///
/// Used as the selector of an ordering key.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    param: ParamId,
    body: Expr,
}

impl Projection {
    pub fn build(f: impl FnOnce(&Param) -> Expr) -> Self {
        let param = Param::new(ParamId::fresh());
        let body = f(&param);
        Projection {
            param: param.id(),
            body,
        }
    }

    /// Projects a single field.
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Projection::build(|it| it.field(name))
    }

    pub fn param(&self) -> ParamId {
        self.param
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }

    /// Computes the projected value for an entity.
    pub fn evaluate<'a, T: Entity>(&'a self, entity: &'a T) -> Result<Value<'a>> {
        Interpreter::new(self.param, entity).eval(&self.body)
    }
}

impl From<&str> for Projection {
    fn from(name: &str) -> Self {
        Projection::field(name)
    }
}

impl From<String> for Projection {
    fn from(name: String) -> Self {
        Projection::field(name)
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    struct Player {
        segment: &'static str,
        level: u32,
    }

    impl Entity for Player {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "segment" => Value::from(self.segment),
                "level" => Value::Number(Number::from(self.level)),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn evaluate_predicate() {
        let vip = Predicate::build(|it| it.field("segment").eq("VIP") & it.field("level").gte(5));
        let p = Player {
            segment: "VIP",
            level: 9,
        };
        let q = Player {
            segment: "VIP",
            level: 2,
        };
        assert!(vip.evaluate(&p).unwrap());
        assert!(!vip.evaluate(&q).unwrap());
    }

    #[test]
    fn field_names_lists_what_the_body_reads() {
        let vip = Predicate::build(|it| {
            it.field("segment").eq("VIP") | it.field("guild").field("name").eq("x")
        });
        let names: Vec<_> = vip.field_names().into_iter().collect();
        assert_eq!(names, vec!["guild", "name", "segment"]);
        assert!(Predicate::always().field_names().is_empty());
    }

    #[test]
    fn always_accepts_everything() {
        let p = Player {
            segment: "",
            level: 0,
        };
        assert!(Predicate::always().evaluate(&p).unwrap());
    }

    #[test]
    fn from_parts_rejects_foreign_parameters() {
        let stray = Predicate::build(|it| it.field("level").gt(1));
        let own = ParamId::fresh();

        let err = Predicate::from_parts(own, stray.body().clone()).unwrap_err();
        assert!(matches!(
            err,
            SpecError::UnboundParameter { found, expected }
                if found == stray.param() && expected == own
        ));

        let ok = Predicate::from_parts(stray.param(), stray.body().clone()).unwrap();
        assert_eq!(ok, stray);
    }

    #[test]
    fn bound_predicate_evaluates_the_same() {
        let p = Player {
            segment: "casual",
            level: 3,
        };
        let original = Predicate::build(|it| it.field("segment").ne("VIP"));
        let bound = original.bind(ParamId::fresh());

        assert_ne!(bound.param(), original.param());
        assert_eq!(bound.free_params(), BTreeSet::from([bound.param()]));
        assert_eq!(bound.evaluate(&p).unwrap(), original.evaluate(&p).unwrap());
    }

    #[test]
    fn projection_reads_field() {
        let p = Player {
            segment: "VIP",
            level: 4,
        };
        let level = Projection::from("level");
        assert_eq!(level.evaluate(&p).unwrap(), Value::Number(Number::U64(4)));

        let lowered = Projection::build(|it| it.field("segment").lower());
        assert_eq!(lowered.evaluate(&p).unwrap(), Value::from("vip"));
    }
}
