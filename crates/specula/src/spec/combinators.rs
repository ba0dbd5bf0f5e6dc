//! Logical combinators over specifications.
//!
//! Operands are built independently, so each carries its own parameter.
//! [`And`] and [`Or`] allocate one fresh parameter and rebind both sides onto
//! it before joining them; [`Not`] keeps its operand's parameter as-is.
//!
//! Combinators carry no includes and no ordering. Wrap the result in
//! [`Spec::from_specification`](super::Spec::from_specification) to add them.

use super::Specification;
use crate::entity::Entity;
use crate::predicate::{Expr, ParamId, Predicate};

/// Both operands must hold.
#[derive(Debug, Clone)]
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<L, R> And<L, R> {
    pub fn new(left: L, right: R) -> Self {
        And { left, right }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }

    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<T, L, R> Specification<T> for And<L, R>
where
    T: Entity,
    L: Specification<T>,
    R: Specification<T>,
{
    fn to_predicate(&self) -> Predicate {
        let (param, left, right) = rebind_pair(self.left.to_predicate(), self.right.to_predicate());
        Predicate::from_bound(param, left & right)
    }
}

/// At least one operand must hold.
#[derive(Debug, Clone)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L, R> Or<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Or { left, right }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }

    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<T, L, R> Specification<T> for Or<L, R>
where
    T: Entity,
    L: Specification<T>,
    R: Specification<T>,
{
    fn to_predicate(&self) -> Predicate {
        let (param, left, right) = rebind_pair(self.left.to_predicate(), self.right.to_predicate());
        Predicate::from_bound(param, left | right)
    }
}

/// The operand must not hold.
#[derive(Debug, Clone)]
pub struct Not<S> {
    inner: S,
}

impl<S> Not<S> {
    pub fn new(inner: S) -> Self {
        Not { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<T, S> Specification<T> for Not<S>
where
    T: Entity,
    S: Specification<T>,
{
    fn to_predicate(&self) -> Predicate {
        let (param, body) = self.inner.to_predicate().into_parts();
        Predicate::from_bound(param, !body)
    }
}

fn rebind_pair(left: Predicate, right: Predicate) -> (ParamId, Expr, Expr) {
    let shared = ParamId::fresh();
    let (_, left) = left.bind(shared).into_parts();
    let (_, right) = right.bind(shared).into_parts();
    (shared, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Spec;
    use crate::value::Value;

    struct Flags {
        a: bool,
        b: bool,
    }

    impl Entity for Flags {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "a" => Value::Bool(self.a),
                "b" => Value::Bool(self.b),
                _ => Value::None,
            }
        }
    }

    struct IsSet(&'static str);

    impl Specification<Flags> for IsSet {
        fn to_predicate(&self) -> Predicate {
            let name = self.0;
            Predicate::build(|it| it.field(name).eq(true))
        }
    }

    #[test]
    fn and_shares_one_fresh_parameter() {
        let a = IsSet("a").to_predicate();
        let composite = IsSet("a").and(IsSet("b")).to_predicate();

        assert_ne!(composite.param(), a.param());
        assert_eq!(composite.free_params().len(), 1);
        assert!(composite.free_params().contains(&composite.param()));
        assert!(matches!(composite.body(), Expr::And(_, _)));
    }

    #[test]
    fn not_keeps_inner_parameter_shape() {
        let negated = IsSet("a").not().to_predicate();
        assert!(matches!(negated.body(), Expr::Not(_)));
        assert_eq!(negated.free_params().len(), 1);
    }

    #[test]
    fn truth_tables() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let flags = Flags { a, b };
            assert_eq!(IsSet("a").and(IsSet("b")).is_satisfied_by(&flags), a && b);
            assert_eq!(IsSet("a").or(IsSet("b")).is_satisfied_by(&flags), a || b);
            assert_eq!(IsSet("a").not().is_satisfied_by(&flags), !a);
        }
    }

    #[test]
    fn nested_composites_rebind_recursively() {
        let spec = IsSet("a").and(IsSet("b")).or(IsSet("a").not().and(IsSet("b").not()));
        let predicate = spec.to_predicate();
        assert_eq!(predicate.free_params().len(), 1);

        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            assert_eq!(spec.is_satisfied_by(&Flags { a, b }), a == b);
        }
    }

    #[test]
    fn operands_are_not_modified() {
        let a = Spec::<Flags>::build(|it| it.field("a").eq(true));
        let before = a.predicate().clone();

        let composite = (&a).and(IsSet("b")).to_predicate();
        assert_ne!(composite.param(), before.param());
        assert_eq!(a.predicate(), &before);
    }
}
