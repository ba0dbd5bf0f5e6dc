//! Tree traversal: [`Fold`] rewrites a tree, [`Visit`] inspects one.
//!
//! Both traits have one hook per interesting node kind. The free functions
//! [`fold_expr`] and [`visit_expr`] perform the structural recursion, so an
//! implementation only overrides the hooks it cares about.

use std::collections::BTreeSet;

use super::ast::{Expr, ParamId};
use super::lambda::Predicate;
use crate::literal::Literal;

/// Bottom-up rewrite of an expression tree.
pub trait Fold {
    fn fold_expr(&mut self, expr: &Expr) -> Expr {
        fold_expr(self, expr)
    }

    fn fold_param(&mut self, param: ParamId) -> Expr {
        Expr::Param(param)
    }

    fn fold_literal(&mut self, literal: &Literal) -> Expr {
        Expr::Literal(literal.clone())
    }
}

/// Rebuilds `expr`, folding every child before re-wrapping its parent.
pub fn fold_expr<F: Fold + ?Sized>(folder: &mut F, expr: &Expr) -> Expr {
    match expr {
        Expr::Param(param) => folder.fold_param(*param),
        Expr::Literal(literal) => folder.fold_literal(literal),
        Expr::Field { target, name } => Expr::Field {
            target: Box::new(folder.fold_expr(target)),
            name: name.clone(),
        },
        Expr::Compare { op, left, right } => Expr::Compare {
            op: *op,
            left: Box::new(folder.fold_expr(left)),
            right: Box::new(folder.fold_expr(right)),
        },
        Expr::And(left, right) => Expr::And(
            Box::new(folder.fold_expr(left)),
            Box::new(folder.fold_expr(right)),
        ),
        Expr::Or(left, right) => Expr::Or(
            Box::new(folder.fold_expr(left)),
            Box::new(folder.fold_expr(right)),
        ),
        Expr::Not(inner) => Expr::Not(Box::new(folder.fold_expr(inner))),
        Expr::Arith { op, left, right } => Expr::Arith {
            op: *op,
            left: Box::new(folder.fold_expr(left)),
            right: Box::new(folder.fold_expr(right)),
        },
        Expr::Call { func, args } => Expr::Call {
            func: *func,
            args: args.iter().map(|arg| folder.fold_expr(arg)).collect(),
        },
    }
}

/// Read-only walk over an expression tree.
pub trait Visit {
    fn visit_expr(&mut self, expr: &Expr) {
        visit_expr(self, expr);
    }

    fn visit_param(&mut self, _param: ParamId) {}

    fn visit_field(&mut self, _name: &str) {}

    fn visit_literal(&mut self, _literal: &Literal) {}
}

/// Visits `expr` and all of its descendants, parents first.
pub fn visit_expr<V: Visit + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Param(param) => visitor.visit_param(*param),
        Expr::Literal(literal) => visitor.visit_literal(literal),
        Expr::Field { target, name } => {
            visitor.visit_field(name);
            visitor.visit_expr(target);
        }
        Expr::Compare { left, right, .. }
        | Expr::And(left, right)
        | Expr::Or(left, right)
        | Expr::Arith { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Not(inner) => visitor.visit_expr(inner),
        Expr::Call { args, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
    }
}

/// Substitutes one parameter for another.
///
/// Parameters other than `from` are left untouched.
#[derive(Debug, Clone, Copy)]
pub struct ParameterRebinder {
    from: ParamId,
    to: ParamId,
}

impl ParameterRebinder {
    pub fn new(from: ParamId, to: ParamId) -> Self {
        ParameterRebinder { from, to }
    }
}

impl Fold for ParameterRebinder {
    fn fold_param(&mut self, param: ParamId) -> Expr {
        if param == self.from {
            Expr::Param(self.to)
        } else {
            Expr::Param(param)
        }
    }
}

/// Collects every parameter id referenced by a tree.
#[derive(Debug, Default)]
pub struct FreeParams {
    pub params: BTreeSet<ParamId>,
}

impl Visit for FreeParams {
    fn visit_param(&mut self, param: ParamId) {
        self.params.insert(param);
    }
}

/// Collects the names of every field read by a tree.
#[derive(Debug, Default)]
pub struct FieldNames {
    pub names: BTreeSet<String>,
}

impl Visit for FieldNames {
    fn visit_field(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }
}

/// Rewrites `predicate` so it reads `target` instead of its own parameter.
///
/// The result is structurally identical to the input and evaluates the same
/// way for the same entity.
pub fn bind(predicate: &Predicate, target: ParamId) -> Predicate {
    let mut rebinder = ParameterRebinder::new(predicate.param(), target);
    let body = rebinder.fold_expr(predicate.body());
    Predicate::from_bound(target, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::ast::Param;

    #[test]
    fn rebinder_replaces_only_its_parameter() {
        let a = Param::new(ParamId::fresh());
        let b = Param::new(ParamId::fresh());
        let target = ParamId::fresh();

        let expr = a.field("x").eq(1i64) & b.field("y").eq(2i64);
        let rewritten = ParameterRebinder::new(a.id(), target).fold_expr(&expr);

        let mut free = FreeParams::default();
        free.visit_expr(&rewritten);
        assert_eq!(free.params, BTreeSet::from([b.id(), target]));
    }

    #[test]
    fn bind_preserves_shape() {
        let predicate = Predicate::build(|it| {
            it.field("name").lower().starts_with("a") | !it.field("level").gte(10i64)
        });
        let target = ParamId::fresh();
        let bound = bind(&predicate, target);

        assert_eq!(bound.param(), target);
        assert_eq!(bound.body().to_string().matches(&target.to_string()).count(), 2);

        // Binding back yields the original tree.
        let original = bind(&bound, predicate.param());
        assert_eq!(original, predicate);
    }

    #[test]
    fn field_names_are_collected() {
        let predicate = Predicate::build(|it| {
            it.field("segment").eq("VIP") & (it.field("level") + Expr::lit(1i64)).gt(3i64)
        });
        let mut names = FieldNames::default();
        names.visit_expr(predicate.body());
        assert_eq!(
            names.names.into_iter().collect::<Vec<_>>(),
            vec!["level".to_string(), "segment".to_string()]
        );
    }
}
