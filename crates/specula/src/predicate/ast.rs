//! Predicate AST.
//!
//! An [`Expr`] is an immutable tree over a single implicit parameter, the
//! entity being tested. Parameters are identified by [`ParamId`]; two trees
//! built independently never share one, which is why combining them goes
//! through [`bind`](super::bind) first.

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, Div, Mul, Not, Sub};
use std::sync::atomic::{AtomicU64, Ordering};

use regex::Regex;

use crate::literal::Literal;
use crate::op::{ArithOp, CompareOp, Func};

/// Identity of a predicate parameter.
///
/// Ids are handed out by a process-wide counter and cannot be constructed by
/// callers, so an id read from one predicate can never collide with a fresh
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParamId(u64);

impl ParamId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ParamId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Handle to the parameter a predicate is being built over.
///
/// Handed to the closures of [`Predicate::build`](super::Predicate::build)
/// and [`Projection::build`](super::Projection::build).
#[derive(Debug)]
pub struct Param(ParamId);

impl Param {
    pub(crate) fn new(id: ParamId) -> Self {
        Param(id)
    }

    /// The parameter's identity.
    pub fn id(&self) -> ParamId {
        self.0
    }

    /// The parameter itself as an expression.
    pub fn expr(&self) -> Expr {
        Expr::Param(self.0)
    }

    /// Reads a field of the entity.
    pub fn field(&self, name: impl Into<String>) -> Expr {
        self.expr().field(name)
    }
}

/// A node of the predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The current entity.
    Param(ParamId),
    /// A constant.
    Literal(Literal),
    /// Property access.
    Field { target: Box<Expr>, name: String },
    /// Binary comparison.
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Logical conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Logical disjunction.
    Or(Box<Expr>, Box<Expr>),
    /// Logical negation.
    Not(Box<Expr>),
    /// Binary arithmetic.
    Arith {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Built-in function call.
    Call { func: Func, args: Vec<Expr> },
}

impl Expr {
    /// A constant expression.
    pub fn lit(value: impl Into<Literal>) -> Self {
        Expr::Literal(value.into())
    }

    /// The constant `true`.
    pub fn always() -> Self {
        Expr::Literal(Literal::Bool(true))
    }

    /// Reads a field of this expression.
    pub fn field(self, name: impl Into<String>) -> Self {
        Expr::Field {
            target: Box::new(self),
            name: name.into(),
        }
    }

    /// Compares this expression against another expression.
    pub fn compare(self, op: CompareOp, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    fn compare_lit(self, op: CompareOp, value: impl Into<Literal>) -> Self {
        self.compare(op, Expr::lit(value))
    }

    pub fn eq(self, value: impl Into<Literal>) -> Self {
        self.compare_lit(CompareOp::Eq, value)
    }

    pub fn ne(self, value: impl Into<Literal>) -> Self {
        self.compare_lit(CompareOp::Ne, value)
    }

    pub fn gt(self, value: impl Into<Literal>) -> Self {
        self.compare_lit(CompareOp::Gt, value)
    }

    pub fn gte(self, value: impl Into<Literal>) -> Self {
        self.compare_lit(CompareOp::Gte, value)
    }

    pub fn lt(self, value: impl Into<Literal>) -> Self {
        self.compare_lit(CompareOp::Lt, value)
    }

    pub fn lte(self, value: impl Into<Literal>) -> Self {
        self.compare_lit(CompareOp::Lte, value)
    }

    pub fn starts_with(self, prefix: &str) -> Self {
        self.compare_lit(CompareOp::StartsWith, prefix)
    }

    pub fn ends_with(self, suffix: &str) -> Self {
        self.compare_lit(CompareOp::EndsWith, suffix)
    }

    pub fn contains(self, needle: &str) -> Self {
        self.compare_lit(CompareOp::Contains, needle)
    }

    /// Matches a compiled regular expression.
    pub fn matches(self, regex: Regex) -> Self {
        self.compare_lit(CompareOp::Matches, regex)
    }

    /// Membership in a set of constants.
    pub fn is_in<I, L>(self, values: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        self.compare(CompareOp::In, Expr::Literal(Literal::list(values)))
    }

    pub fn call(func: Func, args: Vec<Expr>) -> Self {
        Expr::Call { func, args }
    }

    pub fn lower(self) -> Self {
        Expr::call(Func::Lower, vec![self])
    }

    pub fn upper(self) -> Self {
        Expr::call(Func::Upper, vec![self])
    }

    pub fn trim(self) -> Self {
        Expr::call(Func::Trim, vec![self])
    }

    pub fn length(self) -> Self {
        Expr::call(Func::Length, vec![self])
    }

    pub fn is_none(self) -> Self {
        Expr::call(Func::IsNone, vec![self])
    }

    fn arith(self, op: ArithOp, right: Expr) -> Self {
        Expr::Arith {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        self.arith(ArithOp::Add, rhs)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        self.arith(ArithOp::Sub, rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        self.arith(ArithOp::Mul, rhs)
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        self.arith(ArithOp::Div, rhs)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Param(id) => write!(f, "{id}"),
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Field { target, name } => write!(f, "{target}.{name}"),
            Expr::Compare { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::And(left, right) => write!(f, "({left} && {right})"),
            Expr::Or(left, right) => write!(f, "({left} || {right})"),
            Expr::Not(inner) => write!(f, "!{inner}"),
            Expr::Arith { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Call { func, args } => {
                write!(f, "{func}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        let a = ParamId::fresh();
        let b = ParamId::fresh();
        assert_ne!(a, b);
        assert!(b.index() > a.index());
    }

    #[test]
    fn builders_produce_expected_shapes() {
        let it = Param::new(ParamId::fresh());
        let expr = it.field("segment").eq("VIP");

        match expr {
            Expr::Compare { op, left, right } => {
                assert_eq!(op, CompareOp::Eq);
                assert_eq!(*left, it.field("segment"));
                assert_eq!(*right, Expr::lit("VIP"));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn operators_build_logical_nodes() {
        let it = Param::new(ParamId::fresh());
        let a = it.field("a").eq(1i64);
        let b = it.field("b").eq(2i64);

        assert!(matches!(a.clone() & b.clone(), Expr::And(_, _)));
        assert!(matches!(a.clone() | b, Expr::Or(_, _)));
        assert!(matches!(!a, Expr::Not(_)));
    }

    #[test]
    fn display_renders_tree() {
        let it = Param::new(ParamId::fresh());
        let id = it.id();
        let expr = it.field("name").lower().eq("bob") & !it.field("level").lt(3i64);

        assert_eq!(
            expr.to_string(),
            format!("((lower({id}.name) == \"bob\") && !({id}.level < 3))")
        );
    }
}
