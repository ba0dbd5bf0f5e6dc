//! Tree-walking interpreter for in-memory evaluation.
//!
//! Comparisons between mismatched or missing values evaluate to `false`
//! rather than failing, so a predicate over an optional field simply does
//! not match entities without it. The logical operators read anything but
//! `true` as false, so `!p` matches exactly where `p` does not. The one hard
//! error is reading a parameter other than the one being bound.

use std::borrow::Cow;

use super::ast::{Expr, ParamId};
use crate::entity::Entity;
use crate::error::{Result, SpecError};
use crate::literal::Literal;
use crate::op::{ArithOp, CompareOp, Func};
use crate::value::{Number, Timestamp, Value};

pub(crate) struct Interpreter<'a, T> {
    param: ParamId,
    entity: &'a T,
}

impl<'a, T: Entity> Interpreter<'a, T> {
    pub(crate) fn new(param: ParamId, entity: &'a T) -> Self {
        Interpreter { param, entity }
    }

    pub(crate) fn eval(&self, expr: &'a Expr) -> Result<Value<'a>> {
        match expr {
            Expr::Param(id) => {
                self.check_param(*id)?;
                // The entity itself has no scalar form.
                Ok(Value::None)
            }
            Expr::Literal(literal) => Ok(literal.as_value()),
            Expr::Field { target, name } => self.eval_field(target, name),
            Expr::Compare { op, left, right } => self.eval_compare(*op, left, right),
            Expr::And(left, right) => {
                if !self.eval(left)?.is_true() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right)?.is_true()))
            }
            Expr::Or(left, right) => {
                if self.eval(left)?.is_true() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(right)?.is_true()))
            }
            Expr::Not(inner) => Ok(Value::Bool(!self.eval(inner)?.is_true())),
            Expr::Arith { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(arith(*op, &left, &right))
            }
            Expr::Call { func, args } => {
                if args.len() != func.arity() {
                    return Ok(Value::None);
                }
                let arg = self.eval(&args[0])?;
                Ok(call(*func, arg))
            }
        }
    }

    fn check_param(&self, id: ParamId) -> Result<()> {
        if id == self.param {
            Ok(())
        } else {
            Err(SpecError::UnboundParameter {
                found: id,
                expected: self.param,
            })
        }
    }

    fn eval_field(&self, target: &'a Expr, name: &str) -> Result<Value<'a>> {
        match target {
            Expr::Param(id) => {
                self.check_param(*id)?;
                Ok(self.entity.field_value(name))
            }
            // Only the entity itself has fields.
            other => {
                self.eval(other)?;
                Ok(Value::None)
            }
        }
    }

    fn eval_compare(&self, op: CompareOp, left: &'a Expr, right: &'a Expr) -> Result<Value<'a>> {
        let value = self.eval(left)?;
        let matched = match (op, right) {
            (CompareOp::Matches, Expr::Literal(Literal::Regex(regex))) => {
                value.as_str().is_some_and(|s| regex.is_match(s))
            }
            (CompareOp::In, Expr::Literal(Literal::List(items))) => items
                .iter()
                .any(|item| CompareOp::Eq.test(&value, &item.as_value())),
            (CompareOp::Matches | CompareOp::In, _) => false,
            _ => op.test(&value, &self.eval(right)?),
        };
        Ok(Value::Bool(matched))
    }
}

fn arith(op: ArithOp, left: &Value<'_>, right: &Value<'_>) -> Value<'static> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let result = match op {
                ArithOp::Add => a.checked_add(*b),
                ArithOp::Sub => a.checked_sub(*b),
                ArithOp::Mul => a.checked_mul(*b),
                ArithOp::Div => a.checked_div(*b),
            };
            result.map_or(Value::None, Value::Number)
        }
        (Value::Timestamp(ts), Value::Number(n)) => {
            let Some(millis) = n.as_millis() else {
                return Value::None;
            };
            let shifted = match op {
                ArithOp::Add => ts.as_millis().checked_add(millis),
                ArithOp::Sub => ts.as_millis().checked_sub(millis),
                _ => None,
            };
            shifted.map_or(Value::None, |m| Value::Timestamp(Timestamp(m)))
        }
        (Value::Timestamp(a), Value::Timestamp(b)) if op == ArithOp::Sub => a
            .as_millis()
            .checked_sub(b.as_millis())
            .map_or(Value::None, |m| Value::Number(Number::I64(m))),
        _ => Value::None,
    }
}

fn call(func: Func, arg: Value<'_>) -> Value<'_> {
    match (func, arg) {
        (Func::IsNone, arg) => Value::Bool(arg.is_none()),
        (Func::Lower, Value::String(s)) => Value::String(Cow::Owned(s.to_lowercase())),
        (Func::Upper, Value::String(s)) => Value::String(Cow::Owned(s.to_uppercase())),
        (Func::Trim, Value::String(Cow::Borrowed(s))) => Value::String(Cow::Borrowed(s.trim())),
        (Func::Trim, Value::String(Cow::Owned(s))) => {
            Value::String(Cow::Owned(s.trim().to_string()))
        }
        (Func::Length, Value::String(s)) => Value::Number(Number::from(s.chars().count())),
        _ => Value::None,
    }
}
