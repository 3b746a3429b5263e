//! Operator evaluation.
//!
//! Pure functions over already-evaluated operands; the interpreter attaches
//! the operator's location to any error.

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;
use sable_syntax::{BinaryOp, UnaryOp};
use std::cmp::Ordering;

/// Applies a binary operator.
pub fn binary(op: BinaryOp, left: &Value, right: &Value) -> RuntimeResult<Value> {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => arithmetic(left, right, "subtraction", i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => {
            arithmetic(left, right, "multiplication", i64::checked_mul, |a, b| a * b)
        }
        BinaryOp::Div => divide(left, right),
        BinaryOp::Mod => modulo(left, right),
        BinaryOp::Eq => equals(left, right).map(Value::Boolean),
        BinaryOp::Neq => equals(left, right).map(|eq| Value::Boolean(!eq)),
        BinaryOp::Lt => ordering(left, right, Ordering::is_lt),
        BinaryOp::Gt => ordering(left, right, Ordering::is_gt),
        BinaryOp::Lte => ordering(left, right, Ordering::is_le),
        BinaryOp::Gte => ordering(left, right, Ordering::is_ge),
        BinaryOp::And => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
    }
}

/// Applies a unary operator.
pub fn unary(op: UnaryOp, operand: &Value) -> RuntimeResult<Value> {
    match op {
        UnaryOp::Negate => Ok(Value::Boolean(!operand.is_truthy())),
        UnaryOp::Minus => match operand {
            Value::Integer(n) => n
                .checked_neg()
                .map(Value::Integer)
                .ok_or(RuntimeError::IntegerOverflow),
            Value::Float(x) => Ok(Value::Float(-x)),
            _ => Err(RuntimeError::InvalidNegation),
        },
    }
}

fn add(left: &Value, right: &Value) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::String(a), other) => Ok(Value::String(format!("{a}{other}"))),
        (other, Value::String(b)) => Ok(Value::String(format!("{other}{b}"))),
        _ => arithmetic(left, right, "addition", i64::checked_add, |a, b| a + b),
    }
}

fn arithmetic(
    left: &Value,
    right: &Value,
    operation: &'static str,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> RuntimeResult<Value> {
    if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
        return int_op(*a, *b)
            .map(Value::Integer)
            .ok_or(RuntimeError::IntegerOverflow);
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => Ok(Value::Float(float_op(a, b))),
        _ => Err(RuntimeError::InvalidOperands { operation }),
    }
}

fn divide(left: &Value, right: &Value) -> RuntimeResult<Value> {
    let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
        return Err(RuntimeError::InvalidOperands {
            operation: "division",
        });
    };
    if b == 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    Ok(Value::Float(a / b))
}

fn modulo(left: &Value, right: &Value) -> RuntimeResult<Value> {
    let (Value::Integer(a), Value::Integer(b)) = (left, right) else {
        return Err(RuntimeError::InvalidOperands {
            operation: "modulo",
        });
    };
    if *b == 0 {
        return Err(RuntimeError::ModuloByZero);
    }
    a.checked_rem(*b)
        .map(Value::Integer)
        .ok_or(RuntimeError::IntegerOverflow)
}

fn equals(left: &Value, right: &Value) -> RuntimeResult<bool> {
    match (left, right) {
        (Value::Null, other) | (other, Value::Null) => Ok(matches!(other, Value::Null)),
        (Value::Integer(a), Value::Float(b)) => Ok((*a as f64) == *b),
        (Value::Float(a), Value::Integer(b)) => Ok(*a == (*b as f64)),
        _ if std::mem::discriminant(left) == std::mem::discriminant(right) => Ok(left == right),
        _ => Err(comparison_error()),
    }
}

/// Applies an ordering test. Unordered operands (NaN) fail every test.
fn ordering(left: &Value, right: &Value, test: fn(Ordering) -> bool) -> RuntimeResult<Value> {
    let ord = compare(left, right)?;
    Ok(Value::Boolean(ord.is_some_and(test)))
}

fn compare(left: &Value, right: &Value) -> RuntimeResult<Option<Ordering>> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Some(a.cmp(b))),
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
            _ => Err(comparison_error()),
        },
    }
}

const fn comparison_error() -> RuntimeError {
    RuntimeError::InvalidOperands {
        operation: "comparison",
    }
}
