//! Expression type checking.
//!
//! Every expression synthesizes a type. Operator rules are plain functions
//! over operand types so they can be checked in isolation; the checker
//! reports a mismatch whenever a rule returns `None`.

use crate::check::TypeChecker;
use crate::error::{Operator, TypeError};
use crate::types::Ty;
use sable_syntax::ast::{BinaryOp, Expr, Literal, UnaryOp};
use sable_syntax::{Span, Spanned};

/// Result type of `left op right`, or `None` if the operands are invalid.
///
/// ```
/// use sable_syntax::BinaryOp;
/// use sable_typecheck::check::check_binary_op;
/// use sable_typecheck::Ty;
///
/// assert_eq!(check_binary_op(BinaryOp::Div, Ty::Int, Ty::Int), Some(Ty::Float));
/// assert_eq!(check_binary_op(BinaryOp::Add, Ty::String, Ty::Int), Some(Ty::String));
/// assert_eq!(check_binary_op(BinaryOp::Add, Ty::Bool, Ty::Int), None);
/// ```
#[must_use]
pub fn check_binary_op(op: BinaryOp, left: Ty, right: Ty) -> Option<Ty> {
    match op {
        BinaryOp::Add if left == Ty::String || right == Ty::String => Some(Ty::String),

        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => {
            if !left.is_numeric_like() || !right.is_numeric_like() {
                return None;
            }
            Some(match (left, right) {
                (Ty::Int, Ty::Int) => Ty::Int,
                // `unknown + x` may still be a string concatenation
                (Ty::Unknown, _) | (_, Ty::Unknown) if op == BinaryOp::Add => Ty::Unknown,
                (Ty::Unknown, Ty::Unknown) => Ty::Unknown,
                (Ty::Float, _) | (_, Ty::Float) => Ty::Float,
                _ => Ty::Unknown,
            })
        }

        BinaryOp::Div => {
            (left.is_numeric_like() && right.is_numeric_like()).then_some(Ty::Float)
        }

        BinaryOp::Mod => {
            (left.is_or_unknown(Ty::Int) && right.is_or_unknown(Ty::Int)).then_some(Ty::Int)
        }

        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Lte | BinaryOp::Gte => {
            comparable(left, right, false).then_some(Ty::Bool)
        }

        BinaryOp::Eq | BinaryOp::Neq => comparable(left, right, true).then_some(Ty::Bool),

        BinaryOp::And | BinaryOp::Or => {
            (left.is_or_unknown(Ty::Bool) && right.is_or_unknown(Ty::Bool)).then_some(Ty::Bool)
        }
    }
}

/// Result type of `op operand`, or `None` if the operand is invalid.
#[must_use]
pub fn check_unary_op(op: UnaryOp, operand: Ty) -> Option<Ty> {
    match op {
        UnaryOp::Minus => operand.is_numeric_like().then_some(operand),
        UnaryOp::Negate => operand.is_or_unknown(Ty::Bool).then_some(Ty::Bool),
    }
}

/// Both numeric, both strings, or (for equality) both booleans.
fn comparable(left: Ty, right: Ty, equality: bool) -> bool {
    if left.is_unknown() || right.is_unknown() {
        return true;
    }
    (left.is_numeric() && right.is_numeric())
        || (left == Ty::String && right == Ty::String)
        || (equality && left == Ty::Bool && right == Ty::Bool)
}

impl TypeChecker {
    /// Infers the type of an expression, reporting any errors inside it.
    pub(crate) fn synth_expr(&mut self, expr: &Expr) -> Ty {
        match expr {
            Expr::Literal { value, .. } => match value {
                Literal::Integer(_) => Ty::Int,
                Literal::Float(_) => Ty::Float,
                Literal::Boolean(_) => Ty::Bool,
                Literal::String(_) => Ty::String,
            },

            Expr::Variable { name, span } => match self.scopes.lookup(name) {
                Some(symbol) => symbol.ty,
                None => {
                    self.error(TypeError::UndefinedVariable {
                        name: name.clone(),
                        span: *span,
                    });
                    Ty::Unknown
                }
            },

            Expr::Binary {
                left,
                op,
                op_span,
                right,
                ..
            } => {
                let ty_left = self.synth_expr(left);
                let ty_right = self.synth_expr(right);
                check_binary_op(*op, ty_left, ty_right).unwrap_or_else(|| {
                    self.error(TypeError::InvalidOperands {
                        op: Operator::Binary(*op),
                        operands: vec![ty_left, ty_right],
                        span: *op_span,
                    });
                    Ty::Unknown
                })
            }

            Expr::Unary {
                op,
                op_span,
                operand,
                ..
            } => {
                let ty_operand = self.synth_expr(operand);
                check_unary_op(*op, ty_operand).unwrap_or_else(|| {
                    self.error(TypeError::InvalidOperands {
                        op: Operator::Unary(*op),
                        operands: vec![ty_operand],
                        span: *op_span,
                    });
                    Ty::Unknown
                })
            }

            Expr::Call {
                callee,
                callee_span,
                args,
                span,
            } => self.synth_call(callee, *callee_span, args, *span),

            Expr::Assign {
                name,
                name_span,
                value,
                ..
            } => {
                let ty_value = self.synth_expr(value);
                match self.scopes.lookup(name) {
                    Some(symbol) if !ty_value.is_compatible(symbol.ty) => {
                        let expected = symbol.ty;
                        self.error(TypeError::AssignMismatch {
                            name: name.clone(),
                            expected,
                            found: ty_value,
                            span: value.span(),
                        });
                    }
                    Some(_) => {}
                    None => self.error(TypeError::UndefinedVariable {
                        name: name.clone(),
                        span: *name_span,
                    }),
                }
                ty_value
            }
        }
    }

    /// Checks a call against the callee's signature and returns its result
    /// type.
    fn synth_call(&mut self, callee: &str, callee_span: Span, args: &[Expr], span: Span) -> Ty {
        let arg_types: Vec<Ty> = args.iter().map(|arg| self.synth_expr(arg)).collect();

        let Some(symbol) = self.scopes.lookup(callee) else {
            self.error(TypeError::UndefinedFunction {
                name: callee.to_string(),
                span: callee_span,
            });
            return Ty::Unknown;
        };

        let Some(signature) = symbol.signature.clone() else {
            // A variable holding a function value: checked at runtime.
            if symbol.ty.is_or_unknown(Ty::Function) {
                return Ty::Unknown;
            }
            let ty = symbol.ty;
            self.error(TypeError::NotCallable {
                name: callee.to_string(),
                ty,
                span: callee_span,
            });
            return Ty::Unknown;
        };

        if !signature.accepts(arg_types.len()) {
            let max = if signature.variadic {
                usize::MAX
            } else {
                signature.params.len()
            };
            self.error(TypeError::ArityMismatch {
                name: callee.to_string(),
                expected: (signature.required, max),
                found: arg_types.len(),
                span,
            });
            return signature.ret;
        }

        for (index, (arg, found)) in args.iter().zip(&arg_types).enumerate() {
            let Some(expected) = signature.param(index) else {
                continue;
            };
            if !found.is_compatible(expected) {
                self.error(TypeError::ArgumentMismatch {
                    name: callee.to_string(),
                    index: index + 1,
                    expected,
                    found: *found,
                    span: arg.span(),
                });
            }
        }

        signature.ret
    }
}
