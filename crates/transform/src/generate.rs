// Code generator
//
// Synthesizes the replacement expression for an accepted operator. Two
// strategies: the compile-time wrapper, parameterized by the resolved
// operand type spellings, and the runtime-dispatch wrapper, parameterized
// by decltype of the operand text so it resolves inside the enclosing
// generic context at instantiation time. Operand text is spliced in
// verbatim; it is never reconstructed from the type system.

use crate::error::{TransformError, TransformResult};
use parser::ast::BinaryOp;
use parser::types::Type;

/// Wrapper-name suffix for a binary opcode. One fixed suffix per opcode;
/// operators outside the instrumentable set have none.
pub fn wrapper_suffix(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Add => Some("add"),
        BinaryOp::Sub => Some("sub"),
        BinaryOp::Mul => Some("mul"),
        BinaryOp::Div => Some("div"),
        BinaryOp::Rem => Some("rem"),
        BinaryOp::Assign => Some("assign"),
        BinaryOp::AddAssign => Some("add_assign"),
        BinaryOp::SubAssign => Some("sub_assign"),
        BinaryOp::MulAssign => Some("mul_assign"),
        BinaryOp::DivAssign => Some("div_assign"),
        BinaryOp::RemAssign => Some("rem_assign"),
        BinaryOp::Eq => Some("eq"),
        BinaryOp::NotEq => Some("ne"),
        BinaryOp::Lt => Some("lt"),
        BinaryOp::Gt => Some("gt"),
        BinaryOp::LtEq => Some("le"),
        BinaryOp::GtEq => Some("ge"),
        BinaryOp::LogicalAnd
        | BinaryOp::LogicalOr
        | BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::Shl
        | BinaryOp::Shr => None,
    }
}

/// Replacement text for a subscript expression.
pub fn subscript_instrumentation(
    base_type: &Type,
    base_text: &str,
    index_text: &str,
    dependent: bool,
) -> String {
    if dependent {
        // Dispatch at instantiation time: forward to the operand's own
        // operator[] when one exists, else the primitive wrapper
        format!(
            "__maybe_primop_subscript<decltype({base}), !__has_subscript_overload<decltype({base})>::value>()({base}, {index})",
            base = base_text,
            index = index_text,
        )
    } else {
        format!(
            "__primop_subscript<{ty}>()({base}, {index})",
            ty = base_type.render(),
            base = base_text,
            index = index_text,
        )
    }
}

/// Replacement text for a binary operator expression. Unrecognized
/// opcodes are an internal error, never a silent no-op.
pub fn binary_instrumentation(
    op: BinaryOp,
    lhs_type: &Type,
    rhs_type: &Type,
    lhs_text: &str,
    rhs_text: &str,
    dependent: bool,
) -> TransformResult<String> {
    let suffix = wrapper_suffix(op).ok_or_else(|| TransformError::Generation {
        operator: format!("{:?}", op),
        span: None,
    })?;

    if dependent {
        Ok(format!(
            "__maybe_primop_{suffix}<decltype({lhs}), decltype({rhs})>()({lhs}, {rhs})",
            suffix = suffix,
            lhs = lhs_text,
            rhs = rhs_text,
        ))
    } else {
        Ok(format!(
            "__primop_{suffix}<{lty}, {rty}>()({lhs}, {rhs})",
            suffix = suffix,
            lty = lhs_type.render(),
            rty = rhs_type.render(),
            lhs = lhs_text,
            rhs = rhs_text,
        ))
    }
}
