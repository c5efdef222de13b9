// Code Generator Tests
//
// Suffix fidelity, operand order, and the compile-time vs.
// runtime-dispatch branching.

use crate::error::TransformError;
use crate::generate::{binary_instrumentation, subscript_instrumentation, wrapper_suffix};
use parser::ast::BinaryOp;
use parser::types::Type;

// ==================== SUFFIX TABLE ====================

#[test]
fn test_suffix_table_round_trips_each_opcode() {
    let table = [
        (BinaryOp::Add, "add"),
        (BinaryOp::Sub, "sub"),
        (BinaryOp::Mul, "mul"),
        (BinaryOp::Div, "div"),
        (BinaryOp::Rem, "rem"),
        (BinaryOp::Assign, "assign"),
        (BinaryOp::AddAssign, "add_assign"),
        (BinaryOp::SubAssign, "sub_assign"),
        (BinaryOp::MulAssign, "mul_assign"),
        (BinaryOp::DivAssign, "div_assign"),
        (BinaryOp::RemAssign, "rem_assign"),
        (BinaryOp::Eq, "eq"),
        (BinaryOp::NotEq, "ne"),
        (BinaryOp::Lt, "lt"),
        (BinaryOp::Gt, "gt"),
        (BinaryOp::LtEq, "le"),
        (BinaryOp::GtEq, "ge"),
    ];
    for (op, suffix) in table {
        assert_eq!(wrapper_suffix(op), Some(suffix), "opcode {:?}", op);
    }
}

#[test]
fn test_uninstrumentable_opcodes_have_no_suffix() {
    for op in [
        BinaryOp::LogicalAnd,
        BinaryOp::LogicalOr,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
        BinaryOp::Shl,
        BinaryOp::Shr,
    ] {
        assert_eq!(wrapper_suffix(op), None, "opcode {:?}", op);
    }
}

// ==================== SUBSCRIPT GENERATION ====================

#[test]
fn test_subscript_compile_time_path() {
    let ty = Type::Array(Box::new(Type::Builtin("int")), Some(10));
    let text = subscript_instrumentation(&ty, "arr", "5", false);
    assert_eq!(text, "__primop_subscript<int[10]>()(arr, 5)");
}

#[test]
fn test_subscript_runtime_dispatch_path() {
    let ty = Type::Pointer(Box::new(Type::Param("T".to_string())));
    let text = subscript_instrumentation(&ty, "p", "i", true);
    assert_eq!(
        text,
        "__maybe_primop_subscript<decltype(p), !__has_subscript_overload<decltype(p)>::value>()(p, i)"
    );
}

#[test]
fn test_subscript_keeps_operand_text_verbatim() {
    let ty = Type::Pointer(Box::new(Type::Builtin("int")));
    let text = subscript_instrumentation(&ty, "buf", "i + 1", false);
    assert_eq!(text, "__primop_subscript<int *>()(buf, i + 1)");
}

#[test]
fn test_generated_text_has_no_trailing_terminator() {
    let ty = Type::Builtin("int");
    let text = subscript_instrumentation(&ty, "a", "0", false);
    assert!(!text.ends_with(';'));
}

// ==================== BINARY GENERATION ====================

#[test]
fn test_binary_compile_time_path() {
    let int = Type::Builtin("int");
    let text = binary_instrumentation(BinaryOp::Add, &int, &int, "a", "b", false).unwrap();
    assert_eq!(text, "__primop_add<int, int>()(a, b)");
}

#[test]
fn test_binary_operand_order_preserved() {
    // a - b must keep a on the left, never swapped
    let int = Type::Builtin("int");
    let text = binary_instrumentation(BinaryOp::Sub, &int, &int, "a", "b", false).unwrap();
    let a_pos = text.find("(a, ").unwrap();
    let b_pos = text.find("b)").unwrap();
    assert!(a_pos < b_pos);
    assert_eq!(text, "__primop_sub<int, int>()(a, b)");
}

#[test]
fn test_binary_runtime_dispatch_path() {
    let dep = Type::Param("T".to_string());
    let int = Type::Builtin("int");
    let text = binary_instrumentation(BinaryOp::Mul, &dep, &int, "x", "2", true).unwrap();
    assert_eq!(text, "__maybe_primop_mul<decltype(x), decltype(2)>()(x, 2)");
}

#[test]
fn test_binary_mixed_types_render_both() {
    let int = Type::Builtin("int");
    let dbl = Type::Builtin("double");
    let text = binary_instrumentation(BinaryOp::Lt, &int, &dbl, "i", "d", false).unwrap();
    assert_eq!(text, "__primop_lt<int, double>()(i, d)");
}

#[test]
fn test_unrecognized_opcode_is_internal_error() {
    let int = Type::Builtin("int");
    let err =
        binary_instrumentation(BinaryOp::LogicalAnd, &int, &int, "a", "b", false).unwrap_err();
    assert!(matches!(err, TransformError::Generation { .. }));
}

#[test]
fn test_category_fidelity_add_never_sub() {
    let int = Type::Builtin("int");
    let text = binary_instrumentation(BinaryOp::Add, &int, &int, "a", "b", false).unwrap();
    assert!(text.contains("__primop_add<"));
    assert!(!text.contains("sub"));
}
