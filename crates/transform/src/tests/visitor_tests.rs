// Transformation Visitor Tests
//
// End-to-end rewriting behavior: traversal order, dedup idempotence,
// suppression, category routing, dependent dispatch, and statistics.

use super::{all_binary_ops, run_default, run_with};
use crate::config::TransformationConfig;
use crate::visitor::{RunState, TransformationVisitor};
use parser::parent::ParentMap;
use parser::source::SourceFile;
use parser::types::TypeResolver;

// ==================== SUBSCRIPT SCENARIOS ====================

#[test]
fn test_simple_subscript_rewritten() {
    let outcome = run_default("int f() { int arr[10]; return arr[5]; }");
    assert!(outcome.changed);
    assert!(outcome
        .text
        .contains("__primop_subscript<int[10]>()(arr, 5)"));
    assert!(!outcome.text.contains("arr[5]"));
    assert_eq!(outcome.stats.array_subscripts_transformed, 1);
}

#[test]
fn test_pointer_subscript_rewritten() {
    let outcome = run_default("int f(int* p) { return p[3]; }");
    assert!(outcome.text.contains("__primop_subscript<int *>()(p, 3)"));
}

#[test]
fn test_address_of_operand_untouched() {
    let outcome =
        run_default("int f() { int arr[10]; int* ptr = &arr[5]; return arr[3]; }");
    assert!(outcome.text.contains("&arr[5]"));
    assert!(outcome
        .text
        .contains("__primop_subscript<int[10]>()(arr, 3)"));
    assert_eq!(outcome.stats.array_subscripts_transformed, 1);
    assert_eq!(outcome.stats.suppressed_contexts_skipped, 1);
}

#[test]
fn test_sizeof_operand_untouched() {
    let outcome =
        run_default("int f() { int arr[10]; size_t n = sizeof(arr[0]); return arr[1]; }");
    assert!(outcome.text.contains("sizeof(arr[0])"));
    assert_eq!(outcome.stats.array_subscripts_transformed, 1);
}

#[test]
fn test_template_dependent_uses_runtime_dispatch() {
    let outcome = run_default("template <typename T> T f(T* p, int i) { return p[i]; }");
    assert!(outcome.text.contains(
        "__maybe_primop_subscript<decltype(p), !__has_subscript_overload<decltype(p)>::value>()(p, i)"
    ));
    assert!(!outcome.text.contains("__primop_subscript<"));
    assert_eq!(outcome.stats.dependent_dispatched, 1);
}

#[test]
fn test_disabled_subscripts_leave_source_byte_identical() {
    let input = "int f() { int arr[10]; return arr[5]; }";
    let config = TransformationConfig {
        transform_array_subscripts: false,
        ..TransformationConfig::default()
    };
    let outcome = run_with(input, &config);
    assert!(!outcome.changed);
    assert_eq!(outcome.text, input);
    assert_eq!(outcome.stats.total_transformed(), 0);
}

#[test]
fn test_nested_subscripts_inner_rewritten_first() {
    let outcome =
        run_default("int f() { int arr[10]; int indices[4]; return arr[indices[2]]; }");
    assert_eq!(outcome.stats.array_subscripts_transformed, 2);
    // The outer call embeds the inner call as its index operand
    assert!(outcome.text.contains(
        "__primop_subscript<int[10]>()(arr, __primop_subscript<int[4]>()(indices, 2))"
    ));
}

#[test]
fn test_chained_subscripts_both_rewritten() {
    let outcome = run_default("int f(int** m) { return m[1][2]; }");
    assert_eq!(outcome.stats.array_subscripts_transformed, 2);
    // Outer base operand is the rewritten inner access
    assert!(outcome.text.contains(
        "__primop_subscript<int *>()(__primop_subscript<int **>()(m, 1), 2)"
    ));
}

// ==================== BINARY OPERATOR SCENARIOS ====================

#[test]
fn test_arithmetic_rewritten_when_enabled() {
    let outcome = run_with(
        "int f() { int a; int b; return a + b; }",
        &all_binary_ops(),
    );
    assert!(outcome.text.contains("__primop_add<int, int>()(a, b)"));
    assert_eq!(outcome.stats.arithmetic_ops_transformed, 1);
}

#[test]
fn test_operand_order_preserved() {
    let outcome = run_with(
        "int f() { int a; int b; return a - b; }",
        &all_binary_ops(),
    );
    assert!(outcome.text.contains("__primop_sub<int, int>()(a, b)"));
}

#[test]
fn test_assignment_rewritten_when_enabled() {
    let outcome = run_with("int f() { int a; a = 2; return a; }", &all_binary_ops());
    assert!(outcome.text.contains("__primop_assign<int, int>()(a, 2)"));
    assert_eq!(outcome.stats.assignment_ops_transformed, 1);
}

#[test]
fn test_compound_assignment_suffix() {
    let outcome = run_with("int f() { int a; a += 3; return a; }", &all_binary_ops());
    assert!(outcome
        .text
        .contains("__primop_add_assign<int, int>()(a, 3)"));
}

#[test]
fn test_comparison_rewritten_when_enabled() {
    let outcome = run_with(
        "int f() { int a; int b; return a < b; }",
        &all_binary_ops(),
    );
    assert!(outcome.text.contains("__primop_lt<int, int>()(a, b)"));
    assert_eq!(outcome.stats.comparison_ops_transformed, 1);
}

#[test]
fn test_logical_operators_never_rewritten() {
    let input = "int f() { int a; int b; return a && b; }";
    let outcome = run_with(input, &all_binary_ops());
    assert_eq!(outcome.text, input);
    assert_eq!(outcome.stats.errors_encountered, 0);
}

#[test]
fn test_subscript_inside_arithmetic_composes() {
    let outcome = run_with(
        "int f() { int arr[10]; int i; return arr[i] + 1; }",
        &all_binary_ops(),
    );
    assert_eq!(outcome.stats.array_subscripts_transformed, 1);
    assert_eq!(outcome.stats.arithmetic_ops_transformed, 1);
    assert!(outcome.text.contains(
        "__primop_add<int, int>()(__primop_subscript<int[10]>()(arr, i), 1)"
    ));
}

#[test]
fn test_dependent_binary_uses_dispatch_wrapper() {
    let config = TransformationConfig {
        transform_arithmetic_operators: true,
        ..TransformationConfig::default()
    };
    let outcome = run_with(
        "template <typename T> T f(T x) { return x + 1; }",
        &config,
    );
    assert!(outcome
        .text
        .contains("__maybe_primop_add<decltype(x), decltype(1)>()(x, 1)"));
}

// ==================== OVERLOADED OPERATORS ====================

#[test]
fn test_overloaded_subscript_skipped_by_default() {
    let input = "int f() { Vec v; return v[0]; }";
    let outcome = run_default(input);
    assert_eq!(outcome.text, input);
    assert_eq!(outcome.stats.overloaded_skipped, 1);
}

#[test]
fn test_overloaded_subscript_opt_in_uses_dispatch() {
    let config = TransformationConfig {
        transform_overloaded_operators: true,
        ..TransformationConfig::default()
    };
    let outcome = run_with("int f() { Vec v; return v[0]; }", &config);
    assert!(outcome.text.contains("__maybe_primop_subscript<decltype(v)"));
    assert_eq!(outcome.stats.overloaded_ops_transformed, 1);
}

// ==================== SYSTEM HEADERS ====================

#[test]
fn test_system_header_region_excluded() {
    let input = "int lib(int* p) { return p[0]; }\nint f(int* q) { return q[1]; }";
    let mut source = SourceFile::new("test.cpp", input);
    let boundary = input.find('\n').unwrap() + 1;
    source.mark_system_region(0..boundary);
    let outcome =
        crate::transform_source(&source, &TransformationConfig::default()).unwrap();
    assert!(outcome.text.contains("return p[0];"));
    assert!(outcome.text.contains("__primop_subscript<int *>()(q, 1)"));
    assert_eq!(outcome.stats.array_subscripts_transformed, 1);
    assert_eq!(outcome.stats.system_headers_skipped, 1);
}

// ==================== DEDUP & RUN STATE ====================

#[test]
fn test_double_run_transforms_at_most_once() {
    let input = "int f() { int arr[10]; return arr[5]; }";
    let source = SourceFile::new("test.cpp", input);
    let tu = parser::parse(&source).unwrap();
    let types = TypeResolver::resolve(&tu);
    let parents = ParentMap::build(&tu);
    let config = TransformationConfig::default();

    let mut visitor = TransformationVisitor::new(&source, &types, &parents, &config);
    assert_eq!(visitor.state(), RunState::Idle);
    visitor.run(&tu);
    assert_eq!(visitor.state(), RunState::Complete);
    let text_after_first = visitor.rewriter().as_str().to_string();
    let stats_after_first = visitor.stats().clone();

    // Second pass without resetting the ledger: nothing rewrites twice
    visitor.run(&tu);
    assert_eq!(visitor.rewriter().as_str(), text_after_first);
    assert_eq!(visitor.stats(), &stats_after_first);
    assert_eq!(visitor.stats().array_subscripts_transformed, 1);
}

// ==================== PRELUDE INJECTION ====================

#[test]
fn test_prelude_include_emitted_when_changed() {
    let config = TransformationConfig {
        prelude_path: Some("prelude.hpp".into()),
        ..TransformationConfig::default()
    };
    let outcome = run_with("int f() { int arr[4]; return arr[0]; }", &config);
    assert!(outcome.text.starts_with("#include \"prelude.hpp\"\n"));
}

#[test]
fn test_no_prelude_include_when_unchanged() {
    let config = TransformationConfig {
        prelude_path: Some("prelude.hpp".into()),
        ..TransformationConfig::default()
    };
    let outcome = run_with("int f() { return 0; }", &config);
    assert!(!outcome.text.contains("#include"));
}

// ==================== DIAGNOSTICS ====================

#[test]
fn test_suppression_recorded_as_note() {
    let outcome = run_default("int f() { int arr[4]; int* p = &arr[0]; return 0; }");
    assert!(outcome.stats.total_transformed() == 0);
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.message.contains("address-of")));
    assert_eq!(outcome.diagnostics.error_count(), 0);
}

#[test]
fn test_clean_run_reports_no_issues() {
    let outcome = run_default("int f() { int arr[4]; return arr[1]; }");
    assert_eq!(outcome.diagnostics.summary(), "No issues found");
}
