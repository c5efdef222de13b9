// Statement & Item Parsing Tests
//
// Declarations, control flow, function and template-function items.

use super::parse_unit;
use crate::ast::{BaseTypeSyntax, ExprKind, ItemKind, StmtKind};

fn body_stmts(input: &str) -> Vec<StmtKind> {
    let tu = parse_unit(input);
    let Some(item) = tu.items.first() else {
        panic!("no items parsed");
    };
    match &item.kind {
        ItemKind::Function(func) | ItemKind::Template { func, .. } => {
            match &func.body.as_ref().expect("function has a body").kind {
                StmtKind::Block(stmts) => stmts.iter().map(|s| s.kind.clone()).collect(),
                other => panic!("body is not a block: {:?}", other),
            }
        }
        other => panic!("first item is not a function: {:?}", other),
    }
}

// ==================== DECLARATION TESTS ====================

#[test]
fn test_array_declaration() {
    let stmts = body_stmts("int f() { int arr[10]; }");
    match &stmts[0] {
        StmtKind::Decl(decl) => {
            assert_eq!(decl.ty.base, BaseTypeSyntax::Int);
            assert_eq!(decl.declarators.len(), 1);
            let d = &decl.declarators[0];
            assert_eq!(d.name, "arr");
            assert_eq!(d.array_dims.len(), 1);
            assert_eq!(d.pointer_depth, 0);
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_pointer_declaration_with_init() {
    let stmts = body_stmts("int f() { int* ptr = &arr[5]; }");
    match &stmts[0] {
        StmtKind::Decl(decl) => {
            let d = &decl.declarators[0];
            assert_eq!(d.name, "ptr");
            assert_eq!(d.pointer_depth, 1);
            assert!(d.init.is_some());
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_multiple_declarators() {
    let stmts = body_stmts("int f() { int a = 1, b = 2; }");
    match &stmts[0] {
        StmtKind::Decl(decl) => assert_eq!(decl.declarators.len(), 2),
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_const_size_t_declaration() {
    let stmts = body_stmts("int f() { const size_t n = sizeof(arr[0]); }");
    match &stmts[0] {
        StmtKind::Decl(decl) => {
            assert!(decl.ty.is_const);
            assert_eq!(decl.ty.base, BaseTypeSyntax::SizeT);
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_named_type_declaration() {
    let stmts = body_stmts("int f() { Vec v; }");
    match &stmts[0] {
        StmtKind::Decl(decl) => {
            assert_eq!(decl.ty.base, BaseTypeSyntax::Named("Vec".to_string()));
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_assignment_is_expression_statement() {
    // "v[0] = x;" must not be mistaken for a declaration of x
    let stmts = body_stmts("int f() { v[0] = x; }");
    match &stmts[0] {
        StmtKind::Expr(e) => assert!(matches!(e.kind, ExprKind::Binary { .. })),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

// ==================== CONTROL FLOW TESTS ====================

#[test]
fn test_return_statement() {
    let stmts = body_stmts("int f() { return arr[5]; }");
    match &stmts[0] {
        StmtKind::Return(Some(e)) => assert!(matches!(e.kind, ExprKind::Subscript { .. })),
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn test_if_else() {
    let stmts = body_stmts("int f() { if (a < b) { return a; } else { return b; } }");
    assert!(matches!(
        &stmts[0],
        StmtKind::If {
            else_branch: Some(_),
            ..
        }
    ));
}

#[test]
fn test_while_loop() {
    let stmts = body_stmts("int f() { while (i < n) i++; }");
    assert!(matches!(&stmts[0], StmtKind::While { .. }));
}

#[test]
fn test_for_loop_with_decl_init() {
    let stmts = body_stmts("int f() { for (int i = 0; i < n; i++) { total += a[i]; } }");
    match &stmts[0] {
        StmtKind::For {
            init, cond, step, ..
        } => {
            assert!(matches!(
                init.as_deref(),
                Some(crate::ast::Stmt {
                    kind: StmtKind::Decl(_),
                    ..
                })
            ));
            assert!(cond.is_some());
            assert!(step.is_some());
        }
        other => panic!("expected for, got {:?}", other),
    }
}

// ==================== ITEM TESTS ====================

#[test]
fn test_function_definition() {
    let tu = parse_unit("int add(int a, int b) { return a + b; }");
    match &tu.items[0].kind {
        ItemKind::Function(func) => {
            assert_eq!(func.name, "add");
            assert_eq!(func.params.len(), 2);
            assert!(func.body.is_some());
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_function_declaration_without_body() {
    let tu = parse_unit("int f(int);");
    match &tu.items[0].kind {
        ItemKind::Function(func) => assert!(func.body.is_none()),
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_template_function() {
    let tu = parse_unit("template <typename T> T f(T* p, int i) { return p[i]; }");
    match &tu.items[0].kind {
        ItemKind::Template { params, func } => {
            assert_eq!(params, &vec!["T".to_string()]);
            assert_eq!(func.name, "f");
            assert_eq!(func.params[0].ty.pointer_depth, 1);
        }
        other => panic!("expected template function, got {:?}", other),
    }
}

#[test]
fn test_global_declaration() {
    let tu = parse_unit("int counters[4];");
    assert!(matches!(&tu.items[0].kind, ItemKind::Global(_)));
}

#[test]
fn test_preprocessor_lines_ignored() {
    let tu = parse_unit("#include <cstddef>\nint x = 1;");
    assert_eq!(tu.items.len(), 1);
}

// ==================== NUMBERING TESTS ====================

#[test]
fn test_node_ids_are_unique() {
    use std::collections::HashSet;
    let tu = parse_unit("int f() { return arr[i + 1] * arr[i]; }");
    let mut seen = HashSet::new();
    fn collect(expr: &crate::ast::Expr, seen: &mut HashSet<crate::ast::NodeId>) {
        assert!(seen.insert(expr.id), "duplicate id {:?}", expr.id);
        for c in expr.children() {
            collect(c, seen);
        }
    }
    for root in tu.root_exprs() {
        collect(root, &mut seen);
    }
    assert!(seen.len() >= 7);
    assert!(!seen.contains(&crate::ast::NodeId::UNASSIGNED));
}
