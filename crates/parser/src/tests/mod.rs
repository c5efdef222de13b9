// Test module for parser
//
// Unit tests for the C-family front-end: expression grammar, statements
// and items, and the type resolver.

mod stmt_tests;

use crate::ast::{Expr, TranslationUnit};

/// Parse a standalone expression (test helper).
pub(crate) fn parse_expr(input: &str) -> Expr {
    use chumsky::{Parser, Stream};
    let tokens = lexer::lex_spanned(input);
    let stream = Stream::from_iter(input.len()..input.len() + 1, tokens.into_iter());
    crate::parser::expr_parser()
        .then_ignore(chumsky::primitive::end())
        .parse(stream)
        .unwrap_or_else(|e| panic!("parse failed for {:?}: {:?}", input, e))
}

/// Parse a full translation unit (test helper).
pub(crate) fn parse_unit(input: &str) -> TranslationUnit {
    let source = crate::SourceFile::new("test.cpp", input);
    crate::parse(&source).unwrap_or_else(|e| panic!("parse failed for {:?}: {:?}", input, e))
}

/// Depth-first search for the first expression matching a predicate.
pub(crate) fn find_expr<'a>(
    tu: &'a TranslationUnit,
    pred: &dyn Fn(&Expr) -> bool,
) -> Option<&'a Expr> {
    fn search<'a>(expr: &'a Expr, pred: &dyn Fn(&Expr) -> bool) -> Option<&'a Expr> {
        if pred(expr) {
            return Some(expr);
        }
        expr.children().into_iter().find_map(|c| search(c, pred))
    }
    tu.root_exprs().into_iter().find_map(|e| search(e, pred))
}
