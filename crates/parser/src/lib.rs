pub mod ast;
pub mod error;
pub mod parent;
pub mod parser;
pub mod source;
pub mod types;

use chumsky::{Parser, Stream};

pub use ast::{Expr, ExprKind, NodeId, Span, TranslationUnit};
pub use error::ParseError;
pub use parent::{ParentEdge, ParentMap};
pub use source::SourceFile;
pub use types::{Type, TypeMap, TypeResolver};

/// Parse a source file into a numbered translation unit.
///
/// Every expression node comes back with a unique NodeId and the exact byte
/// span of its source text, ready for the type resolver and the parent map.
pub fn parse(source: &SourceFile) -> Result<TranslationUnit, Vec<ParseError>> {
    let tokens = lexer::lex_spanned(source.text());
    let len = source.text().len();
    let stream = Stream::from_iter(len..len + 1, tokens.into_iter());
    let mut tu = parser::parser().parse(stream)?;
    ast::assign_ids(&mut tu);
    Ok(tu)
}

#[cfg(test)]
mod tests;
