pub mod token;

use logos::Logos;
use std::ops::Range;
use token::Token;

/// Tokenize a source string and return a Vec of tokens
pub fn lex(source: &str) -> Vec<Token> {
    Token::lexer(source)
        .filter_map(|t| t.ok())
        .collect()
}

/// Tokenize a source string keeping the byte span of every token.
///
/// The spans index into the original source, which the rewriter relies on,
/// so unrecognized characters are dropped but never shift later spans.
pub fn lex_spanned(source: &str) -> Vec<(Token, Range<usize>)> {
    Token::lexer(source)
        .spanned()
        .filter_map(|(t, span)| t.ok().map(|t| (t, span)))
        .collect()
}

#[cfg(test)]
mod tests;
