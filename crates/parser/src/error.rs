// Error reporting with Ariadne
//
// Converts Chumsky parse errors into readable reports. A parse failure is
// fatal for the file being processed: no transformed output is written.

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::error::Simple;
use lexer::token::Token;

/// Type alias for Chumsky parser errors
pub type ParseError = Simple<Token>;

/// Converts Chumsky errors to Ariadne reports on stderr
pub fn report_errors(filename: &str, source: &str, errors: &[ParseError]) {
    for error in errors {
        let span = error.span();
        let msg = format!("{}", error);

        let report = Report::build(ReportKind::Error, filename, span.start)
            .with_code("E001")
            .with_message("Parse Error")
            .with_label(
                Label::new((filename, span))
                    .with_message(msg)
                    .with_color(Color::Red),
            );

        // Add expected tokens if available (limit to 5 to avoid overwhelming output)
        let report = if error.expected().len() > 0 {
            let expected: Vec<String> = error.expected().take(5).map(format_expected).collect();

            let help_msg = if error.expected().len() > 5 {
                format!("Expected one of: {}, ...", expected.join(", "))
            } else {
                format!("Expected: {}", expected.join(", "))
            };

            report.with_help(help_msg)
        } else {
            report
        };

        report
            .finish()
            .eprint((filename, Source::from(source)))
            .unwrap();
    }
}

/// Format expected token for human-readable output
fn format_expected(token: &Option<Token>) -> String {
    match token {
        Some(Token::Plus) => "'+'".to_string(),
        Some(Token::Minus) => "'-'".to_string(),
        Some(Token::Star) => "'*'".to_string(),
        Some(Token::Slash) => "'/'".to_string(),
        Some(Token::Percent) => "'%'".to_string(),
        Some(Token::Eq) => "'='".to_string(),
        Some(Token::DoubleEq) => "'=='".to_string(),
        Some(Token::NotEq) => "'!='".to_string(),
        Some(Token::Lt) => "'<'".to_string(),
        Some(Token::Gt) => "'>'".to_string(),
        Some(Token::LtEq) => "'<='".to_string(),
        Some(Token::GtEq) => "'>='".to_string(),
        Some(Token::PlusPlus) => "'++'".to_string(),
        Some(Token::MinusMinus) => "'--'".to_string(),
        Some(Token::Ampersand) => "'&'".to_string(),
        Some(Token::LParen) => "'('".to_string(),
        Some(Token::RParen) => "')'".to_string(),
        Some(Token::LBracket) => "'['".to_string(),
        Some(Token::RBracket) => "']'".to_string(),
        Some(Token::LBrace) => "'{'".to_string(),
        Some(Token::RBrace) => "'}'".to_string(),
        Some(Token::Comma) => "','".to_string(),
        Some(Token::Semicolon) => "';'".to_string(),
        Some(Token::Colon) => "':'".to_string(),
        Some(Token::Return) => "keyword 'return'".to_string(),
        Some(Token::If) => "keyword 'if'".to_string(),
        Some(Token::Else) => "keyword 'else'".to_string(),
        Some(Token::While) => "keyword 'while'".to_string(),
        Some(Token::For) => "keyword 'for'".to_string(),
        Some(Token::Sizeof) => "keyword 'sizeof'".to_string(),
        Some(Token::Template) => "keyword 'template'".to_string(),
        Some(Token::Typename) => "keyword 'typename'".to_string(),
        Some(Token::Identifier(_)) => "identifier".to_string(),
        Some(Token::IntLit(_)) => "integer literal".to_string(),
        Some(Token::FloatLit(_)) => "float literal".to_string(),
        Some(Token::CharLit(_)) => "character literal".to_string(),
        Some(Token::StrLit(_)) => "string literal".to_string(),
        Some(t) => format!("{:?}", t),
        None => "end of input".to_string(),
    }
}
