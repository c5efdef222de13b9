use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\r\n\f]+")] // Whitespace is trivia
#[logos(skip(r"//[^\n]*", allow_greedy = true))] // Line comments
#[logos(skip r"/\*([^*]|\*[^/])*\*/")] // Block comments
#[logos(skip(r"#[^\n]*", allow_greedy = true))] // Preprocessor lines are trivia for the parser
pub enum Token {
    // --- Keywords ---
    #[token("template")]
    Template,

    #[token("typename")]
    Typename,

    #[token("class")]
    Class,

    #[token("struct")]
    Struct,

    #[token("const")]
    Const,

    #[token("unsigned")]
    Unsigned,

    #[token("signed")]
    Signed,

    #[token("void")]
    Void,

    #[token("bool")]
    Bool,

    #[token("char")]
    Char,

    #[token("short")]
    Short,

    #[token("int")]
    Int,

    #[token("long")]
    Long,

    #[token("float")]
    Float,

    #[token("double")]
    Double,

    #[token("size_t")]
    SizeT,

    #[token("return")]
    Return,

    #[token("if")]
    If,

    #[token("else")]
    Else,

    #[token("while")]
    While,

    #[token("for")]
    For,

    #[token("sizeof")]
    Sizeof,

    #[token("alignof")]
    Alignof,

    #[token("true")]
    True,

    #[token("false")]
    False,

    // --- Literals ---

    // Identifiers: variable, function and type names
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Integer literals keep their exact spelling (hex, suffixes)
    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[uUlL]*", |lex| lex.slice().to_string())]
    IntLit(String),

    // Float literals (1.5, 1.5f, 1e10)
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[fFlL]?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFlL]?", |lex| lex.slice().to_string())]
    FloatLit(String),

    // Character literals ('a', '\n')
    #[regex(r"'([^'\\]|\\.)'", |lex| lex.slice().to_string())]
    CharLit(String),

    // String literals
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice().to_string())]
    StrLit(String),

    // --- Operators ---
    #[token("==")]
    DoubleEq,

    #[token("!=")]
    NotEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    #[token("&&")]
    AndAnd,

    #[token("||")]
    OrOr,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("%=")]
    PercentEq,

    #[token("->")]
    Arrow,

    #[token("::")]
    ColonColon,

    #[token("=")]
    Eq,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("!")]
    Not,

    #[token("~")]
    Tilde,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    #[token("?")]
    Question,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    // --- Delimiters ---
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,
}

// This helps to show the token prettily in diagnostics
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
