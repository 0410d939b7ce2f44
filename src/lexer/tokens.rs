//! Token definitions for the milisp lexer

use crate::common::Span;
use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A token with its kind and span
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Token kinds produced by the lexer
///
/// Whitespace and comments never become tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    ParenOpen,
    ParenClose,
    Number(f64),
    Text(String),
    Symbol(String),
}

impl TokenKind {
    pub fn is_paren(&self) -> bool {
        matches!(self, TokenKind::ParenOpen | TokenKind::ParenClose)
    }

    /// Short tag used in token dumps
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::ParenOpen => "BEG",
            TokenKind::ParenClose => "END",
            TokenKind::Number(_) => "NUM",
            TokenKind::Text(_) => "STR",
            TokenKind::Symbol(_) => "SYM",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::ParenOpen => write!(f, "("),
            TokenKind::ParenClose => write!(f, ")"),
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Text(s) => write!(f, "{:?}", s),
            TokenKind::Symbol(s) => write!(f, "{}", s),
        }
    }
}

/// Raw lexemes recognized by logos, before bare atoms are classified
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
pub(crate) enum Lexeme {
    #[token("(")]
    Open,
    #[token(")")]
    Close,
    #[regex(r#""([^"\\]|\\(.|\n))*""#, unescape)]
    Text(String),
    #[regex(r#"[^ \t\r\n\f()"\\#]+"#, |lex| lex.slice().to_owned())]
    Bare(String),
}

impl Lexeme {
    /// Bare atoms that parse as `f64` are numbers, everything else is a symbol
    pub(crate) fn into_kind(self) -> TokenKind {
        match self {
            Lexeme::Open => TokenKind::ParenOpen,
            Lexeme::Close => TokenKind::ParenClose,
            Lexeme::Text(s) => TokenKind::Text(s),
            Lexeme::Bare(s) => match s.parse::<f64>() {
                Ok(n) => TokenKind::Number(n),
                Err(_) => TokenKind::Symbol(s),
            },
        }
    }
}

/// Strip the quotes; a backslash keeps the next character literally.
fn unescape(lex: &mut logos::Lexer<'_, Lexeme>) -> String {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
