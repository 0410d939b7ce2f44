//! Lexer for milisp source text
//!
//! Lexing is lazy: [`tokenize`] hands back an iterator that scans one token
//! per call and stops for good after the first error. Calling [`tokenize`]
//! again on the same text starts over.

mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::Span;
use crate::diagnostics::LexError;
use logos::Logos;
use tokens::Lexeme;

/// Characters of context shown before the failure point
const CONTEXT_BEFORE: usize = 16;
/// Characters of remaining input shown after the failure point
const CONTEXT_AFTER: usize = 32;

/// Lazy token stream over a source text
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, Lexeme>,
    failed: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: Lexeme::lexer(source),
            failed: false,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    fn error_at(&self, offset: usize) -> LexError {
        let rest = &self.source[offset..];
        let width = rest.chars().next().map_or(0, char::len_utf8);
        if rest.starts_with('"') {
            return LexError::UnterminatedText {
                span: Span::new(offset, offset + width).into(),
            };
        }
        let head = &self.source[..offset];
        let context_start = head
            .char_indices()
            .rev()
            .nth(CONTEXT_BEFORE - 1)
            .map_or(0, |(i, _)| i);
        LexError::UnexpectedInput {
            before: head[context_start..].to_owned(),
            rest: rest.chars().take(CONTEXT_AFTER).collect(),
            span: Span::new(offset, offset + width).into(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let lexeme = self.inner.next()?;
        let span = Span::from(self.inner.span());
        match lexeme {
            Ok(lexeme) => Some(Ok(Token {
                kind: lexeme.into_kind(),
                span,
            })),
            Err(()) => {
                self.failed = true;
                Some(Err(self.error_at(span.start)))
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Start lexing `source`
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Lex the whole of `source` up front
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize(source).collect()
}
