//! Parser for milisp
//!
//! A recursive descent parser over a token stream with one token of
//! lookahead. A document is exactly one form; anything after it is an error.

use crate::ast::Node;
use crate::common::Span;
use crate::diagnostics::{LexError, LispError};
use crate::lexer::{self, Token, TokenKind};

/// Parse source text into its single top-level form
pub fn parse(source: &str) -> Result<Node, LispError> {
    let node = parse_tokens(lexer::tokenize(source))?;
    tracing::trace!(depth = node.depth(), "parsed document");
    Ok(node)
}

/// Parse an already lexed token stream
pub fn parse_tokens<I>(tokens: I) -> Result<Node, LispError>
where
    I: IntoIterator<Item = Result<Token, LexError>>,
{
    Parser::new(tokens.into_iter()).parse_document()
}

/// Parser state
struct Parser<I> {
    tokens: I,
    /// End offset of the last token pulled, for end-of-input spans
    last_end: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    fn new(tokens: I) -> Self {
        Self {
            tokens,
            last_end: 0,
        }
    }

    fn advance(&mut self) -> Result<Option<Token>, LispError> {
        match self.tokens.next() {
            Some(Ok(token)) => {
                self.last_end = token.span.end;
                Ok(Some(token))
            }
            Some(Err(err)) => Err(err.into()),
            None => Ok(None),
        }
    }

    fn parse_document(&mut self) -> Result<Node, LispError> {
        let first = self.advance()?.ok_or(LispError::UnexpectedEof {
            span: Span::at(self.last_end).into(),
            note: "expected a form",
        })?;
        let node = self.parse_form(first)?;

        match self.advance()? {
            None => Ok(node),
            Some(Token {
                kind: TokenKind::ParenClose,
                span,
            }) => Err(LispError::UnmatchedClose { span: span.into() }),
            Some(token) => Err(LispError::TrailingTokens {
                span: token.span.into(),
            }),
        }
    }

    fn parse_form(&mut self, token: Token) -> Result<Node, LispError> {
        match token.kind {
            TokenKind::ParenOpen => self.parse_list(token.span),
            TokenKind::ParenClose => Err(LispError::UnmatchedClose {
                span: token.span.into(),
            }),
            TokenKind::Number(n) => Ok(Node::Number(n)),
            TokenKind::Text(s) => Ok(Node::Text(s)),
            TokenKind::Symbol(s) => Ok(Node::Symbol(s)),
        }
    }

    fn parse_list(&mut self, open: Span) -> Result<Node, LispError> {
        let mut children = Vec::new();
        loop {
            let token = self.advance()?.ok_or(LispError::UnexpectedEof {
                span: open.into(),
                note: "this `(` is never closed",
            })?;
            if matches!(token.kind, TokenKind::ParenClose) {
                return Ok(Node::List(children));
            }
            children.push(self.parse_form(token)?);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_span_points_at_open_paren() {
        let err = parse("  (a (b)").unwrap_err();
        assert!(matches!(err, LispError::UnexpectedEof { .. }));
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_trailing_span() {
        let err = parse("(a) b").unwrap_err();
        assert!(matches!(err, LispError::TrailingTokens { .. }));
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn test_parse_tokens_from_vec() {
        let tokens = lexer::lex("(a 1)").unwrap();
        let node = parse_tokens(tokens.into_iter().map(Ok)).unwrap();
        assert_eq!(node, Node::list([Node::symbol("a"), Node::Number(1.0)]));
    }
}
