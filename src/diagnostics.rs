//! Error types with source locations
//!
//! Every error derives `miette::Diagnostic` and carries a label span but no
//! copy of the source; callers attach it with
//! [`miette::Report::with_source_code`] when rendering.

use crate::common::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Failure to split source text into tokens
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected symbols: \"{before}<HERE>{rest}\"")]
    #[diagnostic(
        code(lex::unexpected_input),
        help("a backslash may only appear inside a quoted text literal")
    )]
    UnexpectedInput {
        /// A few characters preceding the failure point
        before: String,
        /// The input remaining at the failure point (truncated)
        rest: String,
        #[label("no token starts here")]
        span: SourceSpan,
    },

    #[error("Unterminated text literal")]
    #[diagnostic(code(lex::unterminated_text), help("close the literal with `\"`"))]
    UnterminatedText {
        #[label("text literal opened here")]
        span: SourceSpan,
    },
}

impl LexError {
    /// Byte offset where lexing stopped
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnexpectedInput { span, .. } | LexError::UnterminatedText { span } => {
                span.offset()
            }
        }
    }
}

/// Malformed document: the parser never returns a partial tree
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum LispError {
    #[error("Unexpected end of input")]
    #[diagnostic(code(parse::unexpected_eof))]
    UnexpectedEof {
        #[label("{note}")]
        span: SourceSpan,
        note: &'static str,
    },

    #[error("Extra \")\" without a matching \"(\"")]
    #[diagnostic(code(parse::unmatched_close))]
    UnmatchedClose {
        #[label("unmatched close paren")]
        span: SourceSpan,
    },

    #[error("Input continues after the first complete form")]
    #[diagnostic(
        code(parse::trailing_tokens),
        help("a document holds exactly one top-level form; wrap several forms in a host operation")
    )]
    TrailingTokens {
        #[label("expected end of input")]
        span: SourceSpan,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),
}

impl LispError {
    /// Byte offset the error points at
    pub fn offset(&self) -> usize {
        match self {
            LispError::UnexpectedEof { span, .. }
            | LispError::UnmatchedClose { span }
            | LispError::TrailingTokens { span } => span.offset(),
            LispError::Lex(err) => err.offset(),
        }
    }
}

/// Failure while evaluating a tree
///
/// Host operations report their own failures through [`EvalError::Custom`],
/// [`EvalError::Type`], [`EvalError::Arity`] or [`EvalError::Host`]; the
/// evaluator propagates them unchanged.
#[derive(Error, Debug, Diagnostic)]
pub enum EvalError {
    #[error("Unbound symbol `{name}`")]
    #[diagnostic(
        code(eval::unbound_symbol),
        help("every symbol must be bound in the host environment")
    )]
    UnboundSymbol { name: String },

    #[error("`{form}` is not an operation")]
    #[diagnostic(
        code(eval::not_callable),
        help("the first element of a form must evaluate to an operation")
    )]
    NotCallable { form: String },

    #[error("Cannot evaluate empty form `()`")]
    #[diagnostic(code(eval::empty_form))]
    EmptyForm,

    #[error("Type error: expected {expected}, found {found}")]
    #[diagnostic(code(eval::type_mismatch))]
    Type {
        expected: &'static str,
        found: String,
    },

    #[error("`{operation}` expects {expected} argument(s), found {found}")]
    #[diagnostic(code(eval::arity))]
    Arity {
        operation: String,
        expected: String,
        found: usize,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] LispError),

    #[error("{0}")]
    #[diagnostic(code(eval::host))]
    Host(Box<dyn std::error::Error + Send + Sync>),

    #[error("{0}")]
    #[diagnostic(code(eval::custom))]
    Custom(String),
}

impl EvalError {
    pub fn custom(message: impl Into<String>) -> Self {
        EvalError::Custom(message.into())
    }

    /// Wrap an arbitrary host error
    pub fn host(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        EvalError::Host(err.into())
    }

    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        EvalError::Type {
            expected,
            found: found.into(),
        }
    }
}
