use thiserror::Error;

use crate::source::Span;

/// Top-level error type for the Zero compiler pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    #[error("{0}")]
    Sema(#[from] SemaError),

    #[error("{0}")]
    Interp(#[from] InterpError),

    #[error("source file not loaded")]
    SourceNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Source location carried by the error, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Syntax(e) => Some(e.span),
            Error::Sema(e) => Some(e.span),
            Error::Interp(_) | Error::SourceNotFound | Error::Io(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Syntax errors (lexer + parser)
// ---------------------------------------------------------------------------

/// A lexical or syntactic error with its source location.
///
/// The parser accumulates these and keeps going (panic-mode recovery), so a
/// single compile can surface several of them.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

// ---------------------------------------------------------------------------
// Semantic errors
// ---------------------------------------------------------------------------

/// Classification of semantic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemaErrorKind {
    UndefinedVariable,
    UndefinedFunction,
    WrongArgCount,
    TypeMismatch,
    ReturnTypeMismatch,
    DuplicateDefinition,
}

/// A semantic error. Analysis never aborts early; all errors for a program
/// are collected before the pipeline stops.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SemaError {
    pub kind: SemaErrorKind,
    pub message: String,
    pub span: Span,
}

// ---------------------------------------------------------------------------
// Interpreter errors
// ---------------------------------------------------------------------------

/// Fatal interpreter failures. Arithmetic edge cases (division by zero,
/// undefined SSA lookups) are coerced to defaults instead of erroring.
#[derive(Debug, Error)]
pub enum InterpError {
    #[error("entry function not found: {name}")]
    EntryNotFound { name: String },
}
