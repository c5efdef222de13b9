// Error handling for the transformation engine
//
// Per-node failures are recovered locally by the visitor (recorded in the
// statistics and diagnostics, traversal continues); only a front-end
// failure is fatal for a file. The exit codes feed the CLI's process
// status.

use parser::ast::Span;
use std::fmt;

/// Transformation error types
#[derive(Debug, Clone)]
pub enum TransformError {
    /// The AST front-end failed to produce a tree; nothing is written.
    FrontEnd {
        message: String,
    },

    /// Operand source text could not be recovered for a node.
    Extraction {
        what: String,
        span: Option<Span>,
    },

    /// The code generator saw an operator it has no wrapper for.
    Generation {
        operator: String,
        span: Option<Span>,
    },

    /// The rewrite buffer rejected an edit (range conflict).
    Commit {
        details: String,
        span: Option<Span>,
    },

    /// Reading an input or writing an output failed.
    Io {
        path: String,
        details: String,
    },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::FrontEnd { message } => {
                write!(f, "front-end failure: {}", message)
            }
            TransformError::Extraction { what, .. } => {
                write!(f, "could not extract source text for {}", what)
            }
            TransformError::Generation { operator, .. } => {
                write!(f, "no instrumentation wrapper for operator {}", operator)
            }
            TransformError::Commit { details, .. } => {
                write!(f, "replacement rejected: {}", details)
            }
            TransformError::Io { path, details } => {
                write!(f, "i/o error on '{}': {}", path, details)
            }
        }
    }
}

impl std::error::Error for TransformError {}

impl TransformError {
    /// Get the exit code for this error type
    /// Used by main.rs to return specific exit codes
    pub fn exit_code(&self) -> i32 {
        match self {
            TransformError::FrontEnd { .. } => 101,
            TransformError::Extraction { .. } => 102,
            TransformError::Generation { .. } => 103,
            TransformError::Commit { .. } => 104,
            TransformError::Io { .. } => 105,
        }
    }

    pub fn span(&self) -> Option<&Span> {
        match self {
            TransformError::Extraction { span, .. }
            | TransformError::Generation { span, .. }
            | TransformError::Commit { span, .. } => span.as_ref(),
            _ => None,
        }
    }
}

/// Convenient Result type for engine operations
pub type TransformResult<T> = Result<T, TransformError>;
