//! Unified error types for calltrace.
//!
//! This module provides one error type that wraps the errors of the member
//! crates, so applications only have to handle a single enum.

use thiserror::Error;

/// All calltrace errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Traversal requested before the tracer was finalized
    #[error("not finalized: {0}")]
    NotFinalized(String),

    /// The chain is unbalanced relative to the root scope
    #[error("unbalanced trace: {0}")]
    Unbalanced(String),

    /// A traversal visitor failed; the visitor's error stays reachable
    /// through `source()`
    #[error("walk failed: {0}")]
    Walk(#[source] calltrace_core::Error),

    /// I/O error while printing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid printer configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for calltrace operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the trace is just not ready yet.
    ///
    /// Callers may keep recording and try again after finalizing.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Error::NotFinalized(_))
    }

    /// Check if this error points at broken instrumentation.
    pub fn is_unbalanced(&self) -> bool {
        matches!(self, Error::Unbalanced(_))
    }
}

// Convert from engine errors
impl From<calltrace_core::Error> for Error {
    fn from(e: calltrace_core::Error) -> Self {
        use calltrace_core::Error as CoreError;
        match e {
            CoreError::NotFinalized { last } => {
                Error::NotFinalized(format!("last node was {}", last))
            }
            CoreError::NotRootExit { name } => {
                Error::Unbalanced(format!("scope {} is not closed", name))
            }
            walk @ CoreError::Walk { .. } => Error::Walk(walk),
        }
    }
}

// Convert from printer errors
impl From<calltrace_printer::PrinterError> for Error {
    fn from(e: calltrace_printer::PrinterError) -> Self {
        use calltrace_printer::PrinterError as PE;
        match e {
            PE::Io(io) => Error::Io(io),
            PE::Trace(core) => core.into(),
            PE::UnknownFlavour(name) => Error::Config(format!("unknown flavour {}", name)),
        }
    }
}
