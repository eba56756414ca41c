//! Printer error types.

use thiserror::Error;

/// Errors produced while rendering a trace.
#[derive(Debug, Error)]
pub enum PrinterError {
    /// The output sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The chain could not be walked
    #[error("trace error: {0}")]
    Trace(#[from] calltrace_core::Error),

    /// Unknown flavour name
    #[error("unknown flavour: {0}")]
    UnknownFlavour(String),
}

/// Result type for printer operations.
pub type Result<T> = std::result::Result<T, PrinterError>;
