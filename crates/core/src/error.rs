//! Error types for the trace engine.
//!
//! Only conditions a caller can reasonably react to are errors here.
//! Broken token discipline (foreign tokens, out-of-order exits, finalizing
//! twice) is a contract violation and panics instead.

use thiserror::Error;

/// Boxed error produced by a traversal visitor.
pub type VisitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Trace engine errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The chain does not end with a closing exit yet.
    ///
    /// `last` is the rendering of the last node in the chain.
    #[error("not traversable: tracer is not finalized, last node was {last}")]
    NotFinalized {
        /// Rendering of the last node
        last: String,
    },

    /// The chain ends with an exit that does not close the root scope, or
    /// the root was closed while `name` was still open.
    #[error("not traversable: chain is not closed by the root exit, unbalanced scope {name}")]
    NotRootExit {
        /// Name of the offending scope
        name: String,
    },

    /// A traversal visitor failed.
    #[error("error in walk function at node {position}: {source}")]
    Walk {
        /// Chain position of the node being visited
        position: usize,
        /// The visitor's error
        #[source]
        source: VisitError,
    },
}

/// Result type for trace engine operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the chain simply has not been finalized yet.
    pub fn is_not_finalized(&self) -> bool {
        matches!(self, Error::NotFinalized { .. })
    }

    /// Check if the chain is unbalanced relative to the root scope.
    pub fn is_not_root_exit(&self) -> bool {
        matches!(self, Error::NotRootExit { .. })
    }

    /// Check if a visitor aborted a walk.
    pub fn is_walk(&self) -> bool {
        matches!(self, Error::Walk { .. })
    }
}
