//! Core trace engine for calltrace
//!
//! This crate implements the manual call-stack tracer:
//! - Tracer: append-only chain of Enter/Exit/Message nodes
//! - ExitToken / Scope: capabilities for closing a scope
//! - Traversable: read-only walk over a finalized chain
//! - Naming macros: `here!`, `enter!`, `scope!`, `message!`
//!
//! ```
//! use calltrace_core::Tracer;
//!
//! let mut tracer = Tracer::new();
//! let first = tracer.enter("first");
//! tracer.message("First");
//! let second = tracer.enter("second");
//! tracer.message("Second");
//! tracer.exit(second);
//! tracer.exit(first);
//! tracer.finalize();
//!
//! let messages = tracer.messages().unwrap();
//! assert_eq!(messages[1].stack(), vec!["second", "first"]);
//! assert_eq!(messages[1].to_string(), "first:second: Second");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod naming;
pub mod node;
pub mod payload;
pub mod tracer;
pub mod traverse;

pub use error::{Error, Result, VisitError};
pub use node::{
    Enter, Exit, Message, MessageRef, Node, NodeId, NodeKind, NodeRef, END_NODE, START_NODE,
};
pub use payload::EMPTY_MESSAGE;
pub use tracer::{ExitToken, Scope, Tracer, TracerBuilder};
pub use traverse::Traversable;
