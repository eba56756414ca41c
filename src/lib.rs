//! # calltrace
//!
//! Manual call-stack tracer for ad-hoc diagnostic instrumentation.
//!
//! Callers mark scope entry and exit explicitly and attach free-form
//! messages. The tracer keeps an ordered chain of those events, which can be
//! walked or pretty-printed once the tracer is finalized.
//!
//! ## Quick Start
//!
//! ```
//! use calltrace::prelude::*;
//!
//! fn first(tracer: &mut Tracer) {
//!     let mut tracer = scope!(tracer);
//!     tracer.message("First");
//!     second(&mut tracer);
//! }
//!
//! fn second(tracer: &mut Tracer) {
//!     let mut tracer = scope!(tracer);
//!     tracer.message("Second");
//! }
//!
//! let mut tracer = Tracer::new();
//! first(&mut tracer);
//! tracer.finalize();
//!
//! let messages = tracer.messages()?;
//! assert_eq!(messages[1].stack(), vec!["second", "first"]);
//!
//! let listing = calltrace::render(&tracer, true)?;
//! assert_eq!(listing, "> first\n..@ First\n..> second\n....@ Second\n..< second\n< first\n");
//! # Ok::<(), calltrace::Error>(())
//! ```
//!
//! ## Crates
//!
//! - [`engine`] - the trace engine
//! - [`context`] - binding a tracer to a task-scoped [`Context`]
//! - [`printer`] - message and trace rendering
//!
//! Tracers are single-threaded: one tracer follows one logical call
//! sequence.

#![warn(missing_docs)]

mod error;

pub mod prelude;

pub use error::{Error, Result};

pub use calltrace_context as context;
pub use calltrace_core as engine;
pub use calltrace_printer as printer;

pub use calltrace_context::Context;
pub use calltrace_core::{Tracer, TracerBuilder};

/// Render a finalized tracer as an indented event listing.
pub fn render(tracer: &Tracer, include_messages: bool) -> Result<String> {
    let walk = tracer.as_traversable()?;
    let options = calltrace_printer::PrinterOptions::default().include_messages(include_messages);
    Ok(calltrace_printer::render_trace(&walk, &options)?)
}
