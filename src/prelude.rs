//! Convenient imports for calltrace.
//!
//! ```
//! use calltrace::prelude::*;
//!
//! let mut tracer = Tracer::new();
//! let t = enter!(tracer, "work");
//! message!(tracer, "step", 1);
//! tracer.exit(t);
//! tracer.finalize();
//! ```

// Engine
pub use calltrace_core::{
    enter, here, message, scope, ExitToken, MessageRef, NodeKind, NodeRef, Scope, Traversable,
    Tracer, TracerBuilder,
};

// Context propagation
pub use calltrace_context::{
    here_ctx, message_ctx, trace_ctx, with_tracer, Context, SharedTracer,
};

// Printing
pub use calltrace_printer::{pretty_sprint, render_trace, trace_printer, Flavour, PrinterOptions};

// Error handling
pub use crate::error::{Error, Result};
