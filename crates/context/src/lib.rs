//! Context propagation for calltrace
//!
//! Threads a tracer through code that only sees a [`Context`], without any
//! process-wide state. When no tracer is bound every helper does nothing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bind;
pub mod context;

pub use bind::{
    get_tracer, get_tracer_opt, has_tracer, message_ctx, message_parts_ctx, shared, trace_ctx,
    trace_ctx_with, with_tracer, CtxScope, SharedTracer,
};
pub use context::Context;

#[doc(hidden)]
pub mod __private {
    pub use calltrace_core::here;
}
