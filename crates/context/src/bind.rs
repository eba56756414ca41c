//! Binding a tracer to a [`Context`].
//!
//! Every helper here is a no-op when the context carries no tracer, so the
//! instrumentation can stay in the code permanently:
//!
//! ```
//! use calltrace_context::{trace_ctx, message_ctx, Context};
//!
//! fn work(ctx: &Context) {
//!     let _scope = trace_ctx!(ctx);
//!     message_ctx!(ctx, "working on", 3, "items");
//! }
//!
//! // nothing bound: nothing recorded, nothing fails
//! work(&Context::background());
//! ```

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use calltrace_core::payload::render_parts;
use calltrace_core::{ExitToken, Tracer};
use tracing::trace;

use crate::context::Context;

/// A tracer shared between a context and the code that created it.
pub type SharedTracer = Rc<RefCell<Tracer>>;

/// Private key the tracer is stored under.
struct TracerKey;

/// Wrap a tracer for binding.
pub fn shared(tracer: Tracer) -> SharedTracer {
    Rc::new(RefCell::new(tracer))
}

/// Derive a context carrying `tracer`.
pub fn with_tracer(ctx: &Context, tracer: SharedTracer) -> Context {
    trace!(tracer = tracer.borrow().id(), "binding tracer to context");
    ctx.with_value::<TracerKey, SharedTracer>(tracer)
}

/// The tracer bound to `ctx`, if any.
pub fn get_tracer(ctx: &Context) -> Option<SharedTracer> {
    ctx.value::<TracerKey, SharedTracer>().cloned()
}

/// Like [`get_tracer`], for call sites that may have no context at all.
pub fn get_tracer_opt(ctx: Option<&Context>) -> Option<SharedTracer> {
    ctx.and_then(get_tracer)
}

/// Is a tracer bound to `ctx`?
pub fn has_tracer(ctx: &Context) -> bool {
    get_tracer(ctx).is_some()
}

/// Guard returned by [`trace_ctx`]; exits its scope on drop.
///
/// Inert when no tracer was bound.
#[derive(Debug)]
#[must_use = "the scope closes as soon as the guard is dropped"]
pub struct CtxScope {
    active: Option<(SharedTracer, ExitToken)>,
}

impl CtxScope {
    /// A guard that does nothing.
    pub fn noop() -> Self {
        Self { active: None }
    }

    /// Is this guard holding an open scope?
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for CtxScope {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Some((tracer, token)) = self.active.take() {
            tracer.borrow_mut().exit(token);
        }
    }
}

/// Enter scope `name` on the bound tracer.
pub fn trace_ctx(ctx: &Context, name: impl Into<String>) -> CtxScope {
    trace_ctx_with(ctx, || name.into())
}

/// Enter a scope on the bound tracer, computing its name only when a tracer
/// is bound.
pub fn trace_ctx_with<F>(ctx: &Context, name: F) -> CtxScope
where
    F: FnOnce() -> String,
{
    match get_tracer(ctx) {
        Some(tracer) => {
            // the name may itself be instrumented; build it before borrowing
            let name = name();
            let token = tracer.borrow_mut().enter(name);
            CtxScope {
                active: Some((tracer, token)),
            }
        }
        None => CtxScope::noop(),
    }
}

/// Record a message on the bound tracer.
pub fn message_ctx(ctx: &Context, payload: impl Display) {
    if let Some(tracer) = get_tracer(ctx) {
        let text = payload.to_string();
        tracer.borrow_mut().message(text);
    }
}

/// Record a message from displayable parts on the bound tracer.
pub fn message_parts_ctx(ctx: &Context, parts: &[&dyn Display]) {
    if let Some(tracer) = get_tracer(ctx) {
        let text = render_parts(parts);
        tracer.borrow_mut().message(text);
    }
}

/// Enter a scope on the tracer bound to a context, named by the naming rule.
///
/// Returns a [`CtxScope`] guard.
#[macro_export]
macro_rules! trace_ctx {
    ($ctx:expr) => {
        $crate::trace_ctx($ctx, $crate::__private::here!())
    };
    ($ctx:expr, $name:expr) => {
        $crate::trace_ctx($ctx, $name)
    };
    ($ctx:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::trace_ctx_with($ctx, || ::std::format!($fmt, $($arg)+))
    };
}

/// Name of the calling function when a tracer is bound, else `""`.
#[macro_export]
macro_rules! here_ctx {
    ($ctx:expr) => {
        if $crate::has_tracer($ctx) {
            $crate::__private::here!()
        } else {
            ""
        }
    };
}

/// Record a message on the tracer bound to a context.
#[macro_export]
macro_rules! message_ctx {
    ($ctx:expr) => {
        $crate::message_parts_ctx($ctx, &[])
    };
    ($ctx:expr, $($part:expr),+ $(,)?) => {
        $crate::message_parts_ctx($ctx, &[$(&$part as &dyn ::std::fmt::Display),+])
    };
}
