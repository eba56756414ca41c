//! Context Propagation Tests
//!
//! Instrumentation written against a `Context` records into the bound
//! tracer and is a silent no-op otherwise.

use crate::common::*;
use calltrace::context::{get_tracer, shared};
use calltrace::prelude::*;

fn handle_request(ctx: &Context, id: u32) -> u32 {
    let _scope = trace_ctx!(ctx);
    message_ctx!(ctx, "request", id);
    load_user(ctx, id) + 1
}

fn load_user(ctx: &Context, id: u32) -> u32 {
    let _scope = trace_ctx!(ctx, "load_user[{}]", id);
    message_ctx!(ctx, here_ctx!(ctx));
    id * 2
}

#[test]
fn unbound_context_runs_instrumented_code() {
    let ctx = Context::background();
    assert_eq!(handle_request(&ctx, 4), 9);
    assert!(get_tracer(&ctx).is_none());
    assert_eq!(here_ctx!(&ctx), "");
}

#[test]
fn bound_context_records_nested_scopes() {
    init_tracing();
    let tracer = shared(Tracer::new());
    let ctx = with_tracer(&Context::background(), tracer.clone());

    assert_eq!(handle_request(&ctx, 4), 9);
    tracer.borrow_mut().finalize();

    let tracer = tracer.borrow();
    let messages = tracer.messages().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].text(), "request 4");
    assert_eq!(messages[0].stack(), vec!["handle_request"]);
    assert_eq!(messages[1].text(), "load_user");
    assert_eq!(messages[1].stack(), vec!["load_user[4]", "handle_request"]);
}

#[test]
fn derived_context_does_not_bind_parent() {
    let parent = Context::background();
    let tracer: SharedTracer = shared(Tracer::new());
    let child = with_tracer(&parent, tracer);

    assert!(get_tracer(&child).is_some());
    assert!(get_tracer(&parent).is_none());
}

#[test]
fn bound_context_renders_listing() {
    let tracer = shared(Tracer::new());
    let ctx = with_tracer(&Context::background(), tracer.clone());
    handle_request(&ctx, 1);
    tracer.borrow_mut().finalize();

    let listing = calltrace::render(&tracer.borrow(), false).unwrap();
    assert_eq!(
        listing,
        "> handle_request\n..> load_user[1]\n..< load_user[1]\n< handle_request\n"
    );
}

// ============================================================================
// Instrumented code inside scope names and message parts
// ============================================================================

fn lookup(ctx: &Context, id: u32) -> u32 {
    let _scope = trace_ctx!(ctx, "lookup");
    message_ctx!(ctx, "looking up", id);
    id + 100
}

/// Display impl that records its own message while being rendered.
struct Chatty<'a>(&'a Context);

impl std::fmt::Display for Chatty<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        message_ctx!(self.0, "rendering");
        f.write_str("chatty")
    }
}

#[test]
fn scope_name_may_call_instrumented_code() {
    let tracer = shared(Tracer::new());
    let ctx = with_tracer(&Context::background(), tracer.clone());
    {
        let _scope = trace_ctx!(&ctx, "user {}", lookup(&ctx, 1));
        message_ctx!(&ctx, "inside");
    }
    tracer.borrow_mut().finalize();

    let listing = calltrace::render(&tracer.borrow(), true).unwrap();
    assert_eq!(
        listing,
        "> lookup\n..@ looking up 1\n< lookup\n> user 101\n..@ inside\n< user 101\n"
    );
}

#[test]
fn message_part_may_record_its_own_message() {
    let tracer = shared(Tracer::new());
    let ctx = with_tracer(&Context::background(), tracer.clone());
    {
        let _scope = trace_ctx!(&ctx, "outer");
        message_ctx!(&ctx, Chatty(&ctx));
        message_ctx(&ctx, Chatty(&ctx));
    }
    tracer.borrow_mut().finalize();

    let tracer = tracer.borrow();
    let texts: Vec<_> = tracer
        .messages()
        .unwrap()
        .iter()
        .map(|m| m.text().to_string())
        .collect();
    assert_eq!(texts, vec!["rendering", "chatty", "rendering", "chatty"]);
}
