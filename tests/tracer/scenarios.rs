//! Scenario Tests
//!
//! Instrumented call trees as they appear in real code: helper functions
//! that open their own scope, helpers that don't, and traces that are left
//! unbalanced.

use crate::common::*;
use calltrace::prelude::*;

// ============================================================================
// Instrumented helpers
// ============================================================================

fn first(tracer: &mut Tracer) {
    let mut tracer = scope!(tracer);
    tracer.message("First");
    second(&mut tracer);
}

fn second(tracer: &mut Tracer) {
    let mut tracer = scope!(tracer);
    third(&mut tracer);
    // recorded after third's message
    tracer.message("Third");
}

fn third(tracer: &mut Tracer) {
    let mut tracer = scope!(tracer);
    tracer.message("Second");
}

// ============================================================================
// Helpers that never open a scope
// ============================================================================

fn first_gap(tracer: &mut Tracer) {
    let mut tracer = scope!(tracer);
    tracer.message("First");
    second_gap(&mut tracer);
}

fn second_gap(tracer: &mut Tracer) {
    tracer.message("Second");
    third_gap(tracer);
}

fn third_gap(tracer: &mut Tracer) {
    tracer.message("Third");
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn new_tracer_is_not_ready() {
    let tracer = Tracer::new();
    assert_eq!(tracer.depth(), 1);
    assert!(tracer.messages().unwrap_err().is_not_finalized());
}

#[test]
fn two_nested_scopes_with_messages() {
    let mut tracer = logged_tracer();
    let outer = tracer.enter("first");
    tracer.message("First");
    let inner = tracer.enter("second");
    tracer.message("Second");
    tracer.exit(inner);
    tracer.exit(outer);
    tracer.finalize();

    let messages = tracer.messages().unwrap();
    let texts: Vec<_> = messages.iter().map(|m| m.text()).collect();
    assert_eq!(texts, vec!["First", "Second"]);
    assert_eq!(messages[0].stack(), vec!["first"]);
    assert_eq!(messages[1].stack(), vec!["second", "first"]);
}

#[test]
fn immediately_finalized_tracer() {
    let mut tracer = Tracer::new();
    tracer.finalize();

    assert!(tracer.messages().unwrap().is_empty());
    let walk = tracer.as_traversable().unwrap();
    assert_eq!(walk.iter().count(), 2);
    assert!(walk.iter().next().unwrap().is_root_enter());
    assert!(walk.iter().last().unwrap().is_root_exit());
}

#[test]
fn scope_never_exited_is_unbalanced() {
    let mut tracer = Tracer::new();
    let _forgotten = tracer.enter("forgotten");
    tracer.message("inside");
    tracer.finalize();

    let walk = tracer.as_traversable();
    let err = walk.unwrap_err();
    assert!(err.is_not_root_exit());
    assert!(err.to_string().contains("forgotten"));

    let facade: calltrace::Error = err.into();
    assert!(facade.is_unbalanced());
}

#[test]
fn uninstrumented_helpers_share_lineage() {
    let mut tracer = Tracer::new();
    first_gap(&mut tracer);
    tracer.finalize();

    let messages = tracer.messages().unwrap();
    assert_eq!(messages.len(), 3);
    for message in &messages {
        assert_eq!(message.stack(), vec!["first_gap"]);
    }
    assert_eq!(messages[2].to_string(), "first_gap: Third");
}

#[test]
fn instrumented_call_tree_orders_messages_chronologically() {
    let mut tracer = Tracer::new();
    first(&mut tracer);
    tracer.finalize();

    let messages = tracer.messages().unwrap();
    let texts: Vec<_> = messages.iter().map(|m| m.text()).collect();
    assert_eq!(texts, vec!["First", "Second", "Third"]);
    assert_eq!(messages[1].stack(), vec!["third", "second", "first"]);
    assert_eq!(messages[2].stack(), vec!["second", "first"]);
    assert_eq!(
        pretty_sprint(&messages[1], Flavour::Multiline),
        "third\n\u{2514}second\n \u{2514}first: Second\n"
    );
}

#[test]
fn message_without_any_scope() {
    let mut tracer = Tracer::new();
    tracer.message("First");
    tracer.finalize();

    let messages = tracer.messages().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].stack().is_empty());
    assert_eq!(pretty_sprint(&messages[0], Flavour::Multiline), ": First\n");
}

#[test]
fn scripted_trace_matches_model() {
    let steps = vec![
        Step::Enter("load".into()),
        Step::Message("reading".into()),
        Step::Enter("parse".into()),
        Step::Message("token".into()),
        Step::Exit,
        Step::Exit,
        Step::Message("done".into()),
    ];
    let (tracer, expected) = run_script(&steps);
    let messages = tracer.messages().unwrap();

    assert_eq!(expected.pairs, 2);
    for (message, stack) in messages.iter().zip(&expected.stacks) {
        assert_eq!(&message.stack(), stack);
    }
}
