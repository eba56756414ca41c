//! Shared test utilities.

#![allow(dead_code)]

use calltrace::prelude::*;

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A tracer that logs its events, for tests that want the log output.
pub fn logged_tracer() -> Tracer {
    init_tracing();
    Tracer::builder().log_events(true).build()
}

/// One step of a scripted trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Enter(String),
    Exit,
    Message(String),
}

/// What a script should produce, computed without the tracer.
#[derive(Debug, Default)]
pub struct Expected {
    /// Enter/Exit pairs
    pub pairs: usize,
    /// Message texts in order
    pub messages: Vec<String>,
    /// Lineage of each message, innermost first
    pub stacks: Vec<Vec<String>>,
}

/// Run `steps` against a fresh tracer, closing any scope left open, then
/// finalize. Exits with no open scope are skipped.
pub fn run_script(steps: &[Step]) -> (Tracer, Expected) {
    let mut tracer = Tracer::new();
    let mut tokens = Vec::new();
    let mut names: Vec<String> = Vec::new();
    let mut expected = Expected::default();

    for step in steps {
        match step {
            Step::Enter(name) => {
                tokens.push(tracer.enter(name.clone()));
                names.push(name.clone());
                expected.pairs += 1;
            }
            Step::Exit => {
                if let Some(token) = tokens.pop() {
                    tracer.exit(token);
                    names.pop();
                }
            }
            Step::Message(text) => {
                tracer.message(text);
                expected.messages.push(text.clone());
                expected.stacks.push(names.iter().rev().cloned().collect());
            }
        }
    }
    while let Some(token) = tokens.pop() {
        tracer.exit(token);
    }
    tracer.finalize();
    (tracer, expected)
}
