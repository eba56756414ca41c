//! Trace Engine Test Suite
//!
//! End-to-end behaviour of the tracer through the public facade:
//! nesting, message lineage, finalization and traversal.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test tracer
//! cargo test --test tracer scenarios::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod scenarios;
