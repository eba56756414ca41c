//! Adapter Test Suite
//!
//! Context propagation and printing on top of the trace engine.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test adapters
//! cargo test --test adapters context::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod context;
