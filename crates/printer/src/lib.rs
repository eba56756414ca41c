//! Printing for calltrace
//!
//! - `pretty`: render a single message on one line or as an indented lineage
//! - `sink`: render a whole trace as `>`/`<`/`@` event lines

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod pretty;
pub mod sink;

pub use error::{PrinterError, Result};
pub use pretty::{pretty_print, pretty_sprint, pretty_write, Flavour};
pub use sink::{render_trace, trace_printer, PrinterOptions, TracePrinter};
