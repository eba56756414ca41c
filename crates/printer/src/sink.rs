//! Rendering a whole trace as an indented event listing.
//!
//! ```text
//! > first
//! ..@ First
//! ..> second
//! ....@ Second
//! ..< second
//! < first
//! ```
//!
//! The root sentinels are not printed.

use std::io::Write;

use calltrace_core::{Node, NodeRef, Traversable};

use crate::error::Result;

/// Options for [`TracePrinter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterOptions {
    /// Print Message nodes as `@ payload` lines
    pub include_messages: bool,
    /// Indentation unit, repeated once per nesting level
    pub indent: String,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            include_messages: true,
            indent: "..".to_string(),
        }
    }
}

impl PrinterOptions {
    /// Set whether messages are printed.
    pub fn include_messages(mut self, include: bool) -> Self {
        self.include_messages = include;
        self
    }

    /// Set the indentation unit.
    pub fn indent(mut self, unit: impl Into<String>) -> Self {
        self.indent = unit.into();
        self
    }
}

/// Visitor for [`Traversable::for_each`] that writes one line per event.
///
/// With no output sink it accepts every node and writes nothing.
#[derive(Debug)]
pub struct TracePrinter<W> {
    out: Option<W>,
    options: PrinterOptions,
    level: usize,
}

impl TracePrinter<std::io::Sink> {
    /// A printer with no output.
    pub fn disabled() -> Self {
        Self::with_options(None, PrinterOptions::default())
    }
}

impl<W: Write> TracePrinter<W> {
    /// Printer with the default indent.
    pub fn new(out: Option<W>, include_messages: bool) -> Self {
        Self::with_options(out, PrinterOptions::default().include_messages(include_messages))
    }

    /// Printer with explicit options.
    pub fn with_options(out: Option<W>, options: PrinterOptions) -> Self {
        Self {
            out,
            options,
            level: 0,
        }
    }

    /// Render one node.
    pub fn visit(&mut self, node: NodeRef<'_>) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        match node.node() {
            Node::Enter(enter) => {
                if node.is_root_enter() {
                    return Ok(());
                }
                write_line(out, &self.options.indent, self.level, '>', enter.name())?;
                self.level += 1;
            }
            Node::Exit(exit) => {
                if node.is_root_exit() {
                    return Ok(());
                }
                self.level = self.level.saturating_sub(1);
                write_line(out, &self.options.indent, self.level, '<', exit.name())?;
            }
            Node::Message(message) => {
                if self.options.include_messages {
                    write_line(out, &self.options.indent, self.level, '@', message.text())?;
                }
            }
        }
        Ok(())
    }

    /// Give back the output sink.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

fn write_line<W: Write>(out: &mut W, unit: &str, level: usize, symbol: char, text: &str) -> Result<()> {
    writeln!(out, "{}{} {}", unit.repeat(level), symbol, text)?;
    Ok(())
}

/// A visitor closure for [`Traversable::for_each`].
///
/// ```
/// use calltrace_core::Tracer;
/// use calltrace_printer::trace_printer;
///
/// let mut tracer = Tracer::new();
/// let t = tracer.enter("load");
/// tracer.message("reading");
/// tracer.exit(t);
/// tracer.finalize();
///
/// let mut out = Vec::new();
/// tracer
///     .as_traversable()
///     .unwrap()
///     .for_each(trace_printer(Some(&mut out), true))
///     .unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "> load\n..@ reading\n< load\n");
/// ```
pub fn trace_printer<W: Write>(
    out: Option<W>,
    include_messages: bool,
) -> impl FnMut(NodeRef<'_>) -> Result<()> {
    let mut printer = TracePrinter::new(out, include_messages);
    move |node: NodeRef<'_>| printer.visit(node)
}

/// Render a whole trace to a string.
pub fn render_trace(walk: &Traversable<'_>, options: &PrinterOptions) -> Result<String> {
    let mut printer = TracePrinter::with_options(Some(Vec::new()), options.clone());
    walk.for_each(|node| printer.visit(node))?;
    let bytes = printer.into_inner().unwrap_or_default();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
