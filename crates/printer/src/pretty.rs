//! Rendering a single message.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use calltrace_core::MessageRef;

use crate::error::{PrinterError, Result};

/// Layout used by [`pretty_sprint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavour {
    /// `outer:inner: payload`, the message's own Display
    #[default]
    Oneline,
    /// One lineage entry per line, indented, then `: payload`
    Multiline,
}

impl Flavour {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavour::Oneline => "oneline",
            Flavour::Multiline => "multiline",
        }
    }
}

impl fmt::Display for Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavour {
    type Err = PrinterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "oneline" => Ok(Flavour::Oneline),
            "multiline" => Ok(Flavour::Multiline),
            _ => Err(PrinterError::UnknownFlavour(s.to_string())),
        }
    }
}

/// Render `message` in the given flavour.
pub fn pretty_sprint(message: &MessageRef<'_>, flavour: Flavour) -> String {
    match flavour {
        Flavour::Oneline => message.to_string(),
        Flavour::Multiline => multiline(message),
    }
}

/// Write `message` in the given flavour to stdout.
pub fn pretty_print(message: &MessageRef<'_>, flavour: Flavour) {
    print!("{}", pretty_sprint(message, flavour));
}

/// Write `message` in the given flavour to `out`.
pub fn pretty_write<W: Write>(out: &mut W, message: &MessageRef<'_>, flavour: Flavour) -> Result<()> {
    out.write_all(pretty_sprint(message, flavour).as_bytes())?;
    Ok(())
}

// Lineage is innermost first. Each line after the first is indented one
// space less than its position and marked with a corner.
fn multiline(message: &MessageRef<'_>) -> String {
    let stack = message.stack();
    let mut out = String::new();
    for (j, name) in stack.iter().enumerate() {
        out.push_str(&" ".repeat(j.saturating_sub(1)));
        if j > 0 {
            out.push('\u{2514}');
        }
        out.push_str(name);
        if j + 1 < stack.len() {
            out.push('\n');
        }
    }
    out.push_str(&format!(": {}\n", message.text()));
    out
}
