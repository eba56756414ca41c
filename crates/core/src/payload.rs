//! Message payload rendering.

use std::fmt::Display;

/// Recorded in place of a message built from zero parts.
pub const EMPTY_MESSAGE: &str = "<empty message>";

/// Render message parts: zero parts give [`EMPTY_MESSAGE`], one part is
/// rendered as is, several parts are joined with a single space.
///
/// Every pair of parts is separated, strings included: `"retries", 3`
/// renders as `retries 3`, never `retries3`.
pub fn render_parts(parts: &[&dyn Display]) -> String {
    match parts {
        [] => EMPTY_MESSAGE.to_string(),
        [single] => single.to_string(),
        many => many
            .iter()
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
            .join(" "),
    }
}
