//! Grammar for the default (graphical) layout.
//!
//! Each finding is printed as its own block whose first line starts with a
//! severity glyph:
//!
//! ```text
//!
//!   ⚠ eslint(no-unused-vars): Variable 'x' is declared but never used.
//!    ╭─[src/a.js:1:7]
//!  1 │ const x = 1;
//!    ╰────
//!
//! ```

use crate::{RecordGroup, Severity};

/// Glyph opening a warning block.
pub const WARNING_GLYPH: &str = "⚠";

/// Glyph opening an error block.
pub const ERROR_GLYPH: &str = "×";

/// Classifies a group by the glyphs on its first line.
///
/// The two checks are independent; a header carrying both glyphs yields both
/// severities, warning first.
pub(crate) fn classify(group: &RecordGroup<'_>) -> Vec<Severity> {
    let header = group.header();
    let mut severities = Vec::new();
    if header.contains(WARNING_GLYPH) {
        severities.push(Severity::Warning);
    }
    if header.contains(ERROR_GLYPH) {
        severities.push(Severity::Error);
    }
    severities
}

/// Renders a group on its own line below whatever the host printed before.
pub(crate) fn render(group: &RecordGroup<'_>) -> String {
    format!("\n{}", group.join())
}
