//! Grammar for the stylish layout.
//!
//! One block per file: a path header followed by one column-aligned line per
//! finding, columns separated by runs of two spaces.
//!
//! ```text
//!
//! /project/src/a.js
//!   1:7  warning  Variable 'x' is declared but never used.  eslint(no-unused-vars)
//!   2:1  error    'y' is not defined.                        eslint(no-undef)
//!
//! ✖ 2 problems (1 error, 1 warning)
//! ```

use crate::{RecordGroup, ReportError, Severity};

/// Braille blank (U+2800) put on the line above each rendered block.
///
/// Terminals render it as empty space, which makes the block start on a line
/// of its own so path hyperlinks are not glued to previous output.
pub const BLANK_SPACE: &str = "\u{2800}";

const COLUMN_SEPARATOR: &str = "  ";
const SEVERITY_COLUMN: usize = 2;

/// Classifies a stylish group and renders it with a shortened header.
///
/// Returns `Ok(None)` for groups without findings (e.g. the summary line).
/// A finding line with fewer than three columns fails the whole group.
pub(crate) fn classify(
    group: &RecordGroup<'_>,
    context: &str,
) -> Result<Option<(Severity, String)>, ReportError> {
    let mut has_warnings = false;
    let mut has_errors = false;

    for line in group.body() {
        let severity = line.split(COLUMN_SEPARATOR).nth(SEVERITY_COLUMN).ok_or_else(|| {
            ReportError::parse(format!(
                "expected at least {} columns in `{}`",
                SEVERITY_COLUMN + 1,
                line
            ))
        })?;
        has_warnings |= severity.contains("warning");
        has_errors |= severity.contains("error");
    }

    let severity = if has_errors {
        Severity::Error
    } else if has_warnings {
        Severity::Warning
    } else {
        return Ok(None);
    };

    Ok(Some((severity, render(group, context))))
}

/// Removes a leading `<context>/` from a header line.
///
/// Colorized output puts escape codes in front of the path; those are kept
/// and the prefix is matched right after them.
pub(crate) fn shorten_header(header: &str, context: &str) -> String {
    let context = context.trim_end_matches('/');
    if context.is_empty() {
        return header.to_string();
    }

    let (escapes, path) = header.split_at(leading_escapes_len(header));
    match path
        .strip_prefix(context)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        Some(relative) => format!("{escapes}{relative}"),
        None => header.to_string(),
    }
}

/// Returns the byte length of the SGR sequences (`ESC [ ... m`) that start
/// `line`.
fn leading_escapes_len(line: &str) -> usize {
    let mut len = 0;
    while let Some(rest) = line[len..].strip_prefix("\u{1b}[") {
        let params = rest
            .find(|c: char| !(c.is_ascii_digit() || c == ';'))
            .unwrap_or(rest.len());
        if !rest[params..].starts_with('m') {
            break;
        }
        len += "\u{1b}[".len() + params + 1;
    }
    len
}

fn render(group: &RecordGroup<'_>, context: &str) -> String {
    let mut out = String::from(BLANK_SPACE);
    out.push('\n');
    out.push_str(&shorten_header(group.header(), context));
    for line in group.body() {
        out.push('\n');
        out.push_str(line);
    }
    out
}
