//! Report translation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ReportError, ReportFormat, graphical, group_records, stylish};

/// Severity of a classified group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported on the bundler's error channel.
    Error,
    /// Reported on the bundler's warning channel.
    Warning,
}

/// A group that could not be read with the active grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGroup {
    /// First line of the group, as printed by the linter.
    pub header: String,
    /// Why the group was skipped.
    pub error: ReportError,
}

impl fmt::Display for SkippedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipped unparsable report group '{}': {}",
            self.header, self.error
        )
    }
}

/// Warnings and errors extracted from one linter run, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Rendered warning blocks.
    pub warnings: Vec<String>,
    /// Rendered error blocks.
    pub errors: Vec<String>,
    /// Groups dropped because they did not parse.
    pub skipped: Vec<SkippedGroup>,
}

impl Report {
    /// Returns `true` if nothing was classified or skipped.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty() && self.skipped.is_empty()
    }

    /// Returns `true` if at least one error was classified.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn push(&mut self, severity: Severity, rendered: String) {
        match severity {
            Severity::Warning => self.warnings.push(rendered),
            Severity::Error => self.errors.push(rendered),
        }
    }
}

/// Translates raw linter output into warnings and errors.
///
/// `context` is the directory the linter ran in; stylish headers are shown
/// relative to it. Malformed groups never fail the translation, they are
/// collected in [`Report::skipped`].
pub fn translate(raw: &str, format: &ReportFormat, context: &str) -> Report {
    let mut report = Report::default();

    for group in group_records(raw) {
        if format.is_stylish() {
            match stylish::classify(&group, context) {
                Ok(Some((severity, rendered))) => report.push(severity, rendered),
                Ok(None) => debug!("Dropping stylish group without findings: {}", group.header()),
                Err(error) => {
                    warn!("Skipping unparsable report group '{}': {}", group.header(), error);
                    report.skipped.push(SkippedGroup {
                        header: group.header().to_string(),
                        error,
                    });
                }
            }
        } else {
            let severities = graphical::classify(&group);
            if severities.is_empty() {
                debug!("Dropping non-diagnostic group: {}", group.header());
            }
            for severity in severities {
                report.push(severity, graphical::render(&group));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BLANK_SPACE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_format_end_to_end() {
        let report = translate("\n⚠ warn msg\nfile.js:1:1\n\n", &ReportFormat::Default, "/p");
        assert_eq!(
            report,
            Report {
                warnings: vec!["\n⚠ warn msg\nfile.js:1:1".to_string()],
                errors: vec![],
                skipped: vec![],
            }
        );
    }

    #[test]
    fn test_default_format_warning_error_and_noise() {
        let raw = "\n  ⚠ eslint(no-debugger): `debugger` statement is not allowed\n   ╭─[a.js:1:1]\n   ╰────\n\n  × eslint(no-undef): 'y' is not defined.\n   ╭─[a.js:2:1]\n\nFound 1 warning and 1 error.\nFinished in 4ms on 1 file with 93 rules using 8 threads.\n";
        let report = translate(raw, &ReportFormat::Default, "/p");

        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.warnings[0].starts_with("\n  ⚠ eslint(no-debugger)"));
        assert!(report.errors[0].starts_with("\n  × eslint(no-undef)"));
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_other_format_uses_default_grammar() {
        let report = translate("⚠ w\n\n× e\n", &ReportFormat::Other("github".into()), "/p");
        assert_eq!(report.warnings, vec!["\n⚠ w".to_string()]);
        assert_eq!(report.errors, vec!["\n× e".to_string()]);
    }

    #[test]
    fn test_stylish_format() {
        let raw = "\n/p/src/a.js\n  1:7  warning  Unused x  eslint(no-unused-vars)\n\n/p/src/b.js\n  1:1  warning  Unused y  eslint(no-unused-vars)\n  2:1  error  'z' is not defined  eslint(no-undef)\n\n✖ 3 problems (1 error, 2 warnings)\n";
        let report = translate(raw, &ReportFormat::Stylish, "/p");

        assert_eq!(
            report.warnings,
            vec![format!(
                "{BLANK_SPACE}\nsrc/a.js\n  1:7  warning  Unused x  eslint(no-unused-vars)"
            )]
        );
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with(&format!("{BLANK_SPACE}\nsrc/b.js\n")));
        assert!(report.has_errors());
    }

    #[test]
    fn test_stylish_malformed_group_is_skipped() {
        let raw = "/p/a.js\n  1:1  error  Bad  rule\n\n✖ 1 problem\n  1 error potentially fixable\n\n/p/b.js\n  1:1  warning  Meh  rule\n";
        let report = translate(raw, &ReportFormat::Stylish, "/p");

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].header, "✖ 1 problem");
        assert!(
            report.skipped[0]
                .to_string()
                .starts_with("skipped unparsable report group '✖ 1 problem': ")
        );
    }

    #[test]
    fn test_empty_output() {
        let report = translate("", &ReportFormat::Default, "/p");
        assert!(report.is_empty());
        assert!(!report.has_errors());
    }
}
