//! Report layouts accepted by `oxlint -f`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ReportError;

/// Layouts whose output is machine-readable and therefore never translated.
const STRUCTURED_FORMATS: &[&str] = &["json", "checkstyle", "junit", "sarif", "gitlab"];

/// The report layout the linter is asked to produce.
///
/// The layout name is passed verbatim to the linter and also selects the
/// grammar used to read the output back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReportFormat {
    /// The graphical layout, one glyph-prefixed block per finding.
    #[default]
    Default,
    /// One block per file, one column-aligned line per finding.
    Stylish,
    /// Any other line-oriented layout, read with the default grammar.
    Other(String),
}

impl ReportFormat {
    /// Returns the name passed to `-f`.
    pub fn as_str(&self) -> &str {
        match self {
            ReportFormat::Default => "default",
            ReportFormat::Stylish => "stylish",
            ReportFormat::Other(name) => name,
        }
    }

    /// Returns `true` for the stylish layout.
    pub fn is_stylish(&self) -> bool {
        matches!(self, ReportFormat::Stylish)
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name {
            "" => Err(ReportError::unsupported_format("<empty>")),
            "default" => Ok(ReportFormat::Default),
            "stylish" => Ok(ReportFormat::Stylish),
            _ if STRUCTURED_FORMATS.contains(&name) => {
                Err(ReportError::unsupported_format(name))
            }
            _ => Ok(ReportFormat::Other(name.to_string())),
        }
    }
}

impl TryFrom<String> for ReportFormat {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportFormat> for String {
    fn from(format: ReportFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
