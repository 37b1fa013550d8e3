//! Blank-line record grouping.

/// A contiguous run of non-blank lines from a raw report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordGroup<'a> {
    lines: Vec<&'a str>,
}

impl<'a> RecordGroup<'a> {
    /// Creates a group from its lines.
    pub fn new(lines: Vec<&'a str>) -> Self {
        Self { lines }
    }

    /// Returns the first line of the group.
    pub fn header(&self) -> &'a str {
        self.lines.first().copied().unwrap_or_default()
    }

    /// Returns every line after the header.
    pub fn body(&self) -> &[&'a str] {
        self.lines.get(1..).unwrap_or_default()
    }

    /// Returns all lines, header included.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Joins the lines with `\n`.
    pub fn join(&self) -> String {
        self.lines.join("\n")
    }
}

/// Splits a raw report into record groups.
///
/// Whitespace-only lines close the current group; runs of them count as a
/// single boundary, so no group is ever empty. A final group that is not
/// followed by a blank line is kept.
pub fn group_records(raw: &str) -> Vec<RecordGroup<'_>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();

    for line in raw.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            if !current.is_empty() {
                groups.push(RecordGroup::new(std::mem::take(&mut current)));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        groups.push(RecordGroup::new(current));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines<'a>(groups: &[RecordGroup<'a>]) -> Vec<Vec<&'a str>> {
        groups.iter().map(|g| g.lines().to_vec()).collect()
    }

    #[test]
    fn test_groups_split_on_blank_line() {
        let groups = group_records("a\nb\n\nc\n");
        assert_eq!(lines(&groups), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_trailing_group_is_retained() {
        let groups = group_records("a\n\nb\nc");
        assert_eq!(lines(&groups), vec![vec!["a"], vec!["b", "c"]]);
    }

    #[test]
    fn test_consecutive_blank_lines_form_one_boundary() {
        let groups = group_records("\n\na\n\n\n  \t\nb\n\n");
        assert_eq!(lines(&groups), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let groups = group_records("a\r\nb\r\n\r\nc\r\n");
        assert_eq!(lines(&groups), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_records("").is_empty());
        assert!(group_records("\n \n\n").is_empty());
    }

    #[test]
    fn test_lines_keep_indentation() {
        let groups = group_records("\n  ⚠ rule\n   ╭─[a.js:1:1]\n");
        assert_eq!(groups[0].header(), "  ⚠ rule");
        assert_eq!(groups[0].body(), &["   ╭─[a.js:1:1]"]);
    }

    #[test]
    fn test_join_and_body_of_single_line_group() {
        let group = RecordGroup::new(vec!["only"]);
        assert!(group.body().is_empty());
        assert_eq!(group.join(), "only");
    }
}
