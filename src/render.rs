//! Plain-text rendering of diffs and snapshots.

use std::fmt;

use crate::diff::{Diff, DiffGroup, DiffLine, DiffLineKind, LineRange};
use crate::revision::Snapshot;

/// Formats a range the way unified diff headers do: 1-based, `start` for a
/// single line, `start,length` otherwise. An empty range starts at the line
/// before it.
pub fn format_range_unified(range: LineRange) -> String {
    let length = range.len();
    let beginning = range.from + 1;
    match length {
        1 => format!("{beginning}"),
        0 => format!("{},0", beginning - 1),
        _ => format!("{beginning},{length}"),
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, prefix: impl fmt::Display, content: &str) -> fmt::Result {
    if content.ends_with('\n') {
        write!(f, "{prefix}{content}")
    } else {
        writeln!(f, "{prefix}{content}")
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            DiffLineKind::Unchanged => ' ',
            DiffLineKind::Inserted => '+',
            DiffLineKind::Deleted => '-',
        };
        let content = self.line().map_or("", |l| l.content.as_str());
        write_line(f, prefix, content)
    }
}

impl fmt::Display for DiffGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "@@ -{} +{} @@",
            format_range_unified(self.old_range),
            format_range_unified(self.new_range)
        )?;
        for line in &self.lines {
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.groups.is_empty() {
            return Ok(());
        }
        writeln!(f, "--- {}", self.file_name)?;
        writeln!(f, "+++ {}", self.file_name)?;
        for group in &self.groups {
            write!(f, "{group}")?;
        }
        Ok(())
    }
}

/// Annotated view: each line prefixed with the revision that introduced it.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self {
            write_line(f, format_args!("{}\t", line.revision), &line.content)?;
        }
        Ok(())
    }
}
