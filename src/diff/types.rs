use serde::{Deserialize, Serialize};

use crate::revision::Line;

/// What happened to a line between the two compared revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffLineKind {
    #[serde(rename = "no")]
    Unchanged,
    #[serde(rename = "insert")]
    Inserted,
    #[serde(rename = "delete")]
    Deleted,
}

/// One line of a diff group.
/// `old` is set for unchanged and deleted lines, `new` for unchanged and inserted ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub kind: DiffLineKind,
    pub old: Option<Line>,
    pub new: Option<Line>,
}

impl DiffLine {
    pub fn unchanged(old: Line, new: Line) -> Self {
        DiffLine {
            kind: DiffLineKind::Unchanged,
            old: Some(old),
            new: Some(new),
        }
    }

    pub fn inserted(new: Line) -> Self {
        DiffLine {
            kind: DiffLineKind::Inserted,
            old: None,
            new: Some(new),
        }
    }

    pub fn deleted(old: Line) -> Self {
        DiffLine {
            kind: DiffLineKind::Deleted,
            old: Some(old),
            new: None,
        }
    }

    /// The line as it should be displayed: the new side for insertions,
    /// the old side otherwise.
    pub fn line(&self) -> Option<&Line> {
        match self.kind {
            DiffLineKind::Inserted => self.new.as_ref(),
            DiffLineKind::Unchanged | DiffLineKind::Deleted => self.old.as_ref(),
        }
    }
}

/// Half-open range of zero-based line offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub from: usize,
    pub to: usize,
}

impl LineRange {
    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A contiguous region of change with its surrounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffGroup {
    pub old_range: LineRange,
    pub new_range: LineRange,
    pub lines: Vec<DiffLine>,
}

/// Difference between two revisions of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    #[serde(rename = "filename")]
    pub file_name: String,
    pub groups: Vec<DiffGroup>,
}
