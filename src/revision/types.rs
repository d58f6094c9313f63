use serde::{Deserialize, Serialize};

use crate::ids::LineId;

/// A line of a revisioned file.
/// `revision` is where the line's identity was minted, not where it was last seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub content: String,
    pub revision: usize,
    pub id: LineId,
}

/// Full content of the file at one revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "Lines")]
    pub(crate) lines: Vec<Line>,
}

impl Snapshot {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Line contents in order, without identities.
    pub fn contents(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.content.as_str()).collect()
    }

    /// The committed text of this revision.
    pub fn content(&self) -> String {
        self.lines.iter().map(|l| l.content.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
