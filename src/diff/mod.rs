mod types;
pub use types::*;

use std::borrow::Cow;

use crate::config::DiffOptions;
use crate::matcher::{grouped_opcodes, OpCode, Tag};
use crate::revision::{Line, Snapshot};

impl Diff {
    /// The whole snapshot as one unchanged group, each line paired with itself.
    pub(crate) fn whole(file_name: &str, snapshot: &Snapshot) -> Self {
        let range = LineRange {
            from: 0,
            to: snapshot.len(),
        };
        let lines = snapshot
            .iter()
            .map(|line| DiffLine::unchanged(line.clone(), line.clone()))
            .collect();
        Diff {
            file_name: file_name.to_string(),
            groups: vec![DiffGroup {
                old_range: range,
                new_range: range,
                lines,
            }],
        }
    }

    pub(crate) fn between(
        file_name: &str,
        old: &Snapshot,
        new: &Snapshot,
        options: &DiffOptions,
    ) -> Self {
        let (old_lines, old_keys) = comparable(old, options.trim_trailing_whitespace);
        let (new_lines, new_keys) = comparable(new, options.trim_trailing_whitespace);
        let groups = grouped_opcodes(&old_keys, &new_keys, options.context)
            .iter()
            .map(|codes| build_group(codes, old_lines, new_lines))
            .collect();
        Diff {
            file_name: file_name.to_string(),
            groups,
        }
    }

    /// True when the compared revisions have no differences.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Inserted and deleted lines across all groups.
    pub fn changes(&self) -> impl Iterator<Item = &DiffLine> {
        self.groups
            .iter()
            .flat_map(|g| g.lines.iter())
            .filter(|l| l.kind != DiffLineKind::Unchanged)
    }
}

/// Lines taking part in a comparison and the keys they are matched by.
///
/// With `trim` set, whitespace-only lines at the end of the snapshot are left
/// out and the last remaining line is matched with its trailing whitespace
/// reduced to a single newline.
fn comparable(snapshot: &Snapshot, trim: bool) -> (&[Line], Vec<Cow<'_, str>>) {
    let mut lines = snapshot.lines();
    if trim {
        let end = lines
            .iter()
            .rposition(|l| !l.content.trim().is_empty())
            .map_or(0, |i| i + 1);
        lines = &lines[..end];
    }

    let mut keys: Vec<Cow<'_, str>> = lines
        .iter()
        .map(|l| Cow::Borrowed(l.content.as_str()))
        .collect();
    if trim {
        if let Some(last) = keys.last_mut() {
            let normalized = format!("{}\n", last.trim_end());
            *last = Cow::Owned(normalized);
        }
    }
    (lines, keys)
}

fn build_group(codes: &[OpCode], old: &[Line], new: &[Line]) -> DiffGroup {
    let old_range = LineRange {
        from: codes.first().map_or(0, |c| c.old.start),
        to: codes.last().map_or(0, |c| c.old.end),
    };
    let new_range = LineRange {
        from: codes.first().map_or(0, |c| c.new.start),
        to: codes.last().map_or(0, |c| c.new.end),
    };

    let mut lines = Vec::with_capacity(old_range.len().max(new_range.len()));
    for code in codes {
        let old_side = &old[code.old.clone()];
        let new_side = &new[code.new.clone()];
        match code.tag {
            Tag::Equal => lines.extend(
                old_side
                    .iter()
                    .zip(new_side)
                    .map(|(o, n)| DiffLine::unchanged(o.clone(), n.clone())),
            ),
            Tag::Delete => lines.extend(old_side.iter().cloned().map(DiffLine::deleted)),
            Tag::Insert => lines.extend(new_side.iter().cloned().map(DiffLine::inserted)),
            Tag::Replace => {
                lines.extend(old_side.iter().cloned().map(DiffLine::deleted));
                lines.extend(new_side.iter().cloned().map(DiffLine::inserted));
            }
        }
    }

    DiffGroup {
        old_range,
        new_range,
        lines,
    }
}
