mod types;
pub use types::*;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::DiffOptions;
use crate::diff::Diff;
use crate::error::{RevisionError, RevisionResult};
use crate::ids::{IdGenerator, RandomIds};
use crate::matcher::{opcodes, split_lines, Tag};

/// A reviewed file with every revision it went through.
///
/// Revision 0 is the original upload and always exists. Revisions are only
/// ever appended; each one is stored as a full [`Snapshot`] so any revision
/// can be read back without replaying edits.
///
/// Lines keep their identity for as long as their content keeps matching
/// between consecutive revisions, which lets comments stay attached to a line
/// while the file changes around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredFile")]
pub struct VersionedFile {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Revisions")]
    revisions: Vec<Snapshot>,
}

/// Unvalidated form of a stored [`VersionedFile`].
#[derive(Deserialize)]
struct StoredFile {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Revisions")]
    revisions: Vec<Snapshot>,
}

impl TryFrom<StoredFile> for VersionedFile {
    type Error = RevisionError;

    fn try_from(stored: StoredFile) -> RevisionResult<Self> {
        if stored.revisions.is_empty() {
            return Err(RevisionError::EmptyHistory);
        }
        for (revision, snapshot) in stored.revisions.iter().enumerate() {
            if let Some((line, l)) = snapshot
                .iter()
                .enumerate()
                .find(|(_, l)| l.revision > revision)
            {
                return Err(RevisionError::InvalidOrigin {
                    revision,
                    line,
                    origin: l.revision,
                });
            }
        }
        Ok(VersionedFile {
            name: stored.name,
            revisions: stored.revisions,
        })
    }
}

impl VersionedFile {
    /// Creates the file with `content` as revision 0.
    pub fn new(name: impl Into<String>, content: Vec<String>) -> RevisionResult<Self> {
        Self::new_with(name, content, &mut RandomIds)
    }

    /// Like [`VersionedFile::new`], drawing line ids from `ids`.
    pub fn new_with<G: IdGenerator + ?Sized>(
        name: impl Into<String>,
        content: Vec<String>,
        ids: &mut G,
    ) -> RevisionResult<Self> {
        let lines = content
            .into_iter()
            .map(|content| {
                Ok(Line {
                    content,
                    revision: 0,
                    id: ids.next_id()?,
                })
            })
            .collect::<RevisionResult<Vec<_>>>()?;
        Ok(VersionedFile {
            name: name.into(),
            revisions: vec![Snapshot { lines }],
        })
    }

    /// Creates the file from unsplit text.
    pub fn from_text(name: impl Into<String>, text: &str) -> RevisionResult<Self> {
        Self::new(name, split_lines(text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of revisions, the original included.
    pub fn revisions_count(&self) -> usize {
        self.revisions.len()
    }

    pub fn revisions(&self) -> &[Snapshot] {
        &self.revisions
    }

    /// Returns the snapshot of `revision`.
    ///
    /// # Errors
    ///
    /// [`RevisionError::OutOfRange`] if `revision` is negative or not
    /// smaller than [`VersionedFile::revisions_count`].
    pub fn revision(&self, revision: i64) -> RevisionResult<&Snapshot> {
        usize::try_from(revision)
            .ok()
            .and_then(|index| self.revisions.get(index))
            .ok_or(RevisionError::OutOfRange {
                requested: revision,
                count: self.revisions.len(),
            })
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> RevisionResult<&Snapshot> {
        self.revisions.last().ok_or(RevisionError::EmptyHistory)
    }

    /// Appends `content` as the next revision.
    pub fn add_revision(&mut self, content: Vec<String>) -> RevisionResult<()> {
        self.add_revision_with(content, &mut RandomIds)
    }

    /// Appends unsplit text as the next revision.
    pub fn add_revision_text(&mut self, text: &str) -> RevisionResult<()> {
        self.add_revision(split_lines(text))
    }

    /// Appends `content` as the next revision, drawing ids from `ids`.
    ///
    /// Lines matched against the previous revision are carried over with
    /// their id and origin revision. Inserted lines get fresh ids tagged with
    /// the new revision number; a replaced range counts as a deletion plus an
    /// insertion. Nothing is appended if an id cannot be minted.
    pub fn add_revision_with<G: IdGenerator + ?Sized>(
        &mut self,
        content: Vec<String>,
        ids: &mut G,
    ) -> RevisionResult<()> {
        let number = self.revisions.len();
        let Some(last) = self.revisions.last() else {
            error!(file = %self.name, "add revision on a file without history");
            return Err(RevisionError::EmptyHistory);
        };

        let old = last.contents();
        let new: Vec<&str> = content.iter().map(String::as_str).collect();
        let codes = opcodes(&old, &new);

        let mut lines = Vec::with_capacity(content.len());
        let mut inserted = 0;
        for code in &codes {
            match code.tag {
                Tag::Equal => lines.extend_from_slice(&last.lines[code.old.clone()]),
                Tag::Delete => {}
                Tag::Insert | Tag::Replace => {
                    for j in code.new.clone() {
                        lines.push(Line {
                            content: content[j].clone(),
                            revision: number,
                            id: ids.next_id()?,
                        });
                        inserted += 1;
                    }
                }
            }
        }

        debug!(
            file = %self.name,
            revision = number,
            ops = codes.len(),
            inserted,
            kept = lines.len() - inserted,
            "added revision"
        );
        self.revisions.push(Snapshot { lines });
        Ok(())
    }

    /// Diff between two revisions with default options.
    pub fn diff(&self, old: i64, new: i64) -> RevisionResult<Diff> {
        self.diff_with(old, new, &DiffOptions::default())
    }

    /// Diff between two revisions.
    ///
    /// Asking for the same revision twice returns the whole snapshot as a
    /// single unchanged group, so "show revision N" goes through the same
    /// path as a comparison.
    pub fn diff_with(&self, old: i64, new: i64, options: &DiffOptions) -> RevisionResult<Diff> {
        let old_snapshot = self.revision(old)?;
        let new_snapshot = self.revision(new)?;
        let diff = if old == new {
            Diff::whole(&self.name, old_snapshot)
        } else {
            Diff::between(&self.name, old_snapshot, new_snapshot, options)
        };
        debug!(file = %self.name, old, new, groups = diff.groups.len(), "computed diff");
        Ok(diff)
    }

    /// Serializes the file for storage.
    pub fn to_json(&self) -> RevisionResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Restores a file produced by [`VersionedFile::to_json`].
    ///
    /// Malformed JSON is a [`RevisionError::Json`]; a well-formed file with no
    /// revisions or with a line from a later revision is rejected with
    /// [`RevisionError::EmptyHistory`] or [`RevisionError::InvalidOrigin`].
    pub fn from_json(bytes: &[u8]) -> RevisionResult<Self> {
        let stored: StoredFile = serde_json::from_slice(bytes)?;
        VersionedFile::try_from(stored)
    }
}
