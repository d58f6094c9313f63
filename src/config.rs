//! Options for diffs between revisions.

use serde::{Deserialize, Serialize};

use crate::error::RevisionResult;

/// Context used for revision-to-revision diffs. Large enough that every
/// change in a review-sized file lands in one group.
pub const DEFAULT_CONTEXT: usize = 10_000;

/// How two different revisions are compared.
///
/// Can be loaded from TOML; missing keys fall back to the defaults:
///
/// ```toml
/// context = 3
/// trim_trailing_whitespace = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Unchanged lines kept around each change. Equal runs longer than twice
    /// this split the diff into separate groups.
    pub context: usize,
    /// Ignore whitespace-only lines at the end of both revisions, and
    /// trailing whitespace on the last remaining line.
    pub trim_trailing_whitespace: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            context: DEFAULT_CONTEXT,
            trim_trailing_whitespace: true,
        }
    }
}

impl DiffOptions {
    pub fn from_toml_str(s: &str) -> RevisionResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }
}
