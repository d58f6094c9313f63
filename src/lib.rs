//! Versioned files for code review.
//!
//! A [`VersionedFile`] keeps a full snapshot of every revision of a reviewed
//! file. Each line carries an identity that survives later revisions as long
//! as the line itself is left alone, plus the revision that introduced it.
//! Any two revisions can be compared into a [`Diff`] that renders as a
//! unified diff.
//!
//! ```
//! use revdiff::VersionedFile;
//!
//! let mut file = VersionedFile::from_text("main.cpp", "a\nb\nc\n")?;
//! file.add_revision_text("a\nx\nc\n")?;
//! assert_eq!(file.revisions_count(), 2);
//!
//! let diff = file.diff(0, 1)?;
//! assert_eq!(diff.to_string(), "--- main.cpp\n+++ main.cpp\n@@ -1,3 +1,3 @@\n a\n-b\n+x\n c\n");
//! # Ok::<(), revdiff::RevisionError>(())
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod ids;
pub mod matcher;
pub mod render;
pub mod revision;

pub use config::DiffOptions;
pub use diff::{Diff, DiffGroup, DiffLine, DiffLineKind, LineRange};
pub use error::{RevisionError, RevisionResult};
pub use ids::{IdGenerator, LineId, RandomIds, SequentialIds};
pub use matcher::split_lines;
pub use revision::{Line, Snapshot, VersionedFile};
