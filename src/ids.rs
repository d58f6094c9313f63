//! Line identity minting.
//!
//! Every line gets an opaque id when it first enters a versioned file. The
//! generator is a trait so stored files can be rebuilt deterministically in
//! tests; [`RandomIds`] is what production callers use.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Builder;

/// Number of entropy reads attempted before giving up on a single id.
const MAX_ENTROPY_ATTEMPTS: usize = 3;

/// Opaque, globally unique line identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    pub fn new(id: impl Into<String>) -> Self {
        LineId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The entropy source kept failing.
#[derive(Debug, thiserror::Error)]
#[error("entropy source failed after {attempts} attempts: {source}")]
pub struct IdError {
    pub attempts: usize,
    #[source]
    pub source: getrandom::Error,
}

/// Source of fresh line identities.
pub trait IdGenerator {
    fn next_id(&mut self) -> Result<LineId, IdError>;
}

/// Random (version 4) UUIDs drawn from the operating system's entropy source.
///
/// A failed read is retried a few times; after that the error is returned
/// instead of aborting.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Result<LineId, IdError> {
        let mut bytes = [0u8; 16];
        let mut attempt = 1;
        loop {
            match getrandom::getrandom(&mut bytes) {
                Ok(()) => {
                    let uuid = Builder::from_random_bytes(bytes).into_uuid();
                    return Ok(LineId(uuid.to_string()));
                }
                Err(source) if attempt >= MAX_ENTROPY_ATTEMPTS => {
                    return Err(IdError {
                        attempts: attempt,
                        source,
                    });
                }
                Err(e) => {
                    warn!(attempt, error = %e, "entropy read failed, retrying");
                    attempt += 1;
                }
            }
        }
    }
}

/// Deterministic ids `<prefix>-0`, `<prefix>-1`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Result<LineId, IdError> {
        let id = LineId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        Ok(id)
    }
}
