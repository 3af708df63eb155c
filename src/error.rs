//! Error types for rotmix hashing.

use thiserror::Error;

/// Errors that can occur while preparing a digest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// A caller-supplied salt does not match the block size.
    #[error("salt length must be {expected} bytes (salt {salt:?} is {actual})")]
    SaltLengthMismatch {
        expected: usize,
        actual: usize,
        salt: String,
    },
}
