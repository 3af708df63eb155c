//! Salt construction and generation.

use nanorand::Rng;
use tracing::debug;

use crate::{error::HashError, Encoding};

/// Symbols generated salts are drawn from.
pub const SALT_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A block-sized salt, along with the text it was made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt<const N: usize> {
    bytes: [u8; N],
    text: String,
}

impl<const N: usize> Salt<N> {
    /// Builds a salt from caller-supplied text.
    ///
    /// The encoded text must be exactly `N` bytes long.
    pub fn from_text(text: &str, encoding: Encoding) -> Result<Self, HashError> {
        let encoded = encoding.encode(text);
        let bytes: [u8; N] =
            encoded
                .as_slice()
                .try_into()
                .map_err(|_| HashError::SaltLengthMismatch {
                    expected: N,
                    actual: encoded.len(),
                    salt: text.to_string(),
                })?;

        Ok(Self {
            bytes,
            text: text.to_string(),
        })
    }

    /// Builds a salt from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HashError> {
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        let bytes: [u8; N] = bytes
            .try_into()
            .map_err(|_| HashError::SaltLengthMismatch {
                expected: N,
                actual: bytes.len(),
                salt: text.clone(),
            })?;

        Ok(Self { bytes, text })
    }

    /// Draws `N` symbols uniformly from [`SALT_ALPHABET`].
    pub fn generate<R: Rng<8>>(rng: &mut R) -> Self {
        let mut bytes = [0u8; N];
        for b in bytes.iter_mut() {
            *b = SALT_ALPHABET[rng.generate_range(0..SALT_ALPHABET.len())];
        }

        Self {
            bytes,
            text: bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }

    /// An all-zero salt.  Mostly useful for analysis.
    pub fn zeroed() -> Self {
        Self {
            bytes: [0; N],
            text: "\0".repeat(N),
        }
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl<const N: usize> std::fmt::Display for Salt<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validates `user_salt` if given, otherwise generates a fresh one from `rng`.
///
/// `rng` is only drawn from when no salt is supplied.
pub fn provide<const N: usize, R: Rng<8>>(
    user_salt: Option<&str>,
    encoding: Encoding,
    rng: &mut R,
) -> Result<Salt<N>, HashError> {
    match user_salt {
        Some(text) => Salt::from_text(text, encoding),
        None => {
            let salt = Salt::generate(rng);
            debug!(salt = salt.as_str(), "generated salt");
            Ok(salt)
        }
    }
}
