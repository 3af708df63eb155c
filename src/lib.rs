//! A small salted, non-cryptographic rotate-and-mix hash.
//!
//! A message is encoded to bytes, zero-padded and split into blocks, each
//! block is rotated by its index, and then a neighbor-coupled mix step is run
//! over every block for a number of rounds.  The final state is the digest.
//!
//! **This is not a cryptographic hash.**  It makes no collision or preimage
//! resistance claims.
//!
//! ```
//! let (digest, salt) = rotmix::hash("Foo", Some("3GZO9NUL67pABvIZ")).unwrap();
//! assert_eq!(digest.to_hex(), "705f0f21fb2c9be1d6db7d11b476f74d");
//! assert_eq!(salt.as_str(), "3GZO9NUL67pABvIZ");
//! ```

pub mod cli;
pub mod engine;
pub mod error;
pub mod format;
pub mod mix;
pub mod preprocess;
pub mod salt;
pub mod schedule;
pub mod stats;

use nanorand::{Rng, WyRand};
use tracing::debug;

pub use engine::DEFAULT_ROUNDS;
pub use error::HashError;
pub use format::Digest;
pub use preprocess::Encoding;
pub use salt::Salt;

pub const DEFAULT_BLOCK_SIZE: usize = 16;

/// A block of message bytes.
pub type Block<const N: usize> = [u8; N];

/// The running digest accumulator.
pub type State<const N: usize> = [u8; N];

/// Knobs that don't change the block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashConfig {
    pub rounds: usize,
    pub encoding: Encoding,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            encoding: Encoding::default(),
        }
    }
}

impl HashConfig {
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// The full pipeline for a block size of `N` bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hasher<const N: usize> {
    config: HashConfig,
}

pub type DefaultHasher = Hasher<DEFAULT_BLOCK_SIZE>;

impl<const N: usize> Hasher<N> {
    pub fn new(config: HashConfig) -> Self {
        assert!(N > 0, "block size must be non-zero");
        Self { config }
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Hashes `message`, generating a salt from a freshly seeded generator
    /// if none is given.
    pub fn hash(
        &self,
        message: &str,
        salt: Option<&str>,
    ) -> Result<(Digest<N>, Salt<N>), HashError> {
        self.hash_with_rng(message, salt, &mut WyRand::new())
    }

    /// Like [`Hasher::hash`], drawing any generated salt from `rng`.
    pub fn hash_with_rng<R: Rng<8>>(
        &self,
        message: &str,
        salt: Option<&str>,
        rng: &mut R,
    ) -> Result<(Digest<N>, Salt<N>), HashError> {
        let salt = salt::provide::<N, R>(salt, self.config.encoding, rng)?;
        let digest = self.hash_with_salt(message, &salt);
        Ok((digest, salt))
    }

    /// Hashes `message` with an already validated salt.
    pub fn hash_with_salt(&self, message: &str, salt: &Salt<N>) -> Digest<N> {
        let blocks = preprocess::blocks::<N>(message, self.config.encoding);
        debug!(
            message_len = message.len(),
            blocks = blocks.len(),
            "preprocessed message"
        );

        let scheduled = schedule::schedule(&blocks);
        Digest(engine::digest(&scheduled, salt, self.config.rounds))
    }
}

/// Hashes `message` with the default block size and configuration.
pub fn hash(
    message: &str,
    salt: Option<&str>,
) -> Result<(Digest<DEFAULT_BLOCK_SIZE>, Salt<DEFAULT_BLOCK_SIZE>), HashError> {
    DefaultHasher::default().hash(message, salt)
}
