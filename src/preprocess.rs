//! Turning a text message into fixed-size blocks.
//!
//! A message is encoded to bytes, zero-padded up to a multiple of the block
//! size, and cut into consecutive blocks.  No length marker is appended, so a
//! message that already ends in zero bytes pads to the same blocks as one
//! without them.

use crate::Block;

/// How message and salt text is turned into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Encoding {
    /// One byte per character: the character's code point, truncated to its
    /// low byte.  Exact for everything up to U+00FF.
    #[default]
    Latin1,
    /// The UTF-8 bytes of the text.
    Utf8,
}

impl Encoding {
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Latin1 => text.chars().map(|c| c as u32 as u8).collect(),
            Encoding::Utf8 => text.as_bytes().to_vec(),
        }
    }
}

/// Encodes `message` to bytes.
pub fn encode(message: &str, encoding: Encoding) -> Vec<u8> {
    encoding.encode(message)
}

/// Appends zero bytes until the length is a multiple of `block_size`.
///
/// Aligned input is returned as is, except that an empty input becomes one
/// block of zeros so that every message yields at least one block.
pub fn pad(mut bytes: Vec<u8>, block_size: usize) -> Vec<u8> {
    assert!(block_size > 0);

    let rem = bytes.len() % block_size;
    if bytes.is_empty() {
        bytes.resize(block_size, 0);
    } else if rem != 0 {
        bytes.resize(bytes.len() + block_size - rem, 0);
    }
    bytes
}

/// Splits padded bytes into consecutive `N`-byte blocks.
///
/// `padded` must already be a multiple of `N` long.
pub fn split<const N: usize>(padded: &[u8]) -> Vec<Block<N>> {
    assert!(padded.len() % N == 0);

    padded
        .chunks_exact(N)
        .map(|chunk| {
            let mut block = [0u8; N];
            block.copy_from_slice(chunk);
            block
        })
        .collect()
}

/// Encodes, pads and splits `message` in one go.
pub fn blocks<const N: usize>(message: &str, encoding: Encoding) -> Vec<Block<N>> {
    split(&pad(encode(message, encoding), N))
}
