//! Rendering digests for display.

use crate::State;

/// Maps each byte to the character with that code point.
pub fn to_raw_string(state: &[u8]) -> String {
    state.iter().map(|&b| char::from(b)).collect()
}

/// Lowercase hex of a string whose characters are all byte values.
///
/// Returns `None` if any character is above U+00FF.
pub fn to_hex(s: &str) -> Option<String> {
    let bytes = s
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()?;
    Some(hex::encode(bytes))
}

/// The final state of a digest computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest<const N: usize>(pub State<N>);

impl<const N: usize> Digest<N> {
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub fn to_raw_string(&self) -> String {
        to_raw_string(&self.0)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl<const N: usize> std::fmt::Display for Digest<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
