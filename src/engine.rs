use tracing::{debug, trace};

use crate::{
    mix::{mix, IN_SIZE_BYTES, OUT_SIZE_BYTES},
    Block, Salt, State,
};

/// Number of full passes over the blocks when none is configured.
pub const DEFAULT_ROUNDS: usize = 40;

/// Runs `rounds` full passes of the mix step over `blocks`, starting from a
/// zero state.
///
/// Rounds and blocks are both visited in ascending order.  With zero rounds,
/// or no blocks, the zero state is returned unchanged.
pub fn digest<const N: usize>(blocks: &[Block<N>], salt: &Salt<N>, rounds: usize) -> State<N> {
    debug!(blocks = blocks.len(), rounds, block_size = N, "digesting");

    let mut state = [0u8; N];
    for round in 0..rounds {
        for block in blocks {
            state = mix(&state, block, salt);
        }
        trace!(round, state = ?state, "round complete");
    }

    state
}

/// A full default-round digest of a single block with a zero salt, in the
/// byte-slice shape the analysis tooling uses.
pub fn digest_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    let mut block = [0u8; IN_SIZE_BYTES];
    block.copy_from_slice(in_bytes);

    let state = digest(&[block], &Salt::zeroed(), DEFAULT_ROUNDS);
    out_bytes.copy_from_slice(&state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn salt16() -> Salt<16> {
        Salt::from_bytes(b"3GZO9NUL67pABvIZ").unwrap()
    }

    #[test]
    fn zero_rounds_is_zero_state() {
        let blocks = [[0xaa; 16], [0x55; 16]];
        assert_eq!(digest(&blocks, &salt16(), 0), [0u8; 16]);
    }

    #[test]
    fn no_blocks_is_zero_state() {
        assert_eq!(digest::<16>(&[], &salt16(), 40), [0u8; 16]);
    }

    #[test]
    fn one_round_one_block_is_one_mix() {
        let block = [7u8; 16];
        let salt = salt16();
        assert_eq!(digest(&[block], &salt, 1), mix(&[0; 16], &block, &salt));
    }

    #[test]
    fn rounds_chain_through_state() {
        let blocks = [[1u8; 16], [2u8; 16]];
        let salt = salt16();

        let mut expected = [0u8; 16];
        for _ in 0..3 {
            expected = mix(&expected, &blocks[0], &salt);
            expected = mix(&expected, &blocks[1], &salt);
        }
        assert_eq!(digest(&blocks, &salt, 3), expected);
    }

    #[test]
    fn slice_adapter_matches_digest() {
        let mut out = [0u8; OUT_SIZE_BYTES];
        digest_input(&[9u8; IN_SIZE_BYTES], &mut out);
        assert_eq!(out, digest(&[[9u8; 16]], &Salt::zeroed(), DEFAULT_ROUNDS));
    }

    #[test]
    fn block_order_matters() {
        let salt = salt16();
        let a = digest(&[[1u8; 16], [2u8; 16]], &salt, 4);
        let b = digest(&[[2u8; 16], [1u8; 16]], &salt, 4);
        assert_ne!(a, b);
    }
}
