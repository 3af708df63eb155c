//! The rotmix step function.
//!
//! Each output byte is the state byte plus the block byte (mod 256), XORed
//! with the salt byte, then XORed with the *next* state byte rotated left by
//! `i mod 8` bits.  The neighbor coupling is what carries a change in one lane
//! across the rest of the state over successive steps.

use crate::{Block, Salt, State};

pub const IN_SIZE_BYTES: usize = 128 / 8;
pub const OUT_SIZE_BYTES: usize = 128 / 8;
pub const DIGEST_SIZE_BYTES: usize = 128 / 8;

/// One mixing step.  Reads only from the previous `state`.
pub fn mix<const N: usize>(state: &State<N>, block: &Block<N>, salt: &Salt<N>) -> State<N> {
    let salt = salt.as_bytes();
    let mut new_state = [0u8; N];

    for i in 0..N {
        let s = state[i].wrapping_add(block[i]) ^ salt[i];
        let neighbor = state[(i + 1) % N];
        new_state[i] = s ^ neighbor.rotate_left((i % 8) as u32);
    }

    new_state
}

/// The mix step over a zero state and zero salt, so the analysis tooling
/// can measure how a single block diffuses.
pub fn mix_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    let mut block = [0u8; IN_SIZE_BYTES];
    block.copy_from_slice(in_bytes);

    let state = mix(&[0u8; OUT_SIZE_BYTES], &block, &Salt::zeroed());
    out_bytes.copy_from_slice(&state);
}

/// The mix step with the input taken as the *state*, with a zero block and
/// zero salt.  This is where the neighbor rotation does its work.
pub fn mix_state(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    let mut state = [0u8; IN_SIZE_BYTES];
    state.copy_from_slice(in_bytes);

    let state = mix(&state, &[0u8; IN_SIZE_BYTES], &Salt::zeroed());
    out_bytes.copy_from_slice(&state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_state_passes_block_through() {
        let block = [1u8; 16];
        assert_eq!(mix(&[0; 16], &block, &Salt::zeroed()), [1u8; 16]);
    }

    #[test]
    fn salt_is_xored_in() {
        let salt = Salt::<4>::from_bytes(&[0xff, 0x0f, 0xf0, 0x00]).unwrap();
        assert_eq!(mix(&[0; 4], &[0; 4], &salt), [0xff, 0x0f, 0xf0, 0x00]);
    }

    #[test]
    fn addition_wraps() {
        let state = [0xffu8, 0, 0, 0];
        let out = mix(&state, &[2, 0, 0, 0], &Salt::zeroed());
        // Lane 0: 0xff + 2 wraps to 1, neighbor is 0.
        assert_eq!(out[0], 1);
        // Lane 3 takes lane 0 as its neighbor, rotated left by 3.
        assert_eq!(out[3], 0xff);
    }

    #[test]
    fn neighbor_rotation_amount_follows_lane() {
        // Only lane 1 is set, so it shows up as the neighbor of lane 0
        // (rotated by 0) and in lane 1 itself.
        let state = [0u8, 0b1000_0001, 0, 0, 0, 0, 0, 0, 0];
        let out = mix(&state, &[0; 9], &Salt::zeroed());
        assert_eq!(out[0], 0b1000_0001);
        assert_eq!(out[1], 0b1000_0001);

        // Lane 8 has rotation amount 0 again, and takes lane 0 as its neighbor.
        let state = [0b0000_0011u8, 0, 0, 0, 0, 0, 0, 0, 0];
        let out = mix(&state, &[0; 9], &Salt::zeroed());
        assert_eq!(out[8], 0b0000_0011);

        // Lane 7 rotates its neighbor (lane 8) left by 7.
        let state = [0u8, 0, 0, 0, 0, 0, 0, 0, 0b0000_0011];
        let out = mix(&state, &[0; 9], &Salt::zeroed());
        assert_eq!(out[7], 0b1000_0001);
    }

    #[test]
    fn reads_previous_state_only() {
        let state = [1u8, 2, 3, 4];
        let block = [5u8, 6, 7, 8];
        let salt = Salt::<4>::from_bytes(&[9, 10, 11, 12]).unwrap();

        let mut expected = [0u8; 4];
        for i in 0..4 {
            let s = (state[i] + block[i]) ^ salt.as_bytes()[i];
            let n = state[(i + 1) % 4];
            expected[i] = s ^ n.rotate_left(i as u32 % 8);
        }
        assert_eq!(mix(&state, &block, &salt), expected);
    }

    #[test]
    fn slice_adapters() {
        let mut out = [0u8; OUT_SIZE_BYTES];
        mix_input(&[3u8; IN_SIZE_BYTES], &mut out);
        assert_eq!(out, [3u8; OUT_SIZE_BYTES]);

        let mut input = [0u8; IN_SIZE_BYTES];
        input[1] = 1;
        mix_state(&input, &mut out);
        assert_eq!(out[0], 1);
        assert_eq!(out[1], 1);
        assert!(out[2..].iter().all(|&b| b == 0));
    }
}
