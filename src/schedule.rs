use crate::Block;

/// Rotates each block left by its position in the message.
///
/// Block `i` has its bytes cyclically shifted left by `i mod N` places, so
/// identical blocks at different offsets feed different bytes into each
/// state lane.  This happens once, before any mixing round.
pub fn schedule<const N: usize>(blocks: &[Block<N>]) -> Vec<Block<N>> {
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let mut rotated = *block;
            rotated.rotate_left(i % N);
            rotated
        })
        .collect()
}
