//! Avalanche measurements for the mix step and the full digest.

use std::{fs::File, path::Path};

use nanorand::{Rng, WyRand};
use tracing::debug;

pub struct AvalancheChart {
    pub input_bit_len: usize,
    pub output_bit_len: usize,
    pub digest_bit_len: usize,

    // Number of input samples accumulated so far.
    pub sample_count: usize,

    // `input_bit_len * output_bit_len` flip counts, row-major by input bit.
    pub flips: Vec<u32>,
}

impl AvalancheChart {
    pub fn new(input_bit_len: usize, output_bit_len: usize, digest_bit_len: usize) -> Self {
        Self {
            input_bit_len,
            output_bit_len,
            digest_bit_len,
            sample_count: 0,
            flips: vec![0; input_bit_len * output_bit_len],
        }
    }

    pub fn accumulate(&mut self, in_bit: usize, out_bit: usize, flipped: bool) {
        self.flips[in_bit * self.output_bit_len + out_bit] += flipped as u32;
    }

    pub fn row(&self, in_bit: usize) -> &[u32] {
        let start = in_bit * self.output_bit_len;
        &self.flips[start..start + self.output_bit_len]
    }

    /// Probability that flipping `in_bit` flips `out_bit`.
    pub fn probability(&self, in_bit: usize, out_bit: usize) -> f64 {
        self.p(self.flips[in_bit * self.output_bit_len + out_bit])
    }

    fn p(&self, flips: u32) -> f64 {
        if self.sample_count == 0 {
            0.0
        } else {
            flips as f64 / self.sample_count as f64
        }
    }

    /// Output bits' worth of diffusion from a single input bit: each output
    /// bit counts for `1 - bias`.
    pub fn row_diffusion(&self, in_bit: usize) -> f64 {
        self.row(in_bit)
            .iter()
            .map(|&f| 1.0 - p_to_bias(self.p(f)))
            .sum()
    }

    pub fn row_entropy(&self, in_bit: usize) -> f64 {
        self.row(in_bit)
            .iter()
            .map(|&f| p_to_entropy(self.p(f)))
            .sum()
    }

    /// Min, average and max bias over every in/out bit pair.
    pub fn bias_summary(&self) -> Summary {
        Summary::of(self.flips.iter().map(|&f| p_to_bias(self.p(f))))
    }

    pub fn diffusion_summary(&self) -> Summary {
        Summary::of((0..self.input_bit_len).map(|i| self.row_diffusion(i)))
    }

    pub fn entropy_summary(&self) -> Summary {
        Summary::of((0..self.input_bit_len).map(|i| self.row_entropy(i)))
    }

    pub fn print_report(&self) {
        let bias = self.bias_summary();
        let diffusion = self.diffusion_summary();
        let entropy = self.entropy_summary();
        println!(
            "    Bias:
        Min: {:0.2}
        Avg: {:0.2}
        Max: {:0.2}
    Input Bit Diffusion (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits
    Input Bit Diffusion Entropy (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits",
            bias.min,
            bias.avg,
            bias.max,
            self.digest_bit_len,
            diffusion.min,
            diffusion.avg,
            diffusion.max,
            self.digest_bit_len,
            entropy.min,
            entropy.avg,
            entropy.max,
        );
    }

    /// Writes the chart as a greyscale image: one row per input bit, one
    /// column per output bit, white where the output bit always flipped.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut pixels = Vec::with_capacity(self.flips.len() * 4);
        for &f in &self.flips {
            let v = (self.p(f) * 255.0).round().min(255.0) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }

        png_encode_mini::write_rgba_from_u8(
            &mut File::create(path.as_ref())?,
            &pixels,
            self.output_bit_len as u32,
            self.input_bit_len as u32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Summary {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            Self {
                min: 0.0,
                avg: 0.0,
                max: 0.0,
            }
        } else {
            Self {
                min,
                avg: sum / count as f64,
                max,
            }
        }
    }
}

/// Builds an avalanche chart for `mix` by flipping every input bit of
/// `samples` generated inputs.
///
/// `generate_input` is called with the sample index (counting up from zero)
/// and must fill the buffer deterministically from it.  `mix` must overwrite
/// its output buffer entirely.
pub fn compute_avalanche<F1, F2>(
    generate_input: F1,
    mix: F2,
    input_size: usize,
    output_size: usize,
    digest_size: usize,
    samples: usize,
) -> AvalancheChart
where
    F1: Fn(usize, &mut [u8]),
    F2: Fn(&[u8], &mut [u8]),
{
    let mut chart = AvalancheChart::new(input_size * 8, output_size * 8, digest_size * 8);

    let mut input = vec![0u8; input_size];
    let mut output = vec![0u8; output_size];
    let mut tweaked = vec![0u8; input_size];
    let mut tweaked_output = vec![0u8; output_size];

    for sample in 0..samples {
        generate_input(sample, &mut input);
        mix(&input, &mut output);

        for in_bit in 0..(input_size * 8) {
            tweaked.copy_from_slice(&input);
            tweaked[in_bit / 8] ^= 1 << (in_bit % 8);
            mix(&tweaked, &mut tweaked_output);

            for out_bit in 0..(output_size * 8) {
                let mask = 1 << (out_bit % 8);
                let i = out_bit / 8;
                chart.accumulate(in_bit, out_bit, (output[i] ^ tweaked_output[i]) & mask != 0);
            }
        }

        chart.sample_count += 1;
        if sample % 1024 == 0 {
            debug!(sample, samples, "avalanche progress");
        }
    }

    chart
}

pub fn p_to_bias(p: f64) -> f64 {
    (p * 2.0 - 1.0).abs()
}

pub fn p_to_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        0.0
    } else {
        let q = 1.0 - p;
        -(p * p.log2()) - (q * q.log2())
    }
}

//-------------------------------------------------------------

/// Random bytes, seeded from the sample index.
pub fn generate_random(seed: usize, bytes: &mut [u8]) {
    let mut rng = WyRand::new_seed(mix64(seed as u64));
    rng.fill_bytes(bytes);
}

/// All zeros except one bit, walking through every bit position.
pub fn generate_single_1_bit(index: usize, bytes: &mut [u8]) {
    let bit = index % (bytes.len() * 8);
    bytes.fill(0);
    bytes[bit / 8] = 1 << (bit % 8);
}

/// The sample index as a little-endian integer in the low bytes.
pub fn generate_counting(index: usize, bytes: &mut [u8]) {
    let le = u64::to_le_bytes(index as u64);
    let n = bytes.len().min(le.len());
    bytes.fill(0);
    bytes[..n].copy_from_slice(&le[..n]);
}

/// 64-bit bijective bit mixer, so adjacent seeds give unrelated streams.
fn mix64(mut n: u64) -> u64 {
    n ^= 0x7be355f7c2e736d2;

    // "Mix13" from
    // http://zimbry.blogspot.ch/2011/09/better-bit-mixing-improving-on.html
    n ^= n >> 30;
    n = n.wrapping_mul(0xbf58476d1ce4e5b9);
    n ^= n >> 27;
    n = n.wrapping_mul(0x94d049bb133111eb);
    n ^= n >> 31;

    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(input: &[u8], output: &mut [u8]) {
        output.copy_from_slice(input);
    }

    fn invert_all_on_any_change(input: &[u8], output: &mut [u8]) {
        // Flips every output bit exactly when the input has odd parity,
        // so any single-bit input flip flips every output bit.
        let parity = input.iter().fold(0u8, |acc, b| acc ^ b).count_ones() % 2;
        output.fill(if parity == 1 { 0xff } else { 0x00 });
    }

    #[test]
    fn bias_helpers() {
        assert_eq!(p_to_bias(0.5), 0.0);
        assert_eq!(p_to_bias(0.0), 1.0);
        assert_eq!(p_to_bias(1.0), 1.0);
        assert_eq!(p_to_entropy(0.5), 1.0);
        assert_eq!(p_to_entropy(0.0), 0.0);
    }

    #[test]
    fn empty_chart_is_safe() {
        let chart = AvalancheChart::new(8, 8, 8);
        assert_eq!(chart.probability(0, 0), 0.0);
        assert_eq!(chart.row_entropy(3), 0.0);
        let bias = chart.bias_summary();
        assert_eq!(bias.max, 1.0);
    }

    #[test]
    fn identity_only_flips_its_own_bit() {
        let chart = compute_avalanche(generate_random, identity, 2, 2, 2, 16);
        assert_eq!(chart.sample_count, 16);
        for in_bit in 0..16 {
            for out_bit in 0..16 {
                let expected = if in_bit == out_bit { 1.0 } else { 0.0 };
                assert_eq!(chart.probability(in_bit, out_bit), expected);
            }
            assert_eq!(chart.row_diffusion(in_bit), 0.0);
        }
        assert_eq!(chart.bias_summary().min, 1.0);
    }

    #[test]
    fn full_flip_has_total_bias() {
        let chart = compute_avalanche(generate_counting, invert_all_on_any_change, 2, 2, 2, 8);
        assert!(chart.flips.iter().all(|&f| f == 8));
        assert_eq!(chart.bias_summary().avg, 1.0);
    }

    #[test]
    fn generators_fill_whole_buffer() {
        let mut bytes = [0xffu8; 16];
        generate_single_1_bit(9, &mut bytes);
        assert_eq!(bytes[1], 0b10);
        assert_eq!(bytes.iter().map(|b| b.count_ones()).sum::<u32>(), 1);

        let mut bytes = [0xffu8; 16];
        generate_counting(0x0102, &mut bytes);
        assert_eq!(&bytes[..3], &[0x02, 0x01, 0x00]);
        assert!(bytes[8..].iter().all(|&b| b == 0));

        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        generate_random(3, &mut a);
        generate_random(3, &mut b);
        assert_eq!(a, b);
        generate_random(4, &mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn rotmix_step_diffuses_less_than_the_digest() {
        use crate::{engine::digest_input, mix::mix_input};

        let step = compute_avalanche(generate_random, mix_input, 16, 16, 16, 32);
        let full = compute_avalanche(generate_random, digest_input, 16, 16, 16, 32);
        assert!(step.bias_summary().avg > full.bias_summary().avg);
    }
}
