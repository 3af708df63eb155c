use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rotmix::{
    engine::{self, DEFAULT_ROUNDS},
    mix,
    stats::{compute_avalanche, generate_counting, generate_random, generate_single_1_bit},
};

/// Avalanche report for the rotmix step and the full digest.
#[derive(Parser)]
#[command(name = "mix_bias")]
struct Cli {
    /// Number of input samples per target and pattern
    #[arg(long, default_value_t = 1 << 12)]
    samples: usize,

    /// Directory to write avalanche chart PNGs into
    #[arg(long)]
    png_dir: Option<PathBuf>,
}

struct Target<'a> {
    name: &'a str,
    mix_function: &'a dyn Fn(&[u8], &mut [u8]),
    input_size: usize,  // In bytes.
    output_size: usize, // In bytes.
    digest_size: usize, // In bytes.
}

const TARGETS: &[Target] = &[
    Target {
        name: "rotmix step, block input",
        mix_function: &mix::mix_input,
        input_size: mix::IN_SIZE_BYTES,
        output_size: mix::OUT_SIZE_BYTES,
        digest_size: mix::DIGEST_SIZE_BYTES,
    },
    Target {
        name: "rotmix step, state input",
        mix_function: &mix::mix_state,
        input_size: mix::IN_SIZE_BYTES,
        output_size: mix::OUT_SIZE_BYTES,
        digest_size: mix::DIGEST_SIZE_BYTES,
    },
    Target {
        name: "rotmix digest, one block",
        mix_function: &engine::digest_input,
        input_size: mix::IN_SIZE_BYTES,
        output_size: mix::OUT_SIZE_BYTES,
        digest_size: mix::DIGEST_SIZE_BYTES,
    },
];

struct BitPattern<'a> {
    name: &'a str,
    gen_function: &'a dyn Fn(usize, &mut [u8]),

    /// Fixed sample count, or `None` to use `--samples`.
    samples: Option<usize>,
}

const PATTERNS: &[BitPattern] = &[
    BitPattern {
        name: "random",
        gen_function: &generate_random,
        samples: None,
    },
    BitPattern {
        name: "counting",
        gen_function: &generate_counting,
        samples: None,
    },
    BitPattern {
        name: "single 1 bit",
        gen_function: &generate_single_1_bit,
        // Every bit position once.
        samples: Some(mix::IN_SIZE_BYTES * 8),
    },
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    if let Some(dir) = &args.png_dir {
        std::fs::create_dir_all(dir)?;
    }

    println!("Digest rounds: {DEFAULT_ROUNDS}");
    for target in TARGETS {
        println!("================================================");
        println!("{}", target.name);

        for pattern in PATTERNS {
            let samples = pattern.samples.unwrap_or(args.samples);

            println!("\n  {} ({} samples)", pattern.name, samples);
            let chart = compute_avalanche(
                pattern.gen_function,
                target.mix_function,
                target.input_size,
                target.output_size,
                target.digest_size,
                samples,
            );
            chart.print_report();

            if let Some(dir) = &args.png_dir {
                chart.write_png(dir.join(format!("{} - {}.png", target.name, pattern.name)))?;
            }
        }
    }

    Ok(())
}
