//! Command-line front end for `rotmix`.
//!
//! ```text
//! rotmix <message> [<salt>] [--rounds N] [--encoding latin1|utf8]
//! ```
//!
//! Without a message only the usage text is printed.  Without a salt one is
//! generated, and printed alongside the hash so the result can be
//! reproduced.

use std::io::Write;

use clap::Parser;
use nanorand::Rng;
use tracing::info;

use crate::{DefaultHasher, Encoding, HashConfig, DEFAULT_BLOCK_SIZE, DEFAULT_ROUNDS};

/// Salted rotate-and-mix hash of a string message.
#[derive(Debug, Clone, Parser)]
#[command(name = "rotmix", version)]
pub struct Cli {
    /// Message to hash
    #[arg(allow_hyphen_values = true)]
    pub message: Option<String>,

    /// Salt, exactly 16 characters (generated when omitted)
    #[arg(allow_hyphen_values = true)]
    pub salt: Option<String>,

    /// Number of mixing rounds
    #[arg(long, env = "ROTMIX_ROUNDS", default_value_t = DEFAULT_ROUNDS)]
    pub rounds: usize,

    /// How message and salt characters become bytes
    #[arg(long, env = "ROTMIX_ENCODING", value_enum, default_value_t = Encoding::Latin1)]
    pub encoding: Encoding,
}

impl Cli {
    pub fn config(&self) -> HashConfig {
        HashConfig::default()
            .with_rounds(self.rounds)
            .with_encoding(self.encoding)
    }
}

/// The three-line usage block printed when no message is given.
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <message> [<salt>]
Takes in a string message parameter and an optional string salt parameter and produces a hash output. If a salt isn't provided, one is generated.
Examples: {program} \"Hello World!\" | {program} \"Foo\" \"3GZO9NUL67pABvIZ\"
"
    )
}

/// Runs one invocation, writing the report to `out`.
///
/// `rng` is only drawn from when a message is given without a salt.
pub fn run<R: Rng<8>, W: Write>(
    cli: &Cli,
    program: &str,
    rng: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(message) = cli.message.as_deref() else {
        out.write_all(usage(program).as_bytes())?;
        return Ok(());
    };

    let hasher = DefaultHasher::new(cli.config());
    let (digest, salt) = hasher.hash_with_rng(message, cli.salt.as_deref(), rng)?;
    info!(
        block_size = DEFAULT_BLOCK_SIZE,
        rounds = cli.rounds,
        generated_salt = cli.salt.is_none(),
        "hashed message"
    );

    writeln!(out, "Hash: {}", digest.to_hex())?;
    writeln!(out, "Salt: {salt}")?;
    Ok(())
}
