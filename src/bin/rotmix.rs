use clap::Parser;
use nanorand::WyRand;
use tracing_subscriber::EnvFilter;

use rotmix::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "rotmix".to_string());
    let cli = Cli::parse();

    run(&cli, &program, &mut WyRand::new(), &mut std::io::stdout().lock())
}
