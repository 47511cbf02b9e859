use anyhow::{Context, Result};
use bank_sim::bin_utils::Shell;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout belongs to the console, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    Shell::new(stdin.lock(), &mut stdout)
        .run()
        .context("Console session failed")
}
