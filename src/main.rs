use anyhow::Result;
use slat::commands::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Messages route through tracing only in debug mode; the subscriber is
    // harmless otherwise, so it is always installed.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Cli::menu()
}
