//! yamlnav-lsp - Main entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "yamlnav-lsp")]
#[command(version)]
#[command(about = "Language server for navigating YAML anchors across imported files", long_about = None)]
struct Cli {
    /// Communicate over stdin/stdout (the only transport; accepted for client compatibility)
    #[arg(long)]
    stdio: bool,
}

fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yamlnav=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let _cli = Cli::parse();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(yamlnav_lsp::run_server());

    Ok(())
}
