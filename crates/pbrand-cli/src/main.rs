//! PharmaBrand CLI
//!
//! Create projects, edit the brand package and run compliance checks
//! against the PharmaBrand backend.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Initialize tracing on stderr so stdout stays free for command output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pbrand=debug,pbrand_core=debug,pbrand_client=debug"
    } else {
        "pbrand=info,pbrand_core=info,pbrand_client=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    cli.execute().await
}
