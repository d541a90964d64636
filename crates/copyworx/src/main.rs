//! CopyWorx command-line front end.
//!
//! Drives resumable section-by-section generation sessions stored on disk.

use clap::Parser;
use copyworx::cli::{self, Cli};
use copyworx::{CopyworxConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    init_tracing(&args.log_level, args.log_format);

    let config = CopyworxConfig::load(args.config.as_deref())?;
    tracing::debug!(session_dir = %config.storage().session_dir().display(), "Using session store");

    cli::run(args, config).await
}
