use anyhow::Context;
use clap::Parser;
use printdash::settings::Settings;

use crate::cli::Cli;

mod cli;

#[tokio::main(flavor = "multi_thread")]
pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::from_file(&cli.config).context("Error reading configuration")?;
    settings.monitoring.init()?;

    cli.command.run(&settings).await
}
