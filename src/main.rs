use anyhow::Result;
use clap::Parser;
use vendor_scorer::cli::{self, Cli};
use vendor_scorer::config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load()?;
    cli::run(cli, &cfg)
}
