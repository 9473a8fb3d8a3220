use super::args::Cli;
use super::handlers;
use crate::config::Config;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };
    log::debug!("settings: {:?}", config);

    handlers::analyze::handle(&cli.csv, &cli.out, &config, cli.format)
}
