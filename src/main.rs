use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Env;
use log::error;

use crate::config::Config;
use crate::controller::Command;

mod config;
mod csv_reader;
mod import;
mod timesheet;
mod category;
mod editor;
mod prompt;
mod categorize;
mod review;
mod report;
mod export;
mod controller;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Config file path, defaults to the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli :Cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("{:#}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    controller::run_command(cli.command, &config)
}
