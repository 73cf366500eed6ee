mod commands;

use crate::commands::{handle_run, handle_stage};
use clap::{Parser, Subcommand};
use common::error::PipelineError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tripwarehouse")]
pub struct Cli {
    #[arg(
        long = "config-path",
        short = 'c',
        help = "path to config file",
        global = true
    )]
    pub config_path: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Fetch upstream data and stage it as CSV in the blob store
    Stage,
    /// Rebuild the warehouse schema from the staged objects
    Run,
}

fn run_cmd(result: Result<(), PipelineError>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    logging::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Cmd::Stage => run_cmd(handle_stage(cli.config_path)),
        Cmd::Run => run_cmd(handle_run(cli.config_path)),
    }
}
