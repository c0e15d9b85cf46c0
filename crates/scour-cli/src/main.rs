//! Scour CLI - cleaning pipeline for tabular patient datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            file,
            output,
            report,
            sentinel,
            fence,
            id_columns,
            target,
            excluded,
            scatter_x,
            no_charts,
        } => commands::clean::run(
            file,
            output,
            report,
            sentinel,
            fence,
            id_columns,
            target,
            excluded,
            scatter_x,
            no_charts,
            cli.verbose,
        ),

        Commands::Inspect { file, json } => commands::inspect::run(file, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
