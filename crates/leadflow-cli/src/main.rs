//! Leadflow CLI - preview, map and import lead files.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Inspect { file, json, map } => {
            commands::inspect::run(file, json, map, config, cli.verbose)
        }

        Commands::Import {
            file,
            output,
            map,
            dry_run,
        } => commands::import::run(file, output, map, dry_run, config),

        Commands::Fields { json } => commands::fields::run(json),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
