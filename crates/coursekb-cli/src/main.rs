//! coursekb command-line interface.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;

use cli::{Cli, Command};
use commands::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.quiet {
        coursekb::console::init();
    }

    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<String, CliError> {
    match command {
        Command::Recommend {
            catalog,
            filters,
            config,
            top,
            pretty,
        } => {
            let mut config = commands::load_config(config.as_deref())?;
            if let Some(top) = top {
                config = config.with_top_n(top);
                config.validate()?;
            }
            let filters = commands::parse_filters(&filters)?;
            let catalog = commands::load_catalog(&catalog)?;
            commands::recommend(&catalog, &filters, &config, pretty)
        }
        Command::Status { config } => {
            let config = commands::load_config(config.as_deref())?;
            commands::status(&config)
        }
    }
}
