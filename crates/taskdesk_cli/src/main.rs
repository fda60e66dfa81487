//! `taskdesk` binary: workspace setup, CSV import/export and a dashboard
//! summary on top of `taskdesk_api`.

use std::process::ExitCode;

use clap::Parser;
use taskdesk_api::Backend;
use taskdesk_core::Principal;

mod cli;
mod cmd;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let config = cli.config();
    let backend = match Backend::from_config(&config, Principal::new(cli.principal.clone())) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("error: cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    match cmd::run(&backend, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
