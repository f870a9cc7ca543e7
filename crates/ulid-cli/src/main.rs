use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logger;


fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logger::init_cli_logger(cli.verbose);
    tracing::debug!(command = ?cli.command, "starting");

    let mut stdout = std::io::stdout().lock();
    match commands::run(&cli.command, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
