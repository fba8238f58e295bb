//! CLI entry point for the eye image ellipse analysis

use clap::Parser;
use corneafit::io::cli::{AnalysisSession, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut session = AnalysisSession::new(cli);
    let outcome = session.run(
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr(),
    );

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if error.is_clean_exit() => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
