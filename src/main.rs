//! Main entry point for the shrinkray CLI app

use clap::Parser;
use shrinkray::cli::Args;

fn main() -> std::process::ExitCode {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

fn run_app() -> Result<(), shrinkray::ResizeError> {
    let args = Args::parse();
    shrinkray::run(args)
}
