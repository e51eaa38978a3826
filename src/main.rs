//! xe binary entry point.

use std::process::ExitCode;

use xe_cli::cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        // Backing out of a prompt is not a failure.
        Err(err) if cli::is_cancelled(&err) => ExitCode::SUCCESS,
        Err(err) => {
            cli::report_error(&err);
            ExitCode::FAILURE
        }
    }
}
