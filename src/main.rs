//! Binary entrypoint for the `specledger` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Logging is initialised in commands::dispatch once config is loaded.
    match specledger::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
