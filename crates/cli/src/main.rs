mod commands;
mod output;

use std::process::ExitCode;

use commands::run_cli;

fn main() -> ExitCode {
	// Errors have already been displayed by the time they get here
	match run_cli() {
		Ok(()) => ExitCode::SUCCESS,
		Err(..) => ExitCode::FAILURE,
	}
}
