//! Bench Catalog CLI entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match benchcat_cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
