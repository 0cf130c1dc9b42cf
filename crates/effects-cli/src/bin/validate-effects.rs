//! Validate the effects dataset.

use std::io;

use clap::Parser;
use effects_cli::cli::ValidateCli;
use effects_cli::commands::{EXIT_ERROR, run_validate};
use effects_cli::logging::init_logging;
use effects_cli::report::{VALIDATION_TAG, failure_line};

fn main() {
    let cli = ValidateCli::parse();
    cli.logging.color.write_global();
    if let Err(error) = init_logging(&cli.logging.log_config()) {
        eprintln!("{VALIDATION_TAG} ❌ failed to initialize logging: {error}");
        std::process::exit(EXIT_ERROR);
    }
    let exit_code = match run_validate(&cli, &mut io::stdout().lock(), &mut io::stderr().lock()) {
        Ok(outcome) => outcome.exit_code(),
        Err(error) => {
            eprintln!("{}", failure_line(VALIDATION_TAG, &error));
            EXIT_ERROR
        }
    };
    std::process::exit(exit_code);
}
