//! Rewrite the effects dataset in canonical order, or check it with `--check`.

use std::io;

use clap::Parser;
use effects_cli::cli::SortCli;
use effects_cli::commands::{EXIT_ERROR, run_sort};
use effects_cli::logging::init_logging;
use effects_cli::report::{SORT_TAG, failure_line};

fn main() {
    let cli = SortCli::parse();
    cli.logging.color.write_global();
    if let Err(error) = init_logging(&cli.logging.log_config()) {
        eprintln!("{SORT_TAG} ❌ failed to initialize logging: {error}");
        std::process::exit(EXIT_ERROR);
    }
    let exit_code = match run_sort(&cli, &mut io::stdout().lock(), &mut io::stderr().lock()) {
        Ok(outcome) => outcome.exit_code(),
        Err(error) => {
            eprintln!("{}", failure_line(SORT_TAG, &error));
            EXIT_ERROR
        }
    };
    std::process::exit(exit_code);
}
