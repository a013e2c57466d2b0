//! Entry point for the `wayfare` command-line interface.
#![forbid(unsafe_code)]

use wayfare_cli::CliError;

fn main() {
    match wayfare_cli::run() {
        Ok(()) => {}
        // Lets clap render help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("wayfare: {err}");
            std::process::exit(1);
        }
    }
}
