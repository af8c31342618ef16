//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use errand_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on stderr before exiting"
)]
fn main() {
    match errand_cli::run() {
        Ok(()) => {}
        // Clap renders help, version, and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("errand: {err}");
            std::process::exit(1);
        }
    }
}
