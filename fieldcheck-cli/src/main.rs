// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: CLI tools are expected to print errors to stderr.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stderr, clippy::exit)]

mod cli;
mod logging;

fn main() {
    match cli::run() {
        Ok(cli::RunStatus::Passed) => {}
        Ok(cli::RunStatus::Failed) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
