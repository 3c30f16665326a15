//! todo-api CLI entry point
//!
//! Parses arguments, runs the selected command, prints errors to stderr
//! and exits non-zero on failure. All logic lives in the `cli` module.

use todo_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
