//! tablestore CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. Errors have already
//! been reported on stdout as JSON; the message is repeated on stderr and
//! the process exits non-zero.

use tablestore::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
