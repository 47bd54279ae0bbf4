//! # Roster CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ```text
//! roster add --name "Ann Lee" --id 101 --email a@b.com --contact 1234567890
//! roster                      # list (the default command)
//! roster edit 1 --contact 9998887777
//! roster delete 1
//! roster shell                # interactive form
//! roster config overflow-threshold 30
//! ```
//!
//! Data lives in `--data-dir`, else `$ROSTER_DATA`, else the platform data
//! directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
