//! `manifest-check` — parse manifest text and report the first error.
//!
//! Usage:
//!   manifest-check < manifest.json
//!
//! Prints `OK: <n> values` on success; on failure prints the located
//! parse error (`line:col: message`) and exits nonzero.

use std::io::{self, Read, Write};

use manifest_engine::cli::check_manifest;

fn main() {
    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match check_manifest(&buf) {
        Ok(result) => {
            io::stdout().write_all(result.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
