//! `manifest-locate` — resolve a JSON Pointer to line:col.
//!
//! Usage:
//!   manifest-locate '<json-pointer>'
//!
//! The manifest text is read from stdin. Prints `line:col` (1-based).

use std::io::{self, Read, Write};

use manifest_engine::cli::locate_pointer;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let pointer = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprintln!("First argument must be a JSON Pointer.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match locate_pointer(&buf, &pointer) {
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
