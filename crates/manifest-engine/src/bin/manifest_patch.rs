//! `manifest-patch` — apply a PatchSet to a manifest document.
//!
//! Usage:
//!   manifest-patch '<patchset-json>'
//!
//! The manifest text is read from stdin. The PatchSet envelope is the
//! first argument. The patched document is printed on stdout.

use std::io::{self, Read, Write};

use manifest_engine::cli::patch_manifest;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let patchset = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprintln!("First argument must be a PatchSet JSON object.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match patch_manifest(&buf, &patchset) {
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
