// build.rs
// Puts memory.x on the linker search path so cortex-m-rt's link.x can find it.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    let memory_x = PathBuf::from(&crate_dir).join("memory.x");
    if let Err(err) = fs::copy(&memory_x, out_dir.join("memory.x")) {
        eprintln!("Failed to copy {}: {}", memory_x.display(), err);
        std::process::exit(1);
    }

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
