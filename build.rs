//! Build script for Nuts Balance
//!
//! Embeds a persistent build counter, the build time and the cargo profile so the
//! `nuts_status` tool can tell which binary is answering.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";

/// Read the last build number; a missing or garbled counter restarts at zero
fn last_build_number(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");

    let counter = Path::new(COUNTER_FILE);
    let build_number = last_build_number(counter) + 1;
    if let Err(e) = fs::write(counter, build_number.to_string()) {
        // Read-only checkouts still build; the number just does not advance
        println!("cargo:warning=could not update {}: {}", COUNTER_FILE, e);
    }

    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=NUTS_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=NUTS_BUILD_TIMESTAMP={}", built_at);
    println!("cargo:rustc-env=NUTS_BUILD_PROFILE={}", profile);
}
