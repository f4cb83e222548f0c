//! Captures build metadata reported by `/info`.
//!
//! Every step is best-effort: when a value cannot be determined the env var is
//! simply not set and the server reports "unknown".

use std::path::PathBuf;
use std::process::Command;

fn rustc_version() -> Option<String> {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let out = Command::new(rustc).arg("--version").output().ok()?;
    if !out.status.success() {
        return None;
    }
    // "rustc 1.80.0 (051478957 2024-07-21)"
    let text = String::from_utf8(out.stdout).ok()?;
    text.split_whitespace().nth(1).map(str::to_string)
}

/// Looks up the locked `axum` version in the workspace lockfile.
fn axum_version() -> Option<String> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").ok()?);
    let lock = manifest_dir.ancestors().map(|d| d.join("Cargo.lock")).find(|p| p.exists())?;
    println!("cargo:rerun-if-changed={}", lock.display());

    let text = std::fs::read_to_string(lock).ok()?;
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        if line.trim() == "name = \"axum\"" {
            let version = lines.next()?.trim();
            return version
                .strip_prefix("version = \"")
                .and_then(|v| v.strip_suffix('"'))
                .map(str::to_string);
        }
    }
    None
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");

    if let Some(v) = rustc_version() {
        println!("cargo:rustc-env=BEACON_RUSTC_VERSION={v}");
    }
    if let Some(v) = axum_version() {
        println!("cargo:rustc-env=BEACON_AXUM_VERSION={v}");
    }
}
