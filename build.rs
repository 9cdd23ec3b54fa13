//! Build script to embed commit hash and build date at compile time.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let commit = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (commit.len() == 7).then_some(commit)
}

fn main() {
    // Get commit from env var (CI) or git command (local dev)
    let commit = env::var("BUILD_COMMIT")
        .ok()
        .filter(|c| c.len() == 7)
        .or_else(git_commit)
        .unwrap_or_else(|| "unknown".to_string());

    // Get date from env var (CI) or current date (local dev)
    let date = env::var("BUILD_DATE")
        .ok()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    fs::write(
        &dest_path,
        format!(
            "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
            commit, date
        ),
    )
    .expect("failed to write build info");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
