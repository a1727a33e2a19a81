use std::process::Command;

/// Short commit hash of the workspace, if it is a git checkout.
fn git_short_sha(workspace: &str) -> Option<String> {
    let out = Command::new("git")
        .args(["-C", workspace, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = format!("{manifest_dir}/..");

    println!("cargo:rerun-if-changed={workspace}/.git/HEAD");
    let sha = git_short_sha(&workspace).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=WAYPOINT_BUILD_SHA={sha}");
}
