//! Build script for reelsync - embeds git commit hash and build info
//!
//! When the `release` feature is NOT set (default dev builds):
//! - Emits `VERGEN_GIT_SHA` environment variable with the commit hash
//! - Emits `REELSYNC_BUILD_DATE` environment variable with the build date
//!
//! When the `release` feature IS set (CI/official builds):
//! - Emits build date only (clean version string without git hash)

use std::process::Command;

/// Get the current date in YYYY-MM-DD format
fn get_build_date() -> String {
    if let Ok(output) = Command::new("date").args(["+%Y-%m-%d"]).output() {
        if output.status.success() {
            return String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
    }
    "unknown".to_string()
}

/// Get the repository name in "owner/repo" format from git remote
fn get_repo_name() -> String {
    if let Ok(output) = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()
    {
        if output.status.success() {
            let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if let Some(repo) = parse_repo_from_url(&url) {
                return repo;
            }
        }
    }
    "reelsync/reelsync".to_string()
}

/// Parse owner/repo from a git remote URL
///
/// Handles `https://host/owner/repo(.git)` and `git@host:owner/repo(.git)`.
fn parse_repo_from_url(url: &str) -> Option<String> {
    let url = url.trim_end_matches(".git");

    if url.contains("github.com") || url.contains("gitlab.com") || url.contains("codeberg.org") {
        if let Some(path) = url
            .split('/')
            .collect::<Vec<_>>()
            .get(3..)
            .map(|parts| parts.join("/"))
        {
            if !path.is_empty() {
                return Some(path);
            }
        }
        if let Some(colon_pos) = url.find(':') {
            let path = &url[colon_pos + 1..];
            if !path.is_empty() {
                return Some(path.to_string());
            }
        }
    }
    None
}

fn main() {
    let repo_name = get_repo_name();
    let build_date = get_build_date();
    println!("cargo:rustc-env=REELSYNC_REPO_NAME={}", repo_name);
    println!("cargo:rustc-env=REELSYNC_BUILD_DATE={}", build_date);

    // Only emit git SHA when NOT building with --features release
    #[cfg(not(feature = "release"))]
    {
        use vergen_gitcl::{Emitter, GitclBuilder};

        let git_result = GitclBuilder::default().sha(true).build();

        let emit_result = match git_result {
            Ok(git) => Emitter::default()
                .add_instructions(&git)
                .and_then(|emitter| emitter.emit()),
            Err(e) => {
                eprintln!("cargo:warning=Failed to configure git info: {}", e);
                println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
                return;
            }
        };

        if let Err(e) = emit_result {
            // Not in a git repo
            eprintln!("cargo:warning=Failed to get git info: {}", e);
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
        }
    }
}
