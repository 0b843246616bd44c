//! Development tasks: `cargo xtask man` and `cargo xtask completions`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate_to, Shell};

use reelsync::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask", about = "reelsync development tasks")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages into `target/man`
    Man {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate completion scripts for every shell into `target/completions`
    Completions {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn generate_man(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;
    let cmd = Cli::command();
    clap_mangen::generate_to(cmd, out)
        .with_context(|| format!("Failed to write man pages to {}", out.display()))?;
    println!("Man pages written to {}", out.display());
    Ok(())
}

fn generate_completions(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;
    let mut cmd = Cli::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        let path = generate_to(shell, &mut cmd, "reelsync", out)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let target = workspace_root().join("target");
    match Xtask::parse().command {
        Task::Man { out } => generate_man(&out.unwrap_or_else(|| target.join("man"))),
        Task::Completions { out } => {
            generate_completions(&out.unwrap_or_else(|| target.join("completions")))
        }
    }
}
