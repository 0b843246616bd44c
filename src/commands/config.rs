//! Config subcommands handler

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use reelsync::config::{migrate_config, MigrateResult};
use reelsync::theme::current_theme;
use reelsync::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{}", current_theme().primary_text(&toml_str));
    Ok(())
}

/// Print the config file location.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Open the config file in `$EDITOR` (default `vi`), creating it first.
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    if !config_path.exists() {
        Config::default().save_to(&config_path)?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!(
        "{}",
        current_theme().primary_text(&format!(
            "Opening {} with {}",
            config_path.display(),
            editor
        ))
    );

    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to start editor {}", editor))?;
    if !status.success() {
        anyhow::bail!("Editor exited with {}", status);
    }

    // Surface syntax errors right away rather than at next start
    Config::load_from(&config_path)?;
    Ok(())
}

/// Add missing fields to the config file after a preview.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(assume_yes: bool) -> Result<()> {
    let theme = current_theme();
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;
    if !result.has_changes() {
        println!("{}", theme.primary_text("Config is already up to date."));
        return Ok(());
    }

    if file_exists {
        println!("{}", theme.primary_text(&summary(&result)));
    } else {
        println!(
            "{}",
            theme.primary_text("No config file yet; it will be created with defaults.")
        );
    }
    println!();
    for line in preview_lines(&result) {
        println!("{}", line);
    }
    println!();

    let question = format!("Write {}?", config_path.display());
    if !assume_yes && !prompt_confirmation(&question)? {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, &result.content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{}", theme.success_text("Config updated."));
    Ok(())
}

fn summary(result: &MigrateResult) -> String {
    match result.sections_added.len() {
        0 => format!("{} missing field(s):", result.added_fields.len()),
        sections => format!(
            "{} missing field(s), {} new section(s):",
            result.added_fields.len(),
            sections
        ),
    }
}

/// Lines of the migrated file that are new, grouped under their section
/// header and prefixed with `+`.
pub fn preview_lines(result: &MigrateResult) -> Vec<String> {
    let theme = current_theme();
    let mut lines = Vec::new();
    let mut section = String::new();
    let mut header_shown = true;

    for line in result.content.lines() {
        let trimmed = line.trim();
        if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            section = name.trim().to_string();
            header_shown = false;
            continue;
        }
        let Some((key, _)) = trimmed.split_once('=') else {
            continue;
        };
        let field = format!("{}.{}", section, key.trim());
        if !result.added_fields.contains(&field) {
            continue;
        }
        if !header_shown {
            let header = format!("[{}]", section);
            if result.sections_added.contains(&section) {
                lines.push(theme.success_text(&format!("+ {}", header)));
            } else {
                lines.push(format!("  {}", header));
            }
            header_shown = true;
        }
        lines.push(theme.success_text(&format!("+ {}", line)));
    }
    lines
}

/// Ask a yes/no question on stdin. Non-interactive stdin answers no.
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();
    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: pass --yes to apply")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    let answer = input.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
