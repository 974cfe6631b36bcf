use crate::cli::ConfigArgs;
use crate::config::{Config, ConfigChanges};
use crate::ui;

use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use std::env;

/// Handle the 'config' command
pub fn handle_config_command(args: &ConfigArgs) -> Result<()> {
    debug!("Handling 'config' command with args: {args:?}");

    let repo_path = match &args.common.repo_path {
        Some(path) => path.clone(),
        None => env::current_dir().context("Failed to read the current directory")?,
    };

    let common = &args.common;
    let changes = ConfigChanges {
        remote: common.remote.clone(),
        branch: common.branch.clone(),
        default_message: args.default_message.clone(),
        set_upstream: common.no_upstream.then_some(false),
    };

    if !changes.is_empty() {
        if args.project {
            changes.save_to_project(&repo_path)?;
            ui::print_success("Project configuration saved to the repository's git config.");
        } else {
            changes.save_global()?;
            ui::print_success("Configuration saved to the global git config.");
        }
    }

    print_config(&Config::load(Some(repo_path.as_path()))?);
    Ok(())
}

fn print_config(config: &Config) {
    println!("{}", "Current configuration:".bright_magenta().bold());
    println!("  {} {}", "remote:".cyan(), config.remote);
    println!(
        "  {} {}",
        "branch:".cyan(),
        config.branch.as_deref().unwrap_or("(current branch)")
    );
    println!("  {} {}", "default message:".cyan(), config.default_message);
    println!("  {} {}", "set upstream:".cyan(), config.set_upstream);
    println!("  {} {}", "run hooks:".cyan(), config.verify);
}
