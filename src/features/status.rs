use crate::config::Config;
use crate::git::{GitRepo, PendingChange, RemoteInfo};
use crate::ui;

use anyhow::Result;
use colored::Colorize;

/// Snapshot of what deploy and sync would work with.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub branch: String,
    pub head: Option<String>,
    pub remote_name: String,
    pub remote: Option<RemoteInfo>,
    pub changes: Vec<PendingChange>,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }
}

pub fn status(repo: &GitRepo, config: &Config) -> Result<StatusReport> {
    Ok(StatusReport {
        branch: match &config.branch {
            Some(branch) => branch.clone(),
            None => repo
                .head_branch()?
                .unwrap_or_else(|| "(detached HEAD)".to_string()),
        },
        head: repo.head_short_id()?,
        remote_name: config.remote.clone(),
        remote: repo.find_remote(&config.remote)?,
        changes: repo.pending_changes()?,
    })
}

pub fn print_status(report: &StatusReport) {
    ui::print_message(&format!(
        "{} {} ({})",
        "Branch:".bold(),
        report.branch.green(),
        report.head.as_deref().unwrap_or("no commits yet")
    ));

    match &report.remote {
        Some(remote) => ui::print_message(&format!(
            "{} {} -> {}",
            "Remote:".bold(),
            remote.name.cyan(),
            remote.url.as_deref().unwrap_or("(no url)")
        )),
        None => ui::print_warning(&format!(
            "Remote: '{}' is not configured",
            report.remote_name
        )),
    }

    if report.is_clean() {
        ui::print_success("Working tree clean");
    } else {
        ui::print_message(&format!(
            "{} {}",
            "Pending changes:".bold(),
            report.changes.len()
        ));
        for change in &report.changes {
            ui::print_message(&format!(
                "  {}{} ({})",
                change.kind.marker().yellow(),
                change.path,
                change.kind
            ));
        }
    }
}
