//! Commit everything in the working tree and push it.

use super::prompt::MessagePrompt;
use super::{format_commit_result, setup_instructions};
use crate::config::Config;
use crate::git::{self, CommitResult, GitRepo, PushTarget};
use crate::spinner::SpinnerState;
use crate::ui;

use anyhow::Result;
use chrono::Local;
use log::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Use this message instead of prompting
    pub message: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing to commit; no commit was made
    Clean,
    Pushed {
        commit: CommitResult,
        remote: String,
        branch: String,
    },
    PushFailed {
        commit: CommitResult,
        reason: String,
    },
    /// Committed locally but there is nowhere to push
    MissingRemote {
        commit: CommitResult,
        remote: String,
    },
    DryRun {
        pending: usize,
    },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Clean | Self::Pushed { .. } | Self::DryRun { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_success())
    }

    /// The commit created by this run, if any
    pub fn commit(&self) -> Option<&CommitResult> {
        match self {
            Self::Pushed { commit, .. }
            | Self::PushFailed { commit, .. }
            | Self::MissingRemote { commit, .. } => Some(commit),
            Self::Clean | Self::DryRun { .. } => None,
        }
    }
}

/// Picks the commit message: `--message`, else the prompt; blank answers
/// fall back to the configured default.
pub fn resolve_message(
    config: &Config,
    options: &SyncOptions,
    prompt: &dyn MessagePrompt,
) -> Result<String> {
    let raw = match &options.message {
        Some(message) => message.clone(),
        None => prompt.ask()?,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        let message = config.render_default_message(Local::now());
        debug!("Empty commit message, using default: {message}");
        Ok(message)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Stages, commits and pushes every pending change.
pub async fn sync(
    repo: &GitRepo,
    config: &Config,
    options: &SyncOptions,
    prompt: &dyn MessagePrompt,
) -> Result<SyncOutcome> {
    debug!("Sync with config {config:?} and options {options:?}");

    let changes = repo.pending_changes()?;
    if changes.is_empty() {
        ui::print_success("Working tree clean, nothing to sync.");
        return Ok(SyncOutcome::Clean);
    }

    ui::print_info(&format!("{} pending change(s):", changes.len()));
    for change in &changes {
        ui::print_message(&format!("  {}{}", change.kind.marker(), change.path));
    }

    // The commit lands on the checked-out branch, so that is what gets pushed
    let branch = repo.get_current_branch()?;
    if let Some(configured) = &config.branch
        && *configured != branch
    {
        ui::print_warning(&format!(
            "Ignoring configured branch '{configured}': sync pushes the checked-out branch '{branch}'."
        ));
    }

    if options.dry_run {
        ui::print_info("Dry run: nothing staged, committed or pushed.");
        return Ok(SyncOutcome::DryRun {
            pending: changes.len(),
        });
    }

    repo.stage_all()?;

    let message = resolve_message(config, options, prompt)?;
    let commit = repo.commit_and_verify(&message, config.verify)?;
    ui::print_success(&format_commit_result(&commit, &message));

    let remote_name = config.remote.clone();

    if !repo.has_remote(&remote_name)? {
        ui::print_error(&format!(
            "Committed {} locally, but remote '{remote_name}' is not configured.",
            commit.commit_hash
        ));
        ui::print_bordered_content(&setup_instructions(&remote_name, &branch));
        return Ok(SyncOutcome::MissingRemote {
            commit,
            remote: remote_name,
        });
    }

    let target = PushTarget::new(remote_name.clone(), branch.clone())
        .with_upstream(config.set_upstream);
    ui::print_info(&format!("Pushing {branch} to {remote_name}"));

    let pushed = ui::run_with_spinner(
        SpinnerState::new(),
        git::push(repo.repo_path(), &target),
    )
    .await;

    match pushed {
        Ok(report) => {
            info!(
                "Synced {} to {}: {}",
                report.branch, report.remote, report.output
            );
            ui::print_success(&format!("Sync succeeded: {branch} pushed to {remote_name}"));
            Ok(SyncOutcome::Pushed {
                commit,
                remote: remote_name,
                branch,
            })
        }
        Err(e) => {
            let reason = e.to_string();
            ui::print_error(&format!(
                "Push failed, commit {} stays local: {reason}",
                commit.commit_hash
            ));
            Ok(SyncOutcome::PushFailed { commit, reason })
        }
    }
}
