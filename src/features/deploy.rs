//! Push the current branch to the configured remote.

use super::{resolve_branch, setup_instructions};
use crate::config::Config;
use crate::git::{self, GitRepo, PushTarget, validate_remote_url};
use crate::spinner::SpinnerState;
use crate::ui;

use anyhow::Result;
use log::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    /// Add the remote with this URL when it does not exist yet
    pub url: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Pushed { remote: String, branch: String },
    MissingRemote { remote: String },
    PushFailed {
        remote: String,
        branch: String,
        reason: String,
    },
    DryRun { target: PushTarget },
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Pushed { .. } | Self::DryRun { .. })
    }

    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_success())
    }
}

/// Deploys the repository: check the remote, then push.
///
/// A missing remote or a rejected push is reported through the outcome; only
/// unexpected failures (unreadable repository, invalid `--url`) are errors.
pub async fn deploy(
    repo: &GitRepo,
    config: &Config,
    options: &DeployOptions,
) -> Result<DeployOutcome> {
    debug!("Deploy with config {config:?} and options {options:?}");
    let remote_name = config.remote.clone();
    let branch = resolve_branch(repo, config)?;

    let remote_url = match repo.find_remote(&remote_name)? {
        Some(remote) => remote.url,
        None => match &options.url {
            Some(url) => {
                validate_remote_url(url)?;
                if options.dry_run {
                    ui::print_info(&format!("Dry run: would add remote {remote_name} -> {url}"));
                } else {
                    repo.add_remote(&remote_name, url)?;
                    ui::print_success(&format!("Added remote {remote_name} -> {url}"));
                }
                Some(url.clone())
            }
            None => {
                ui::print_error(&format!("Remote '{remote_name}' is not configured."));
                ui::print_bordered_content(&setup_instructions(&remote_name, &branch));
                return Ok(DeployOutcome::MissingRemote {
                    remote: remote_name,
                });
            }
        },
    };

    let pending = repo.pending_changes()?.len();
    if pending > 0 {
        ui::print_warning(&format!(
            "{pending} uncommitted change(s) will not be deployed. Run git-sync to commit them."
        ));
    }

    let target = PushTarget::new(remote_name.clone(), branch.clone())
        .with_upstream(config.set_upstream);

    if options.dry_run {
        ui::print_info(&format!("Dry run: would run `{target}`"));
        return Ok(DeployOutcome::DryRun { target });
    }

    ui::print_info(&format!(
        "Deploying {branch} to {remote_name} ({})",
        remote_url.as_deref().unwrap_or("no url")
    ));

    let pushed = ui::run_with_spinner(
        SpinnerState::new(),
        git::push(repo.repo_path(), &target),
    )
    .await;

    match pushed {
        Ok(report) => {
            info!(
                "Deployed {} to {}: {}",
                report.branch, report.remote, report.output
            );
            ui::print_success(&format!(
                "Deployment succeeded: {branch} pushed to {remote_name}"
            ));
            Ok(DeployOutcome::Pushed {
                remote: remote_name,
                branch,
            })
        }
        Err(e) => {
            let reason = e.to_string();
            ui::print_error(&format!("Deployment failed: {reason}"));
            Ok(DeployOutcome::PushFailed {
                remote: remote_name,
                branch,
                reason,
            })
        }
    }
}
