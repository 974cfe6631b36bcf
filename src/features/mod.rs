//! Operator workflows: deploy, sync and status

pub mod deploy;
pub mod prompt;
pub mod status;
pub mod sync;

pub use deploy::{DeployOptions, DeployOutcome, deploy};
pub use prompt::{FixedMessage, InteractivePrompt, MessagePrompt};
pub use status::{StatusReport, status};
pub use sync::{SyncOptions, SyncOutcome, sync};

use crate::config::Config;
use crate::git::{CommitResult, GitRepo};

use anyhow::Result;
use std::fmt::Write;

/// Branch to push: the configured one, else the checked-out one
pub fn resolve_branch(repo: &GitRepo, config: &Config) -> Result<String> {
    match &config.branch {
        Some(branch) => Ok(branch.clone()),
        None => repo.get_current_branch(),
    }
}

/// Steps shown when the remote is missing.
pub fn setup_instructions(remote: &str, branch: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "No remote named '{remote}' is configured.");
    let _ = writeln!(out);
    let _ = writeln!(out, "To publish this repository:");
    let _ = writeln!(
        out,
        "  1. Create an empty repository on your git host (GitHub, GitLab, ...)"
    );
    let _ = writeln!(out, "  2. git remote add {remote} <repository-url>");
    let _ = writeln!(out, "  3. git push -u {remote} {branch}");
    let _ = writeln!(out);
    let _ = write!(
        out,
        "Or let git-deploy add it for you: git-deploy --remote {remote} --url <repository-url>"
    );
    out
}

/// `git commit`-style one-line summary of a commit
pub fn format_commit_result(result: &CommitResult, message: &str) -> String {
    let mut output = format!(
        "[{} {}] {}\n",
        result.branch,
        result.commit_hash,
        message.lines().next().unwrap_or("")
    );

    let _ = write!(
        &mut output,
        " {} file{} changed, {} insertion{}(+), {} deletion{}(-)",
        result.files_changed,
        if result.files_changed == 1 { "" } else { "s" },
        result.insertions,
        if result.insertions == 1 { "" } else { "s" },
        result.deletions,
        if result.deletions == 1 { "" } else { "s" }
    );

    output
}
