use std::fmt;
use std::path::Path;
use std::process::Stdio;

use cause::Cause;
use cause::cause;
use log::debug;
use tokio::process::Command;

use super::ErrorType;
use super::ErrorType::{GitPushCommand, GitPushCommandExitStatus};

/// Where a push goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTarget {
    pub remote: String,
    pub branch: String,
    /// Pass `-u` so the branch tracks the remote afterwards
    pub set_upstream: bool,
}

impl PushTarget {
    pub fn new(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            branch: branch.into(),
            set_upstream: true,
        }
    }

    #[must_use]
    pub fn with_upstream(mut self, set_upstream: bool) -> Self {
        self.set_upstream = set_upstream;
        self
    }

    /// Arguments handed to `git` after `-C <path>`
    pub fn args(&self) -> Vec<&str> {
        let mut args = vec!["push"];
        if self.set_upstream {
            args.push("-u");
        }
        args.push(&self.remote);
        args.push(&self.branch);
        args
    }
}

impl fmt::Display for PushTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args().join(" "))
    }
}

/// What `git push` reported on success.
#[derive(Debug, Clone)]
pub struct PushReport {
    pub remote: String,
    pub branch: String,
    /// git writes its progress and ref summary to stderr
    pub output: String,
}

/// Runs `git push` for `target` inside `repo_path`.
///
/// Only the exit status decides success. On failure the captured stderr is
/// carried in the error.
pub async fn push(repo_path: &Path, target: &PushTarget) -> Result<PushReport, Cause<ErrorType>> {
    debug!("Running `{target}` in {}", repo_path.display());

    let out = Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .args(target.args())
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| cause!(GitPushCommand).src(e))?;

    let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();

    if out.status.success() {
        debug!("git push succeeded: {stderr}");
        Ok(PushReport {
            remote: target.remote.clone(),
            branch: target.branch.clone(),
            output: stderr,
        })
    } else {
        let error = if stderr.is_empty() {
            format!("git push exited with status {:?}", out.status.code())
        } else {
            stderr
        };
        Err(cause!(GitPushCommandExitStatus, error))
    }
}
