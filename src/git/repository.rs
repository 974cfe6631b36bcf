use crate::git::commit::{self, CommitResult};
use crate::git::hooks;
use crate::git::status::{self, PendingChange};

use anyhow::{Context as AnyhowContext, Result, anyhow};
use git2::{ErrorCode, Repository};
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

/// A configured remote: its name and the URL it fetches from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub name: String,
    pub url: Option<String>,
}

/// Represents a local Git working tree and provides methods for interacting with it.
#[derive(Debug, Clone)]
pub struct GitRepo {
    repo_path: PathBuf,
}

impl GitRepo {
    /// Creates a new `GitRepo` instance from the root of a working tree.
    ///
    /// # Arguments
    ///
    /// * `repo_path` - The path to the Git repository.
    ///
    /// # Returns
    ///
    /// A Result containing the `GitRepo` instance or an error.
    pub fn new(repo_path: &Path) -> Result<Self> {
        Repository::open(repo_path).with_context(|| {
            format!("Failed to open git repository at {}", repo_path.display())
        })?;
        Ok(Self {
            repo_path: repo_path.to_path_buf(),
        })
    }

    /// Finds the repository containing `start`, walking up parent directories.
    pub fn discover(start: &Path) -> Result<Self> {
        let repo = Repository::discover(start).map_err(|_| {
            anyhow!(
                "Not in a Git repository. Please run this command from within a Git repository."
            )
        })?;
        let workdir = repo
            .workdir()
            .context("Repository has no working directory")?;
        debug!("Discovered repository at {}", workdir.display());
        Ok(Self {
            repo_path: workdir.to_path_buf(),
        })
    }

    /// Opens the repository at `path`, or the one around the current directory.
    pub fn from_option(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::discover(path),
            None => Self::discover(&env::current_dir()?),
        }
    }

    /// Open the repository at the stored path
    pub fn open_repo(&self) -> Result<Repository, git2::Error> {
        Repository::open(&self.repo_path)
    }

    /// Returns the repository path
    pub fn repo_path(&self) -> &PathBuf {
        &self.repo_path
    }

    /// Retrieves the current branch name.
    ///
    /// A freshly initialised repository has an unborn HEAD; the branch it
    /// points at is still reported, falling back to `main`. A detached HEAD
    /// is an error since there is no branch to push.
    pub fn get_current_branch(&self) -> Result<String> {
        self.head_branch()?.ok_or_else(|| {
            anyhow!("HEAD is detached; check out a branch or pass --branch to choose one")
        })
    }

    /// Branch HEAD points at, or `None` when HEAD is detached.
    pub fn head_branch(&self) -> Result<Option<String>> {
        let repo = self.open_repo()?;
        match repo.head() {
            Ok(head) if head.is_branch() => {
                let branch_name = head.shorthand().map(str::to_string);
                debug!("Current branch: {branch_name:?}");
                Ok(branch_name)
            }
            Ok(_) => {
                debug!("HEAD is detached");
                Ok(None)
            }
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let unborn = repo
                    .find_reference("HEAD")
                    .ok()
                    .and_then(|r| r.symbolic_target().map(str::to_string))
                    .and_then(|target| target.strip_prefix("refs/heads/").map(str::to_string));
                let branch_name = unborn.unwrap_or_else(|| "main".to_string());
                debug!("Unborn HEAD, using branch '{branch_name}'");
                Ok(Some(branch_name))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Lists every configured remote.
    pub fn remotes(&self) -> Result<Vec<RemoteInfo>> {
        let repo = self.open_repo()?;
        let names = repo.remotes()?;
        let mut remotes = Vec::with_capacity(names.len());
        for name in names.iter().flatten() {
            let remote = repo.find_remote(name)?;
            remotes.push(RemoteInfo {
                name: name.to_string(),
                url: remote.url().map(str::to_string),
            });
        }
        Ok(remotes)
    }

    /// Looks up a remote by name.
    pub fn find_remote(&self, name: &str) -> Result<Option<RemoteInfo>> {
        let repo = self.open_repo()?;
        match repo.find_remote(name) {
            Ok(remote) => Ok(Some(RemoteInfo {
                name: name.to_string(),
                url: remote.url().map(str::to_string),
            })),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a remote with this name is configured
    pub fn has_remote(&self, name: &str) -> Result<bool> {
        Ok(self.find_remote(name)?.is_some())
    }

    /// Configures a new remote.
    pub fn add_remote(&self, name: &str, url: &str) -> Result<RemoteInfo> {
        let repo = self.open_repo()?;
        repo.remote(name, url)
            .with_context(|| format!("Failed to add remote '{name}' ({url})"))?;
        debug!("Added remote {name} -> {url}");
        Ok(RemoteInfo {
            name: name.to_string(),
            url: Some(url.to_string()),
        })
    }

    /// Lists changes in the index and working tree, untracked files included.
    pub fn pending_changes(&self) -> Result<Vec<PendingChange>> {
        let repo = self.open_repo()?;
        status::pending_changes(&repo)
    }

    /// Equivalent of a non-empty `git status --porcelain`.
    pub fn has_pending_changes(&self) -> Result<bool> {
        Ok(!self.pending_changes()?.is_empty())
    }

    /// Stages every change in the working tree (`git add -A`).
    pub fn stage_all(&self) -> Result<()> {
        let repo = self.open_repo()?;
        commit::stage_all(&repo)
    }

    /// Executes a Git hook.
    pub fn execute_hook(&self, hook_name: &str) -> Result<()> {
        let repo = self.open_repo()?;
        hooks::execute_hook(&repo, hook_name)
    }

    /// Commits the index, optionally wrapped in the pre/post-commit hooks.
    ///
    /// A failing `pre-commit` hook aborts the commit; a failing `post-commit`
    /// hook is only logged.
    pub fn commit_and_verify(&self, message: &str, verify: bool) -> Result<CommitResult> {
        if verify {
            self.execute_hook("pre-commit")?;
        }

        let repo = self.open_repo()?;
        let result = commit::commit(&repo, message)?;

        if verify && let Err(e) = self.execute_hook("post-commit") {
            debug!("Post-commit hook failed: {e}");
        }
        Ok(result)
    }

    /// Short hash of the current HEAD commit, if any.
    pub fn head_short_id(&self) -> Result<Option<String>> {
        let repo = self.open_repo()?;
        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let commit = head.peel_to_commit()?;
        Ok(Some(commit::short_id(&commit)?))
    }
}
