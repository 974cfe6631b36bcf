//! Staging and committing
//!
//! `stage_all` mirrors `git add -A`; `commit` records the index on top of HEAD.

use anyhow::{Context, Result, bail};
use git2::{Commit, DiffOptions, ErrorCode, IndexAddOption, Repository};
use log::debug;

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub branch: String,
    pub commit_hash: String,
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

/// Stages new, modified and deleted files across the whole working tree.
pub fn stage_all(repo: &Repository) -> Result<()> {
    let mut index = repo.index().context("Failed to read the index")?;
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .context("Failed to stage working tree files")?;
    // add_all does not pick up deletions of tracked files
    index
        .update_all(["*"].iter(), None)
        .context("Failed to stage removed files")?;
    index.write().context("Failed to write the index")?;
    debug!("Staged all changes ({} index entries)", index.len());
    Ok(())
}

/// Commits the current index with `message`.
///
/// Fails when the message is blank or when the index matches HEAD.
pub fn commit(repo: &Repository, message: &str) -> Result<CommitResult> {
    let message = message.trim();
    if message.is_empty() {
        bail!("Commit message cannot be empty");
    }

    let signature = repo
        .signature()
        .context("No commit identity configured. Set user.name and user.email in git config.")?;

    let mut index = repo.index()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(e) if e.code() == ErrorCode::UnbornBranch => None,
        Err(e) => return Err(e.into()),
    };

    let parent_tree = match &parent {
        Some(parent) => Some(parent.tree()?),
        None => None,
    };

    let unchanged = match &parent_tree {
        Some(parent_tree) => parent_tree.id() == tree_id,
        None => tree.is_empty(),
    };
    if unchanged {
        bail!("Nothing to commit: the index matches HEAD");
    }

    let mut diff_opts = DiffOptions::new();
    let stats = repo
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts))?
        .stats()?;

    let parents: Vec<&Commit<'_>> = parent.iter().collect();
    let oid = repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )?;
    let commit = repo.find_commit(oid)?;

    let head = repo.head()?;
    let branch = head.shorthand().unwrap_or("HEAD").to_string();
    let commit_hash = short_id(&commit)?;

    debug!(
        "Created commit {commit_hash} on {branch} ({} files changed)",
        stats.files_changed()
    );
    Ok(CommitResult {
        branch,
        commit_hash,
        files_changed: stats.files_changed(),
        insertions: stats.insertions(),
        deletions: stats.deletions(),
    })
}

/// Abbreviated object id of `commit`
pub fn short_id(commit: &Commit<'_>) -> Result<String> {
    let buf = commit.as_object().short_id()?;
    Ok(buf.as_str().unwrap_or_default().to_string())
}
