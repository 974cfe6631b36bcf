//! Working tree status
//!
//! Collects every pending change (staged, unstaged and untracked) the way
//! `git status --porcelain` reports them. Ignored files never show up.

use anyhow::Result;
use git2::{Repository, Status, StatusOptions};
use log::debug;
use std::fmt;

/// What happened to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    New,
    Modified,
    Deleted,
    Renamed,
    TypeChange,
    Conflicted,
}

impl ChangeKind {
    /// Two-letter porcelain-style marker
    pub fn marker(self) -> &'static str {
        match self {
            Self::New => "A ",
            Self::Modified => "M ",
            Self::Deleted => "D ",
            Self::Renamed => "R ",
            Self::TypeChange => "T ",
            Self::Conflicted => "U ",
        }
    }

    fn from_status(status: Status) -> Option<Self> {
        if status.is_conflicted() {
            Some(Self::Conflicted)
        } else if status.intersects(Status::INDEX_NEW | Status::WT_NEW) {
            Some(Self::New)
        } else if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
            Some(Self::Deleted)
        } else if status.intersects(Status::INDEX_RENAMED | Status::WT_RENAMED) {
            Some(Self::Renamed)
        } else if status.intersects(Status::INDEX_TYPECHANGE | Status::WT_TYPECHANGE) {
            Some(Self::TypeChange)
        } else if status.intersects(Status::INDEX_MODIFIED | Status::WT_MODIFIED) {
            Some(Self::Modified)
        } else {
            None
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::New => "new",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::TypeChange => "typechange",
            Self::Conflicted => "conflicted",
        };
        f.write_str(name)
    }
}

/// A single path with uncommitted changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    pub path: String,
    pub kind: ChangeKind,
}

/// Collects the pending changes of `repo`, sorted by path.
pub fn pending_changes(repo: &Repository) -> Result<Vec<PendingChange>> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .renames_head_to_index(true);

    let statuses = repo.statuses(Some(&mut opts))?;
    let mut changes: Vec<PendingChange> = statuses
        .iter()
        .filter_map(|entry| {
            let kind = ChangeKind::from_status(entry.status())?;
            let path = entry.path()?.to_string();
            Some(PendingChange { path, kind })
        })
        .collect();
    changes.sort_by(|a, b| a.path.cmp(&b.path));

    debug!("Found {} pending changes", changes.len());
    Ok(changes)
}
