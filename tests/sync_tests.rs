use anyhow::Result;
use gitship::{Config, FixedMessage, SyncOptions, SyncOutcome, sync};
use std::fs;

use test_utils::{
    branch_tip, head_commit, setup_bare_remote, setup_git_repo, setup_git_repo_with_commits,
    write_file,
};

fn prompt(message: &str) -> FixedMessage {
    FixedMessage(message.to_string())
}

#[tokio::test]
async fn test_sync_clean_tree_does_not_commit() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let _bare = setup_bare_remote(temp_dir.path(), "origin")?;
    let before = head_commit(temp_dir.path());

    let outcome = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("should never be used"),
    )
    .await?;

    assert_eq!(outcome, SyncOutcome::Clean);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(head_commit(temp_dir.path()), before);
    Ok(())
}

#[tokio::test]
async fn test_sync_commits_and_pushes_all_changes() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let bare = setup_bare_remote(temp_dir.path(), "origin")?;

    write_file(temp_dir.path(), "README.md", "# Updated\n")?;
    write_file(temp_dir.path(), "docs/guide.md", "Guide\n")?;
    fs::remove_file(temp_dir.path().join("src/lib.rs"))?;

    let outcome = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("Update docs and drop lib"),
    )
    .await?;

    let commit = match &outcome {
        SyncOutcome::Pushed {
            commit,
            remote,
            branch,
        } => {
            assert_eq!(remote, "origin");
            assert_eq!(branch, "main");
            commit.clone()
        }
        other => panic!("expected a pushed sync, got {other:?}"),
    };
    assert_eq!(commit.files_changed, 3);
    assert_eq!(commit.branch, "main");

    let (head, message) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(message.trim(), "Update docs and drop lib");
    assert!(head.to_string().starts_with(&commit.commit_hash));
    assert_eq!(branch_tip(bare.path(), "main"), Some(head));
    assert!(!git_repo.has_pending_changes()?);
    Ok(())
}

#[tokio::test]
async fn test_sync_message_option_skips_prompt() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let _bare = setup_bare_remote(temp_dir.path(), "origin")?;
    write_file(temp_dir.path(), "CHANGELOG.md", "- entry\n")?;

    let options = SyncOptions {
        message: Some("From the flag".to_string()),
        dry_run: false,
    };
    let outcome = sync(&git_repo, &Config::default(), &options, &prompt("From the prompt")).await?;

    assert!(outcome.is_success());
    let (_, message) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(message.trim(), "From the flag");
    Ok(())
}

#[tokio::test]
async fn test_sync_empty_message_uses_default() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let _bare = setup_bare_remote(temp_dir.path(), "origin")?;
    write_file(temp_dir.path(), "data.txt", "1\n")?;
    let config = Config {
        default_message: "Automatic sync".to_string(),
        ..Config::default()
    };

    let outcome = sync(&git_repo, &config, &SyncOptions::default(), &prompt("  ")).await?;

    assert!(outcome.is_success());
    let (_, message) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(message.trim(), "Automatic sync");
    Ok(())
}

#[tokio::test]
async fn test_sync_without_remote_keeps_local_commit() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    write_file(temp_dir.path(), "new.txt", "content\n")?;

    let outcome = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("Local only"),
    )
    .await?;

    assert!(matches!(outcome, SyncOutcome::MissingRemote { ref remote, .. } if remote == "origin"));
    assert_eq!(outcome.exit_code(), 1);
    let (_, message) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(message.trim(), "Local only");
    assert!(!git_repo.has_pending_changes()?);
    Ok(())
}

#[tokio::test]
async fn test_sync_push_failure_is_reported() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let missing = temp_dir.path().join("gone.git");
    git_repo.add_remote("origin", missing.to_str().expect("utf-8 path"))?;
    write_file(temp_dir.path(), "new.txt", "content\n")?;

    let outcome = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("Will not reach the remote"),
    )
    .await?;

    assert!(matches!(outcome, SyncOutcome::PushFailed { .. }));
    assert_eq!(outcome.exit_code(), 1);
    assert!(outcome.commit().is_some());
    Ok(())
}

#[tokio::test]
async fn test_sync_dry_run_changes_nothing() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let bare = setup_bare_remote(temp_dir.path(), "origin")?;
    write_file(temp_dir.path(), "a.txt", "a\n")?;
    write_file(temp_dir.path(), "b.txt", "b\n")?;
    let before = head_commit(temp_dir.path());

    let options = SyncOptions {
        message: None,
        dry_run: true,
    };
    let outcome = sync(&git_repo, &Config::default(), &options, &prompt("unused")).await?;

    assert_eq!(outcome, SyncOutcome::DryRun { pending: 2 });
    assert_eq!(head_commit(temp_dir.path()), before);
    assert_eq!(git_repo.pending_changes()?.len(), 2);
    assert_eq!(branch_tip(bare.path(), "main"), None);
    Ok(())
}

#[tokio::test]
async fn test_sync_first_commit_in_fresh_repository() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    let bare = setup_bare_remote(temp_dir.path(), "origin")?;
    write_file(temp_dir.path(), "main.py", "print('hello')\n")?;

    let outcome = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("Initial commit"),
    )
    .await?;

    assert!(outcome.is_success());
    let (head, _) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(branch_tip(bare.path(), "main"), Some(head));
    Ok(())
}

#[tokio::test]
async fn test_sync_respects_gitignore() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    write_file(temp_dir.path(), ".gitignore", ".env\n")?;
    test_utils::commit_all(temp_dir.path(), "Ignore env files")?;
    write_file(temp_dir.path(), ".env", "SECRET=1\n")?;

    let outcome = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("unused"),
    )
    .await?;

    assert_eq!(outcome, SyncOutcome::Clean);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_sync_failing_pre_commit_hook_aborts() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let bare = setup_bare_remote(temp_dir.path(), "origin")?;
    test_utils::install_hook(temp_dir.path(), "pre-commit", "#!/bin/sh\nexit 1\n")?;
    write_file(temp_dir.path(), "blocked.txt", "x\n")?;
    let before = head_commit(temp_dir.path());

    let result = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("Blocked by hook"),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(head_commit(temp_dir.path()), before);
    assert_eq!(branch_tip(bare.path(), "main"), None);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_sync_no_verify_skips_hooks() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let _bare = setup_bare_remote(temp_dir.path(), "origin")?;
    test_utils::install_hook(temp_dir.path(), "pre-commit", "#!/bin/sh\nexit 1\n")?;
    write_file(temp_dir.path(), "allowed.txt", "x\n")?;
    let config = Config {
        verify: false,
        ..Config::default()
    };

    let outcome = sync(&git_repo, &config, &SyncOptions::default(), &prompt("Skip hooks")).await?;

    assert!(outcome.is_success());
    let (_, message) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(message.trim(), "Skip hooks");
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_sync_runs_post_commit_hook() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let _bare = setup_bare_remote(temp_dir.path(), "origin")?;
    let marker = temp_dir.path().join(".git").join("post-commit-ran");
    let script = format!("#!/bin/sh\ntouch '{}'\n", marker.display());
    test_utils::install_hook(temp_dir.path(), "post-commit", &script)?;
    write_file(temp_dir.path(), "hooked.txt", "x\n")?;

    let outcome = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("With hooks"),
    )
    .await?;

    assert!(outcome.is_success());
    assert!(marker.exists());
    Ok(())
}

#[tokio::test]
async fn test_sync_pushes_checked_out_branch_over_configured_one() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let bare = setup_bare_remote(temp_dir.path(), "origin")?;
    test_utils::create_branch(temp_dir.path(), "release")?;
    write_file(temp_dir.path(), "work.txt", "new work\n")?;
    let config = Config {
        branch: Some("release".to_string()),
        ..Config::default()
    };

    let outcome = sync(&git_repo, &config, &SyncOptions::default(), &prompt("New work")).await?;

    match &outcome {
        SyncOutcome::Pushed { commit, branch, .. } => {
            assert_eq!(branch, "main");
            assert_eq!(commit.branch, "main");
        }
        other => panic!("expected a pushed sync, got {other:?}"),
    }
    let (head, _) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(branch_tip(bare.path(), "main"), Some(head));
    assert_eq!(branch_tip(bare.path(), "release"), None);
    Ok(())
}

#[tokio::test]
async fn test_sync_detached_head_is_rejected_before_commit() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let bare = setup_bare_remote(temp_dir.path(), "origin")?;
    let detached = test_utils::detach_head(temp_dir.path())?;
    write_file(temp_dir.path(), "work.txt", "new work\n")?;

    let result = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("Nowhere to go"),
    )
    .await;

    let err = result.expect_err("detached HEAD should be rejected");
    assert!(err.to_string().contains("detached"));
    assert_eq!(head_commit(temp_dir.path()).map(|(id, _)| id), Some(detached));
    assert_eq!(branch_tip(bare.path(), "main"), None);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_sync_skips_non_executable_hook() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo_with_commits()?;
    let bare = setup_bare_remote(temp_dir.path(), "origin")?;
    test_utils::install_hook_with_mode(temp_dir.path(), "pre-commit", "#!/bin/sh\nexit 1\n", 0o644)?;
    write_file(temp_dir.path(), "plain.txt", "x\n")?;

    let outcome = sync(
        &git_repo,
        &Config::default(),
        &SyncOptions::default(),
        &prompt("Hook is not executable"),
    )
    .await?;

    assert!(outcome.is_success());
    let (head, message) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(message.trim(), "Hook is not executable");
    assert_eq!(branch_tip(bare.path(), "main"), Some(head));
    Ok(())
}
