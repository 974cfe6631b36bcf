use anyhow::Result;
use assert_cmd::prelude::{CommandCargoExt, OutputAssertExt};
use predicates::prelude::predicate;
use std::process::Command;
use tempfile::TempDir;

use test_utils::{branch_tip, head_commit, setup_bare_remote, setup_git_repo_with_commits, write_file};

/// Binary invocation isolated from the developer's own git config.
fn command(bin: &str, home: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin(bin)?;
    cmd.env("NO_COLOR", "1")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env_remove("GITSHIP_REMOTE")
        .env_remove("GITSHIP_BRANCH")
        .env_remove("GITSHIP_DEFAULT_MESSAGE")
        .env_remove("GITSHIP_SET_UPSTREAM")
        .env_remove("GITSHIP_VERIFY");
    Ok(cmd)
}

#[test]
fn test_git_deploy_without_remote_prints_instructions() -> Result<()> {
    let home = TempDir::new()?;
    let (temp_dir, _git_repo) = setup_git_repo_with_commits()?;

    command("git-deploy", &home)?
        .current_dir(temp_dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("git remote add origin"))
        .stdout(predicate::str::contains("git push -u origin main"));
    Ok(())
}

#[test]
fn test_git_deploy_pushes_to_bare_remote() -> Result<()> {
    let home = TempDir::new()?;
    let (temp_dir, _git_repo) = setup_git_repo_with_commits()?;
    let bare = setup_bare_remote(temp_dir.path(), "origin")?;

    command("git-deploy", &home)?
        .arg("--repo")
        .arg(temp_dir.path())
        .assert()
        .success();

    let (head, _) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(branch_tip(bare.path(), "main"), Some(head));
    Ok(())
}

#[test]
fn test_git_sync_clean_tree_succeeds() -> Result<()> {
    let home = TempDir::new()?;
    let (temp_dir, _git_repo) = setup_git_repo_with_commits()?;

    command("git-sync", &home)?
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to sync"));
    Ok(())
}

#[test]
fn test_git_sync_with_message_commits_and_pushes() -> Result<()> {
    let home = TempDir::new()?;
    let (temp_dir, _git_repo) = setup_git_repo_with_commits()?;
    let bare = setup_bare_remote(temp_dir.path(), "origin")?;
    write_file(temp_dir.path(), "notes.md", "shipped\n")?;

    command("git-sync", &home)?
        .current_dir(temp_dir.path())
        .args(["-m", "Ship notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sync succeeded"));

    let (head, message) = head_commit(temp_dir.path()).expect("HEAD should exist");
    assert_eq!(message.trim(), "Ship notes");
    assert_eq!(branch_tip(bare.path(), "main"), Some(head));
    Ok(())
}

#[test]
fn test_gitship_status_reports_branch() -> Result<()> {
    let home = TempDir::new()?;
    let (temp_dir, _git_repo) = setup_git_repo_with_commits()?;
    write_file(temp_dir.path(), "draft.txt", "wip\n")?;

    command("gitship", &home)?
        .current_dir(temp_dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("main"))
        .stdout(predicate::str::contains("draft.txt"));
    Ok(())
}

#[test]
fn test_outside_repository_fails() -> Result<()> {
    let home = TempDir::new()?;
    let outside = TempDir::new()?;

    command("git-deploy", &home)?
        .current_dir(outside.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not in a Git repository"));
    Ok(())
}

#[test]
fn test_gitship_config_project_roundtrip() -> Result<()> {
    let home = TempDir::new()?;
    let (temp_dir, _git_repo) = setup_git_repo_with_commits()?;

    command("gitship", &home)?
        .current_dir(temp_dir.path())
        .args(["config", "--project", "--remote", "production"])
        .assert()
        .success();

    let repo = git2::Repository::open(temp_dir.path())?;
    assert_eq!(repo.config()?.get_string("gitship.remote")?, "production");

    command("git-deploy", &home)?
        .current_dir(temp_dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("git remote add production"));
    Ok(())
}

#[test]
fn test_global_config_save_keeps_project_values_local() -> Result<()> {
    let home = TempDir::new()?;
    let (temp_dir, _git_repo) = setup_git_repo_with_commits()?;

    command("gitship", &home)?
        .current_dir(temp_dir.path())
        .args(["config", "--project", "--remote", "production"])
        .assert()
        .success();

    command("gitship", &home)?
        .current_dir(temp_dir.path())
        .args(["config", "--default-message", "wip"])
        .assert()
        .success();

    let global = git2::Config::open(&home.path().join(".gitconfig"))?;
    assert_eq!(global.get_string("gitship.defaultmessage")?, "wip");
    assert!(global.get_string("gitship.remote").is_err());
    assert!(global.get_string("gitship.setupstream").is_err());
    assert!(global.get_string("gitship.verify").is_err());
    Ok(())
}
