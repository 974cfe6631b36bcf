//! Git hook execution
//!
//! Runs the repository's own `pre-commit` / `post-commit` hooks around commits
//! made through `git2`, which does not run them by itself.

use anyhow::{Context as AnyhowContext, Result, anyhow};
use git2::Repository;
use log::debug;
use std::io::{self, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

/// Executes a Git hook from the given repository.
///
/// A missing or non-executable hook is skipped, like git does.
///
/// # Arguments
///
/// * `repo` - Reference to an open git2 Repository
/// * `hook_name` - The name of the hook to execute (e.g., "pre-commit", "post-commit")
pub fn execute_hook(repo: &Repository, hook_name: &str) -> Result<()> {
    let hook_path = repo.path().join("hooks").join(hook_name);

    if !hook_path.is_file() {
        debug!("Hook '{hook_name}' not found at {}", hook_path.display());
        return Ok(());
    }
    if !is_executable(&hook_path) {
        debug!(
            "Hook '{hook_name}' at {} is not executable, skipping",
            hook_path.display()
        );
        return Ok(());
    }
    execute_hook_file(&hook_path, repo, hook_name)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

fn execute_hook_file(hook_path: &Path, repo: &Repository, hook_name: &str) -> Result<()> {
    debug!("Executing hook: {hook_name} ({})", hook_path.display());

    let repo_workdir = repo
        .workdir()
        .context("Repository has no working directory")?;

    let mut command = Command::new(hook_path);
    command
        .current_dir(repo_workdir)
        .env("GIT_DIR", repo.path())
        .env("GIT_WORK_TREE", repo_workdir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to start hook '{hook_name}'"))?;

    let stdout = child.stdout.take().context("Could not get stdout")?;
    let stderr = child.stderr.take().context("Could not get stderr")?;

    let out_pump = thread::spawn(move || {
        let _ = io::copy(&mut BufReader::new(stdout), &mut io::stdout());
    });
    let err_pump = thread::spawn(move || {
        let _ = io::copy(&mut BufReader::new(stderr), &mut io::stderr());
    });

    let status = child.wait()?;
    let _ = out_pump.join();
    let _ = err_pump.join();

    if status.success() {
        debug!("Hook '{hook_name}' executed successfully");
        Ok(())
    } else {
        Err(anyhow!(
            "Hook '{hook_name}' failed with exit code: {:?}",
            status.code()
        ))
    }
}
