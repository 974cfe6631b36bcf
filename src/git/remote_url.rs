use anyhow::{Result, anyhow, bail};
use regex::Regex;
use std::path::Path;
use url::Url;

const URL_SCHEMES: &[&str] = &["http", "https", "ssh", "git", "file"];

/// Checks that `url` is something `git remote add` can use.
///
/// Accepts scheme URLs (`https://`, `ssh://`, `git://`, `file://`), scp-like
/// `user@host:path` addresses, and paths to existing local repositories.
pub fn validate_remote_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        bail!("Remote URL cannot be empty");
    }
    if url.chars().any(char::is_whitespace) {
        bail!("Remote URL must not contain whitespace: {url}");
    }

    if let Ok(parsed) = Url::parse(url) {
        let scheme = parsed.scheme();
        if !URL_SCHEMES.contains(&scheme) {
            bail!("Unsupported remote URL scheme '{scheme}' in {url}");
        }
        if scheme != "file" && parsed.host_str().is_none_or(str::is_empty) {
            bail!("Remote URL has no host: {url}");
        }
        return Ok(());
    }

    let scp_like = Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+:[^/\s].*$")?;
    if scp_like.is_match(url) {
        return Ok(());
    }

    if Path::new(url).exists() {
        return Ok(());
    }

    Err(anyhow!(
        "Invalid remote URL: {url}. Use https://host/owner/repo.git, git@host:owner/repo.git or a local path."
    ))
}
