use anyhow::{Context, Result};
use git2::{Config as GitConfig, ConfigLevel};
use log::debug;
use std::path::Path;

/// Git config section holding every setting
pub const CONFIG_SECTION: &str = "gitship";

pub const DEFAULT_REMOTE: &str = "origin";

/// `{timestamp}` is replaced with the local time when the message is used.
pub const DEFAULT_MESSAGE: &str = "chore: sync changes ({timestamp})";

/// Get a configuration value with layered priority: env var > local git config > global git config
fn get_layered_value(
    key: &str,
    env_value: Option<String>,
    local_config: Option<&GitConfig>,
    global_config: Option<&GitConfig>,
) -> Option<String> {
    if let Some(val) = env_value {
        return Some(val);
    }

    if let Some(local) = local_config
        && let Ok(val) = local.get_string(key)
    {
        return Some(val);
    }

    if let Some(global) = global_config
        && let Ok(val) = global.get_string(key)
    {
        return Some(val);
    }

    None
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Settings the user asked to change. Only these keys are ever written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigChanges {
    pub remote: Option<String>,
    /// A blank branch removes the key
    pub branch: Option<String>,
    pub default_message: Option<String>,
    pub set_upstream: Option<bool>,
}

impl ConfigChanges {
    pub fn is_empty(&self) -> bool {
        self.remote.is_none()
            && self.branch.is_none()
            && self.default_message.is_none()
            && self.set_upstream.is_none()
    }

    /// Save to the global git config (`~/.gitconfig`)
    pub fn save_global(&self) -> Result<()> {
        let mut config = GitConfig::open_default()?
            .open_level(ConfigLevel::Global)
            .context("Failed to open the global git config")?;
        self.write_to(&mut config)?;
        debug!("Saved to global git config: {self:?}");
        Ok(())
    }

    /// Save to the local git config of the repository containing `repo_path`
    pub fn save_to_project(&self, repo_path: &Path) -> Result<()> {
        let repo = git2::Repository::discover(repo_path)
            .context("Project configuration requires a git repository")?;
        let mut config = repo.config()?.open_level(ConfigLevel::Local)?;
        self.write_to(&mut config)?;
        debug!("Saved to project git config: {self:?}");
        Ok(())
    }

    /// Write the requested keys under the `gitship.` section of a single-level config
    pub fn write_to(&self, config: &mut GitConfig) -> Result<()> {
        if let Some(remote) = &self.remote {
            config.set_str(&format!("{CONFIG_SECTION}.remote"), remote)?;
        }
        if let Some(branch) = &self.branch {
            let key = format!("{CONFIG_SECTION}.branch");
            if branch.trim().is_empty() {
                // Removing a key that was never set is fine
                let _ = config.remove(&key);
            } else {
                config.set_str(&key, branch)?;
            }
        }
        if let Some(message) = &self.default_message {
            config.set_str(&format!("{CONFIG_SECTION}.defaultmessage"), message)?;
        }
        if let Some(set_upstream) = self.set_upstream {
            config.set_bool(&format!("{CONFIG_SECTION}.setupstream"), set_upstream)?;
        }
        Ok(())
    }
}

/// Configuration structure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Remote to push to
    pub remote: String,
    /// Branch to push; the current branch when unset
    pub branch: Option<String>,
    /// Commit message used when the prompt is answered with nothing
    pub default_message: String,
    /// Push with `-u`
    pub set_upstream: bool,
    /// Run pre-commit and post-commit hooks
    pub verify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            branch: None,
            default_message: DEFAULT_MESSAGE.to_string(),
            set_upstream: true,
            verify: true,
        }
    }
}

impl Config {
    /// Load the configuration for the repository at `repo_path` with layered
    /// priority: env > local git > global git > defaults.
    pub fn load(repo_path: Option<&Path>) -> Result<Self> {
        let global_config = GitConfig::open_default().ok();
        let local_config = git2::Repository::discover(repo_path.unwrap_or_else(|| Path::new(".")))
            .ok()
            .and_then(|repo| repo.config().ok());

        let config = Self::load_with(
            |name| std::env::var(name).ok(),
            local_config.as_ref(),
            global_config.as_ref(),
        );
        debug!("Configuration loaded: {config:?}");
        Ok(config)
    }

    /// Resolve the configuration from explicit sources.
    ///
    /// `env` maps an environment variable name to its value.
    pub fn load_with<F>(env: F, local: Option<&GitConfig>, global: Option<&GitConfig>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str, env_var: &str| {
            get_layered_value(
                &format!("{CONFIG_SECTION}.{key}"),
                env(env_var).filter(|v| !v.trim().is_empty()),
                local,
                global,
            )
        };

        let defaults = Self::default();

        let remote = lookup("remote", "GITSHIP_REMOTE").unwrap_or(defaults.remote);
        let branch = lookup("branch", "GITSHIP_BRANCH");
        let default_message =
            lookup("defaultmessage", "GITSHIP_DEFAULT_MESSAGE").unwrap_or(defaults.default_message);
        let set_upstream = lookup("setupstream", "GITSHIP_SET_UPSTREAM")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.set_upstream);
        let verify = lookup("verify", "GITSHIP_VERIFY")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.verify);

        Self {
            remote,
            branch,
            default_message,
            set_upstream,
            verify,
        }
    }

    /// Default commit message with `{timestamp}` filled in
    #[must_use]
    pub fn render_default_message(&self, now: chrono::DateTime<chrono::Local>) -> String {
        self.default_message
            .replace("{timestamp}", &now.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
