use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Clone, Debug, Default)]
pub struct CommonParams {
    /// Override the remote to push to
    #[arg(long, help = "Remote to push to (default: origin)")]
    pub remote: Option<String>,

    /// Override the branch to push
    #[arg(short, long, help = "Branch to push (default: current branch)")]
    pub branch: Option<String>,

    /// Do not pass `-u` to git push
    #[arg(long, help = "Do not set the upstream branch when pushing")]
    pub no_upstream: bool,

    /// Repository to operate on
    #[arg(
        short = 'C',
        long = "repo",
        help = "Path inside the repository to operate on (default: current directory)"
    )]
    pub repo_path: Option<PathBuf>,
}

impl CommonParams {
    /// Apply command line overrides; returns whether anything changed.
    pub fn apply_to_config(&self, config: &mut Config) -> bool {
        let mut changes_made = false;

        if let Some(remote) = &self.remote
            && config.remote != *remote
        {
            config.remote.clone_from(remote);
            changes_made = true;
        }

        if let Some(branch) = &self.branch
            && config.branch.as_ref() != Some(branch)
        {
            config.branch = Some(branch.clone());
            changes_made = true;
        }

        if self.no_upstream && config.set_upstream {
            config.set_upstream = false;
            changes_made = true;
        }

        changes_made
    }
}
