use crate::commands;
use crate::common::CommonParams;
use crate::config::Config;
use crate::features::{
    self, DeployOptions, FixedMessage, InteractivePrompt, MessagePrompt, SyncOptions,
};
use crate::git::GitRepo;
use crate::logger::{self, LogDestination};
use crate::ui;

use anyhow::Result;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand, crate_version};
use log::debug;

/// Flags shared by every binary
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, progress messages, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Install the logger and quiet mode
    pub fn apply(&self) -> Result<()> {
        logger::init(&LogDestination::from_flags(
            self.log,
            self.log_file.as_deref(),
        ))?;
        ui::set_quiet_mode(self.quiet);
        Ok(())
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct DeployArgs {
    /// Add the remote with this URL if it is missing
    #[arg(long, help = "Add the remote with this URL if it is not configured yet")]
    pub url: Option<String>,

    /// Show what would be pushed without pushing
    #[arg(short = 'n', long, help = "Show what would be pushed without pushing")]
    pub dry_run: bool,
}

#[derive(Args, Clone, Debug, Default)]
pub struct SyncArgs {
    /// Commit message; prompts when omitted
    #[arg(short, long, help = "Commit message (prompts when omitted)")]
    pub message: Option<String>,

    /// Show pending changes without staging, committing or pushing
    #[arg(
        short = 'n',
        long,
        help = "Show pending changes without staging, committing or pushing"
    )]
    pub dry_run: bool,

    /// Skip the verification step (pre/post commit hooks)
    #[arg(long, help = "Skip verification steps (pre/post commit hooks)")]
    pub no_verify: bool,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub common: CommonParams,

    /// Default commit message used when the prompt is left empty
    #[arg(
        long,
        help = "Default commit message ({timestamp} is replaced with the current time)"
    )]
    pub default_message: Option<String>,

    /// Save to the repository's git config instead of the global one
    #[arg(long, help = "Save to the repository's git config instead of the global one")]
    pub project: bool,
}

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "gitship: deploy and sync a Git working tree to its remote",
    disable_version_flag = true,
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Push the current branch to the configured remote
    #[command(
        about = "Push the current branch to its remote",
        long_about = "Check that the remote is configured and push the current branch. Prints setup instructions and exits with status 1 when the remote is missing."
    )]
    Deploy {
        #[command(flatten)]
        common: CommonParams,

        #[command(flatten)]
        args: DeployArgs,
    },

    /// Stage, commit and push every pending change
    #[command(
        about = "Commit all pending changes and push them",
        long_about = "Stage every change in the working tree, ask for a commit message, commit and push. Exits with status 0 without committing when the tree is clean."
    )]
    Sync {
        #[command(flatten)]
        common: CommonParams,

        #[command(flatten)]
        args: SyncArgs,
    },

    /// Show branch, remote and pending changes
    #[command(about = "Show branch, remote and pending changes")]
    Status {
        #[command(flatten)]
        common: CommonParams,
    },

    /// Show or change the saved settings
    #[command(
        about = "Show or change gitship settings",
        long_about = "Without options, print the effective settings. With options, save them to the global git config, or to the repository's git config with --project."
    )]
    Config {
        #[command(flatten)]
        args: ConfigArgs,
    },
}

/// Define custom styles for Clap
pub fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command.
///
/// Returns the process exit code.
pub async fn main() -> Result<i32> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(0);
    }

    cli.global.apply()?;

    if let Some(command) = cli.command {
        handle_command(command).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["gitship", "--help"]);
        Ok(0)
    }
}

/// Open the repository and load the config with command line overrides applied
pub fn prepare(common: &CommonParams) -> Result<(GitRepo, Config)> {
    let repo = GitRepo::from_option(common.repo_path.as_deref())?;
    let mut config = Config::load(Some(repo.repo_path().as_path()))?;
    common.apply_to_config(&mut config);
    Ok((repo, config))
}

/// Handle the `Deploy` command
pub async fn handle_deploy(common: &CommonParams, args: DeployArgs) -> Result<i32> {
    debug!("Handling 'deploy' command with common: {common:?}, args: {args:?}");
    let (repo, config) = prepare(common)?;

    let options = DeployOptions {
        url: args.url,
        dry_run: args.dry_run,
    };
    let outcome = features::deploy(&repo, &config, &options).await?;
    debug!("Deploy outcome: {outcome:?}");
    Ok(outcome.exit_code())
}

/// Handle the `Sync` command
pub async fn handle_sync(common: &CommonParams, args: SyncArgs) -> Result<i32> {
    debug!("Handling 'sync' command with common: {common:?}, args: {args:?}");
    let (repo, mut config) = prepare(common)?;
    if args.no_verify {
        config.verify = false;
    }

    let prompt: Box<dyn MessagePrompt> = match &args.message {
        Some(message) => Box::new(FixedMessage(message.clone())),
        None => Box::new(InteractivePrompt::with_placeholder(
            config.render_default_message(chrono::Local::now()),
        )),
    };

    let options = SyncOptions {
        message: args.message,
        dry_run: args.dry_run,
    };
    let outcome = features::sync(&repo, &config, &options, prompt.as_ref()).await?;
    debug!("Sync outcome: {outcome:?}");
    Ok(outcome.exit_code())
}

/// Handle the `Status` command
pub fn handle_status(common: &CommonParams) -> Result<i32> {
    debug!("Handling 'status' command with common: {common:?}");
    let (repo, config) = prepare(common)?;
    let report = features::status(&repo, &config)?;
    features::status::print_status(&report);
    Ok(0)
}

/// Handle the command based on parsed arguments
pub async fn handle_command(command: Commands) -> Result<i32> {
    match command {
        Commands::Deploy { common, args } => handle_deploy(&common, args).await,
        Commands::Sync { common, args } => handle_sync(&common, args).await,
        Commands::Status { common } => handle_status(&common),
        Commands::Config { args } => commands::handle_config_command(&args).map(|()| 0),
    }
}
