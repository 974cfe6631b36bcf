pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod features;
pub mod git;
pub mod logger;
pub mod messages;
pub mod spinner;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::Config;
pub use features::{
    DeployOptions, DeployOutcome, FixedMessage, MessagePrompt, SyncOptions, SyncOutcome, deploy,
    sync,
};
pub use git::{GitRepo, PushTarget};
