// Git module providing the repository operations used by deploy and sync

mod commit;
mod hooks;
mod push;
mod remote_url;
mod repository;
mod status;

// Re-export primary types for public use
pub use commit::CommitResult;
pub use hooks::execute_hook;
pub use push::{PushReport, PushTarget, push};
pub use remote_url::validate_remote_url;
pub use repository::{GitRepo, RemoteInfo};
pub use status::{ChangeKind, PendingChange};

/// Failure kinds of the external `git` command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    GitPushCommand,
    GitPushCommandExitStatus,
}
