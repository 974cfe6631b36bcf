use anyhow::{Result, anyhow};
use inquire::{InquireError, Text};

/// Source of the commit message used by sync.
pub trait MessagePrompt: Send + Sync {
    /// Returns the raw answer; an empty string means "use the default".
    fn ask(&self) -> Result<String>;
}

/// Asks on the terminal.
#[derive(Debug, Clone, Default)]
pub struct InteractivePrompt {
    pub placeholder: Option<String>,
}

impl InteractivePrompt {
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: Some(placeholder.into()),
        }
    }
}

impl MessagePrompt for InteractivePrompt {
    fn ask(&self) -> Result<String> {
        let mut text = Text::new("Commit message:")
            .with_help_message("Leave empty to use the default message");
        if let Some(placeholder) = &self.placeholder {
            text = text.with_placeholder(placeholder);
        }

        match text.prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Err(anyhow!("Commit message prompt cancelled"))
            }
            Err(InquireError::NotTTY) => Err(anyhow!(
                "Cannot prompt for a commit message without a terminal. Pass --message instead."
            )),
            Err(e) => Err(anyhow!("Prompt error: {e}")),
        }
    }
}

/// A message known up front (`--message`).
#[derive(Debug, Clone)]
pub struct FixedMessage(pub String);

impl MessagePrompt for FixedMessage {
    fn ask(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
