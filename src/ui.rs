use crate::spinner::SpinnerState;
use colored::Colorize;
use console::Term;
use parking_lot::Mutex;
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;
use tokio::time;

/// Track quiet mode state
static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

/// Enable or disable quiet mode
#[inline]
pub fn set_quiet_mode(enabled: bool) {
    *QUIET_MODE.lock() = enabled;
}

/// Check if quiet mode is enabled
#[inline]
pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

pub fn print_info(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.cyan().bold());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.yellow().bold());
    }
}

pub fn print_error(message: &str) {
    // Always print errors, even in quiet mode
    eprintln!("{}", message.red().bold());
}

pub fn print_success(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.green().bold());
    }
}

/// Print content with decorative borders
pub fn print_bordered_content(content: &str) {
    if !is_quiet_mode() {
        let border = "━".repeat(50).bright_purple();
        println!("{border}");
        println!("{content}");
        println!("{border}");
    }
}

/// Print a simple message (respects quiet mode)
pub fn print_message(message: &str) {
    if !is_quiet_mode() {
        println!("{message}");
    }
}

pub fn print_version(version: &str) {
    if !is_quiet_mode() {
        println!(
            "{} {}",
            "gitship".bright_magenta().bold(),
            format!("v{version}").bright_black()
        );
    }
}

/// Whether stdout is attached to a terminal
pub fn is_interactive() -> bool {
    Term::stdout().is_term()
}

/// Run an async operation while a spinner animates on stdout.
///
/// The spinner is skipped in quiet mode and when stdout is not a terminal.
pub async fn run_with_spinner<Fut, T>(mut spinner: SpinnerState, operation: Fut) -> T
where
    Fut: Future<Output = T>,
{
    if is_quiet_mode() || !is_interactive() {
        return operation.await;
    }

    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);

    let spinner_handle = tokio::spawn(async move {
        let mut stdout = io::stdout();
        let mut last_width = 0;
        loop {
            tokio::select! {
                _ = rx.recv() => break,
                () = time::sleep(Duration::from_millis(100)) => {
                    let (frame, message, color, width) = spinner.tick();
                    last_width = width;
                    let _ = write!(stdout, "\r{frame}{}", message.color(color));
                    let _ = stdout.flush();
                }
            }
        }
        // Clear the spinner line
        let _ = write!(stdout, "\r{}\r", " ".repeat(last_width.max(1)));
        let _ = stdout.flush();
    });

    let result = operation.await;

    let _ = tx.send(()).await;
    let _ = spinner_handle.await;

    result
}
