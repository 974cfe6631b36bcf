use gitship::{cli, ui};
use std::process::exit;

#[tokio::main]
async fn main() {
    match cli::main().await {
        Ok(code) => exit(code),
        Err(e) => {
            ui::print_error(&format!("Error: {e:#}"));
            exit(1);
        }
    }
}
