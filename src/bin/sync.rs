use clap::Parser;
use gitship::{
    cli::{self, GlobalArgs, SyncArgs},
    common::CommonParams,
    ui,
};
use std::process::exit;

#[derive(Parser)]
#[command(
    name = "git-sync",
    version,
    about = "Commit every pending change and push it",
    styles = cli::get_styles()
)]
struct SyncCli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(flatten)]
    common: CommonParams,
    #[command(flatten)]
    args: SyncArgs,
}

#[tokio::main]
async fn main() {
    let cli = SyncCli::parse();

    if let Err(e) = cli.global.apply() {
        ui::print_error(&format!("Error: {e:#}"));
        exit(1);
    }

    match cli::handle_sync(&cli.common, cli.args).await {
        Ok(code) => exit(code),
        Err(e) => {
            ui::print_error(&format!("Error: {e:#}"));
            exit(1);
        }
    }
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    SyncCli::command().debug_assert();
}
