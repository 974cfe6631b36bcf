use clap::Parser;
use gitship::{
    cli::{self, DeployArgs, GlobalArgs},
    common::CommonParams,
    ui,
};
use std::process::exit;

#[derive(Parser)]
#[command(
    name = "git-deploy",
    version,
    about = "Push the current branch to its remote, or explain how to add one",
    styles = cli::get_styles()
)]
struct DeployCli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(flatten)]
    common: CommonParams,
    #[command(flatten)]
    args: DeployArgs,
}

#[tokio::main]
async fn main() {
    let cli = DeployCli::parse();

    if let Err(e) = cli.global.apply() {
        ui::print_error(&format!("Error: {e:#}"));
        exit(1);
    }

    match cli::handle_deploy(&cli.common, cli.args).await {
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
    DeployCli::command().debug_assert();
}
