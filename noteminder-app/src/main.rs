mod cli;
mod logging;
pub mod tui;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()

use cli::commands::{load_notebook, open_repo, run_cli};
use cli::opts::{Cli, Command};
use noteminder_json::paths;
use tui::app::TuiApp;

fn main() -> Result<()> {
    let args = Cli::parse();

    match &args.cmd {
        Command::Tui => {
            logging::init_file(&paths::log_file())?;
            let repo = open_repo(&args)?;
            let book = load_notebook(&*repo);
            let mut app = TuiApp::new(repo, book);
            app.run()
        }
        _ => {
            logging::init_stderr();
            run_cli(args)
        }
    }
}
