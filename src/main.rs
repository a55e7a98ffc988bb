mod admin;
mod backup;
mod common;
mod groups;
mod menu;
mod ui;
mod users;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

use crate::admin::system::SystemAdmin;
use crate::backup::BackupOutcome;
use crate::common::config::Config;
use crate::common::{deps, identity};
use crate::menu::MenuState;

/// Admin CLI main parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the user management menu
    Users,

    /// Open the group management menu
    Groups,

    /// Archive the configured system directories and exit
    Backup,
}

fn main() {
    let cli = Cli::parse();

    ui::set_debug_mode(cli.debug);

    // Privilege gate: everything this tool does needs root.
    if !identity::is_root() {
        eprintln!("{}", "This tool must be run as root".red());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        eprintln!("{} {e:#}", "Error:".red());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    deps::warn_missing_tools();

    let config = Config::load()?;
    let admin = SystemAdmin::new()?;

    match &cli.command {
        Some(Commands::Users) => menu::run_from(&admin, &admin, &config, MenuState::Users),
        Some(Commands::Groups) => menu::run_from(&admin, &admin, &config, MenuState::Groups),
        Some(Commands::Backup) => {
            let outcome = backup::run_backup(&admin, &config.backup)?;
            let failed = matches!(outcome, BackupOutcome::Failed { .. });
            menu::report_backup(outcome);
            if failed {
                anyhow::bail!("backup did not complete");
            }
            Ok(())
        }
        None => menu::run(&admin, &admin, &config),
    }
}
