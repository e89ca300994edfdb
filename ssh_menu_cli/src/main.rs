mod ui;

use clap::Parser;
use crate::ui::cli;
use ssh_menu_core::utils::logging::init_logging;

fn main() {
    init_logging();
    let args = cli::Args::parse();
    if let Err(e) = cli::run_cli(args) {
        eprintln!("ssh-menu: {e:#}");
        std::process::exit(1);
    }
}
