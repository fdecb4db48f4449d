//! sales-clean CLI - batch cleaning of raw sales data.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::clean::run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
