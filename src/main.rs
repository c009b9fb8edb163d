mod app;
mod cli;
mod config;
mod error;
mod fetch;
mod naming;
mod output;
mod render;
mod utils;

use clap::Parser;

use cli::Cli;
use utils::set_quiet;

fn main() {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    if let Err(e) = app::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
