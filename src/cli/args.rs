//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

use super::commands::{Commands, DateArgs, FetchArgs, RenderArgs};

#[derive(Parser)]
#[command(name = "solarreel")]
#[command(about = "Download daily sun images and render them into a movie", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Config file (default: ~/.config/solarreel/config.toml)
    #[arg(short = 'C', long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Print every URL and file path as it is processed
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub(crate) quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub(crate) no_color: bool,
}

/// Explicit dates replace any configured range, and an explicit range
/// replaces both.
fn apply_dates(
    args: &DateArgs,
    dates: &mut Vec<String>,
    since: &mut Option<String>,
    until: &mut Option<String>,
) {
    if args.since.is_some() || args.until.is_some() {
        *since = args.since.clone();
        *until = args.until.clone();
    } else if !args.dates.is_empty() {
        *dates = args.dates.clone();
        *since = None;
        *until = None;
    }
}

impl Cli {
    /// Merge CLI values into the loaded config (CLI args take precedence)
    pub(crate) fn apply_to(&self, config: &mut Config) {
        if self.verbose {
            config.verbose = true;
        }

        match &self.command {
            Commands::Fetch(args) => Self::apply_fetch(args, config),
            Commands::Render(args) => Self::apply_render(args, config),
            Commands::Config => {}
        }
    }

    fn apply_fetch(args: &FetchArgs, config: &mut Config) {
        let fetch = &mut config.fetch;
        apply_dates(&args.dates, &mut fetch.dates, &mut fetch.since, &mut fetch.until);
        if let Some(url) = &args.base_url {
            fetch.base_url = url.clone();
        }
        if let Some(dir) = &args.out_dir {
            fetch.out_dir = dir.clone();
        }
    }

    fn apply_render(args: &RenderArgs, config: &mut Config) {
        let render = &mut config.render;
        apply_dates(&args.dates, &mut render.dates, &mut render.since, &mut render.until);
        if let Some(dir) = &args.image_dir {
            render.image_dir = dir.clone();
        }
        if let Some(output) = &args.output {
            render.movie.filename = output.clone();
        }
        if let Some(fps) = args.fps {
            render.movie.fps = fps;
        }
        if let Some(bitrate) = args.bitrate {
            render.movie.bitrate = bitrate;
        }
        if let Some(dpi) = args.dpi {
            render.movie.dpi = dpi;
        }
    }

    pub(crate) fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
