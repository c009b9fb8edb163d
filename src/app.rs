use std::path::Path;
use std::time::Duration;

use crate::cli::{Cli, Commands, FetchArgs, RenderArgs};
use crate::config::{Config, FetchConfig, RenderConfig};
use crate::error::Result;
use crate::fetch::{HttpDownloader, plan_downloads, run_downloads};
use crate::output::{plan_json, print_plan_table};
use crate::render::{FrameDirWriter, FrameSink, MovieWriter, prepare, render_frames};
use crate::utils::log::progress;

fn handle_fetch(config: &FetchConfig, args: &FetchArgs, use_color: bool) -> Result<()> {
    let jobs = plan_downloads(config)?;

    if args.dry_run {
        if args.json {
            println!("{}", plan_json(&jobs));
        } else {
            print_plan_table(&jobs, use_color);
        }
        return Ok(());
    }

    let downloader = HttpDownloader::new(Duration::from_secs(config.timeout_secs));
    run_downloads(&jobs, &downloader)?;
    Ok(())
}

fn handle_render(config: &RenderConfig, args: &RenderArgs) -> Result<()> {
    let plan = prepare(config)?;

    let mut sink: Box<dyn FrameSink> = match &args.frames_dir {
        Some(dir) => Box::new(FrameDirWriter::create(dir)?),
        None => Box::new(MovieWriter::start(plan.width, plan.height, &config.movie)?),
    };
    render_frames(config, &plan, sink.as_mut())?;

    match &args.frames_dir {
        Some(dir) => progress!("Frames saved under {}", dir.display()),
        None => progress!("Movie saved to {}", Path::new(&config.movie.filename).display()),
    }
    Ok(())
}

/// Load config, apply CLI overrides and run the selected command
pub(crate) fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    crate::utils::set_verbose(config.verbose && !cli.quiet);

    match &cli.command {
        Commands::Fetch(args) => handle_fetch(&config.fetch, args, cli.use_color()),
        Commands::Render(args) => handle_render(&config.render, args),
        Commands::Config => {
            print!("{}", config.to_toml());
            Ok(())
        }
    }
}
