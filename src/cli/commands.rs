//! CLI subcommand definitions

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Download the configured images to disk
    Fetch(FetchArgs),
    /// Render downloaded images into a movie, one frame per date
    Render(RenderArgs),
    /// Print the effective configuration as TOML
    Config,
}

/// Date selection shared by fetch and render
#[derive(Args, Debug, Default)]
pub(crate) struct DateArgs {
    /// Date tokens as used in file names (e.g. 25aug16), comma separated
    #[arg(short, long, value_delimiter = ',', value_name = "TOKENS")]
    pub(crate) dates: Vec<String>,

    /// First day of a date range (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long)]
    pub(crate) since: Option<String>,

    /// Last day of a date range (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long)]
    pub(crate) until: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FetchArgs {
    #[command(flatten)]
    pub(crate) dates: DateArgs,

    /// Remote directory the image names are appended to
    #[arg(long, value_name = "URL")]
    pub(crate) base_url: Option<String>,

    /// Local directory (prefix) for saved images
    #[arg(long, value_name = "DIR")]
    pub(crate) out_dir: Option<String>,

    /// Print the download plan without fetching anything
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Print the plan as JSON (with --dry-run)
    #[arg(short, long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub(crate) dates: DateArgs,

    /// Directory (prefix) the images are read from
    #[arg(long, value_name = "DIR")]
    pub(crate) image_dir: Option<String>,

    /// Output movie file
    #[arg(short, long, value_name = "FILE")]
    pub(crate) output: Option<String>,

    /// Frames per second
    #[arg(long)]
    pub(crate) fps: Option<u32>,

    /// Video bitrate in kbit/s
    #[arg(long, value_name = "KBPS")]
    pub(crate) bitrate: Option<u32>,

    /// Pixels per inch of figure size
    #[arg(long)]
    pub(crate) dpi: Option<u32>,

    /// Write PNG frames to this directory instead of encoding a movie
    #[arg(long, value_name = "DIR")]
    pub(crate) frames_dir: Option<PathBuf>,
}
