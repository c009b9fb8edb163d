use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Name lists differ in length: {inputs} input name(s) vs {outputs} output name(s)")]
    NameListMismatch { inputs: usize, outputs: usize },

    #[error("No dates configured (set `dates` or `since`/`until`)")]
    EmptyDates,

    #[error("Invalid colour \"{input}\" (expected #rrggbb)")]
    InvalidColor { input: String },

    #[error("Frame of {width}x{height} pixels is too large (at most {max} per side); lower `dpi` or `size`")]
    FrameTooLarge { width: u32, height: u32, max: u32 },

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Failed to fetch {url}: {message}")]
    Http { url: String, message: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write image {}: {message}", path.display())]
    Image { path: PathBuf, message: String },

    #[error("{0}")]
    Encoder(#[from] EncoderError),
}

#[derive(Debug, Error)]
pub(crate) enum EncoderError {
    #[error("ffmpeg not found. Please install ffmpeg to render movies (or use --frames-dir).")]
    NotFound,

    #[error("Failed to run ffmpeg: {0}")]
    Spawn(std::io::Error),

    #[error("Failed to write frame to ffmpeg stdin: {0}")]
    Write(std::io::Error),

    #[error("Failed to wait for ffmpeg: {0}")]
    Wait(std::io::Error),

    #[error("Frame is {got_w}x{got_h}, encoder expects {want_w}x{want_h}")]
    FrameSize {
        got_w: u32,
        got_h: u32,
        want_w: u32,
        want_h: u32,
    },

    #[error("ffmpeg error: {0}")]
    Failed(String),
}

pub(crate) type Result<T> = std::result::Result<T, AppError>;
