//! Image fetching
//!
//! Builds the (url, destination) list from the configured dates and name
//! pairs, then copies each remote file to disk in order.

mod http;
mod plan;

pub(crate) use http::HttpDownloader;
pub(crate) use plan::{DownloadJob, plan_downloads};

use std::path::Path;

use crate::error::Result;
use crate::utils::log::{progress, verbose};

/// Anything that can copy a URL to a local file
pub(crate) trait Downloader {
    /// Fetch `url` and write it to `dest`, replacing any existing file.
    /// Returns the number of bytes written.
    fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Summary of a completed fetch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchSummary {
    pub(crate) files: usize,
    pub(crate) bytes: u64,
}

/// Download every job in order. The first failure aborts the run.
pub(crate) fn run_downloads(jobs: &[DownloadJob], downloader: &dyn Downloader) -> Result<FetchSummary> {
    progress!("Getting {} image file(s)", jobs.len());

    let mut summary = FetchSummary::default();
    for job in jobs {
        verbose!("Input image file URL: {}", job.url);
        verbose!("Output image file path: {}", job.dest.display());

        let bytes = downloader.download(&job.url, &job.dest)?;
        summary.files += 1;
        summary.bytes += bytes;
    }

    progress!("Saved {} file(s), {} bytes", summary.files, summary.bytes);
    Ok(summary)
}
