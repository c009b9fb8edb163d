use serde::Serialize;
use std::path::PathBuf;

use crate::config::FetchConfig;
use crate::error::Result;
use crate::naming::{expand_exts, image_path, pair_names, source_url};

/// One remote file and where it lands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DownloadJob {
    pub(crate) date: String,
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) dest: PathBuf,
}

/// Cross product of dates × name pairs, dates outermost.
///
/// Name lists are checked before anything is built, so a mismatched config
/// never produces a partial plan.
pub(crate) fn plan_downloads(config: &FetchConfig) -> Result<Vec<DownloadJob>> {
    let pairs = pair_names(&config.names, &config.out_names)?;
    let exts = expand_exts(&config.exts, pairs.len())?;
    let dates = config.date_selection().resolve()?;

    let mut jobs = Vec::with_capacity(dates.len() * pairs.len());
    for date in &dates {
        for ((input, output), ext) in pairs.iter().zip(&exts) {
            jobs.push(DownloadJob {
                date: date.clone(),
                name: (*output).to_string(),
                url: source_url(&config.base_url, date, input, ext),
                dest: PathBuf::from(image_path(&config.out_dir, date, output, &config.out_ext)),
            });
        }
    }
    Ok(jobs)
}
