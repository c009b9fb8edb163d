use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::{AppError, Result};

use super::Downloader;

/// Plain unauthenticated GET over a shared ureq agent
pub(crate) struct HttpDownloader {
    agent: ureq::Agent,
}

impl HttpDownloader {
    pub(crate) fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> AppError + '_ {
    move |source| AppError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        // Non-2xx statuses come back as Err from ureq
        let response = self.agent.get(url).call().map_err(|e| AppError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }

        let file = File::create(dest).map_err(io_error(dest))?;
        let mut writer = BufWriter::new(file);
        let mut body = response.into_body();
        let bytes = copy_body(&mut body.as_reader(), &mut writer, url, dest)?;
        writer.flush().map_err(io_error(dest))?;
        Ok(bytes)
    }
}

/// Stream `reader` into `writer`. Read failures belong to the transfer,
/// write failures to the local file.
fn copy_body(reader: &mut impl Read, writer: &mut impl Write, url: &str, dest: &Path) -> Result<u64> {
    let mut buf = [0u8; 8192];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(AppError::Http {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
        };
        writer.write_all(&buf[..n]).map_err(io_error(dest))?;
        total += n as u64;
    }
}
