//! Frame destinations: an ffmpeg pipe or a directory of PNG files

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::{self, JoinHandle};

use image::{ImageFormat, RgbImage};

use crate::config::MovieConfig;
use crate::error::{AppError, EncoderError, Result};

/// Receives composed frames in order
pub(crate) trait FrameSink {
    fn grab_frame(&mut self, frame: &RgbImage) -> Result<()>;

    /// Flush and close the destination. Called once after the last frame.
    fn finish(&mut self) -> Result<()>;
}

/// Streams raw RGB frames into an ffmpeg child process.
///
/// The child is started once in `start` and owned until `finish`; if the
/// writer is dropped early the pipe is closed and the child reaped. Its
/// stderr is drained on a separate thread so the child never blocks on it.
pub(crate) struct MovieWriter {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<Vec<u8>>>,
    width: u32,
    height: u32,
}

#[rustfmt::skip]
fn ffmpeg_args(width: u32, height: u32, movie: &MovieConfig, output: &Path) -> Vec<String> {
    let size = format!("{width}x{height}");
    let fps = movie.fps.max(1).to_string();
    let bitrate = format!("{}k", movie.bitrate);
    vec![
        "-y",
        "-loglevel", "error",
        "-f", "rawvideo",
        "-pix_fmt", "rgb24",
        "-s", size.as_str(),
        "-r", fps.as_str(),
        "-i", "-",
        "-c:v", movie.codec.as_str(),
        "-b:v", bitrate.as_str(),
        "-pix_fmt", "yuv420p",
    ]
    .into_iter()
    .map(String::from)
    .chain(std::iter::once(output.to_string_lossy().into_owned()))
    .collect()
}

impl MovieWriter {
    pub(crate) fn start(width: u32, height: u32, movie: &MovieConfig) -> Result<Self> {
        let mut command = Command::new("ffmpeg");
        command.args(ffmpeg_args(width, height, movie, Path::new(&movie.filename)));
        Self::spawn(command, width, height)
    }

    fn spawn(mut command: Command, width: u32, height: u32) -> Result<Self> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EncoderError::NotFound
                } else {
                    EncoderError::Spawn(e)
                }
            })?;
        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });
        Ok(Self {
            child: Some(child),
            stdin,
            stderr,
            width,
            height,
        })
    }

    fn collect_stderr(&mut self) -> Vec<u8> {
        self.stderr
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    }

    /// Close stdin, wait for the child and check its exit status.
    fn close(&mut self) -> std::result::Result<(), EncoderError> {
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait().map_err(EncoderError::Wait)?;
        let stderr = self.collect_stderr();
        if status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&stderr);
            Err(EncoderError::Failed(stderr.trim().to_string()))
        }
    }
}

impl FrameSink for MovieWriter {
    fn grab_frame(&mut self, frame: &RgbImage) -> Result<()> {
        let (w, h) = frame.dimensions();
        if (w, h) != (self.width, self.height) {
            return Err(EncoderError::FrameSize {
                got_w: w,
                got_h: h,
                want_w: self.width,
                want_h: self.height,
            }
            .into());
        }
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(EncoderError::Failed("encoder already closed".to_string()).into());
        };
        if let Err(e) = stdin.write_all(frame.as_raw()) {
            // A broken pipe usually means ffmpeg exited; its stderr says why
            self.close()?;
            return Err(EncoderError::Write(e).into());
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.close()?;
        Ok(())
    }
}

impl Drop for MovieWriter {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
        self.collect_stderr();
    }
}

/// Writes each frame as `frame_NNNN.png` under a directory
pub(crate) struct FrameDirWriter {
    dir: PathBuf,
    next: usize,
}

impl FrameDirWriter {
    pub(crate) fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| AppError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            next: 0,
        })
    }
}

impl FrameSink for FrameDirWriter {
    fn grab_frame(&mut self, frame: &RgbImage) -> Result<()> {
        let path = self.dir.join(format!("frame_{:04}.png", self.next));
        frame
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| AppError::Image {
                path: path.clone(),
                message: e.to_string(),
            })?;
        self.next += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
