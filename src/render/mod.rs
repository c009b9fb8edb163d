//! Movie rendering
//!
//! One frame per date. Each frame is a figure with one panel per image
//! name; panels whose image can't be loaded are blanked instead of
//! aborting the run.

mod figure;
mod font;
mod loader;
mod panel;
mod sink;

pub(crate) use sink::{FrameDirWriter, FrameSink, MovieWriter};

use figure::{Figure, MAX_FRAME_SIDE, frame_size};
use image::Rgb;
use loader::{LoadedImage, load_image};
use std::path::Path;

use crate::config::RenderConfig;
use crate::error::{AppError, Result};
use crate::naming::image_path;
use crate::utils::log::{progress, verbose};

/// Counts from a finished render
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RenderSummary {
    pub(crate) frames: usize,
    pub(crate) images: usize,
    pub(crate) placeholders: usize,
}

/// Parse `#rrggbb` (or `white` / `black`)
pub(crate) fn parse_color(input: &str) -> Result<Rgb<u8>> {
    let invalid = || AppError::InvalidColor {
        input: input.to_string(),
    };
    match input.trim().to_ascii_lowercase().as_str() {
        "white" => Ok(Rgb([255, 255, 255])),
        "black" => Ok(Rgb([0, 0, 0])),
        s => {
            let hex = s.strip_prefix('#').ok_or_else(invalid)?;
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
        }
    }
}

/// Everything checked and derived from the config before any encoder is
/// started, so a bad config never leaves a half-written movie behind.
#[derive(Debug, Clone)]
pub(crate) struct RenderPlan {
    pub(crate) dates: Vec<String>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    background: Rgb<u8>,
    placeholder: Option<Rgb<u8>>,
}

pub(crate) fn prepare(config: &RenderConfig) -> Result<RenderPlan> {
    config.validate()?;
    let dates = config.date_selection().resolve()?;
    let (width, height) = frame_size(config.figure.size, config.movie.dpi);
    if width > MAX_FRAME_SIDE || height > MAX_FRAME_SIDE {
        return Err(AppError::FrameTooLarge {
            width,
            height,
            max: MAX_FRAME_SIDE,
        });
    }
    let background = parse_color(&config.figure.background)?;
    let placeholder = config
        .figure
        .placeholder_background
        .as_deref()
        .map(parse_color)
        .transpose()?;
    Ok(RenderPlan {
        dates,
        width,
        height,
        background,
        placeholder,
    })
}

/// Push one frame per planned date into `sink`, then finish it.
///
/// On error the sink is left unfinished; dropping it releases it.
pub(crate) fn render_frames(
    config: &RenderConfig,
    plan: &RenderPlan,
    sink: &mut dyn FrameSink,
) -> Result<RenderSummary> {
    let figure_cfg = &config.figure;
    let mut figure = Figure::new(plan.width, plan.height, plan.background, &figure_cfg.panels);
    let mut summary = RenderSummary::default();

    progress!(
        "Rendering {} frame(s) at {}x{} from {}",
        plan.dates.len(),
        plan.width,
        plan.height,
        config.image_dir
    );

    for date in &plan.dates {
        if let Some(title) = &figure_cfg.title {
            figure.set_suptitle(format!("{title}: {date}"));
        }

        for (index, (name, spec)) in config.names.iter().zip(&figure_cfg.panels).enumerate() {
            let path = image_path(&config.image_dir, date, name, &config.ext);
            verbose!("Input image file full path: {path}");

            let Some(panel) = figure.panel_mut(index) else {
                continue;
            };
            panel.set_axis_off();
            match load_image(Path::new(&path)) {
                LoadedImage::Image(img) => {
                    panel.show_image(img);
                    summary.images += 1;
                }
                LoadedImage::Missing => {
                    panel.set_placeholder(plan.placeholder);
                    summary.placeholders += 1;
                }
            }
            panel.set_title(&spec.title);
        }

        sink.grab_frame(&figure.render())?;
        summary.frames += 1;
    }

    sink.finish()?;
    progress!(
        "Wrote {} frame(s): {} image(s), {} placeholder panel(s)",
        summary.frames,
        summary.images,
        summary.placeholders
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    /// Keeps every frame in memory
    #[derive(Default)]
    struct CollectSink {
        frames: Vec<RgbImage>,
        finished: bool,
    }

    impl FrameSink for CollectSink {
        fn grab_frame(&mut self, frame: &RgbImage) -> Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn render(config: &RenderConfig, sink: &mut CollectSink) -> Result<RenderSummary> {
        let plan = prepare(config)?;
        render_frames(config, &plan, sink)
    }

    fn small_config(image_dir: &Path) -> RenderConfig {
        let mut config = RenderConfig::default();
        config.image_dir = format!("{}/", image_dir.display());
        config.figure.size = (1.6, 1.2);
        config.movie.dpi = 40;
        config
    }

    #[test]
    fn parse_color_accepts_hex_and_names() {
        assert_eq!(parse_color("#ff8000").unwrap(), Rgb([255, 128, 0]));
        assert_eq!(parse_color("#FFFFFF").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_color("black").unwrap(), Rgb([0, 0, 0]));
        assert!(parse_color("ff8000").is_err());
        assert!(parse_color("#ff80").is_err());
        assert!(parse_color("#gg0000").is_err());
    }

    #[test]
    fn twenty_dates_make_twenty_frames_with_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path());
        let mut sink = CollectSink::default();

        let summary = render(&config, &mut sink).unwrap();

        assert_eq!(summary.frames, 20);
        assert_eq!(summary.images, 0);
        assert_eq!(summary.placeholders, 40);
        assert_eq!(sink.frames.len(), 20);
        assert!(sink.finished);
        assert!(sink.frames.iter().all(|f| f.dimensions() == (64, 48)));
    }

    #[test]
    fn present_images_are_used_and_missing_ones_blanked() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(dir.path());
        config.dates = vec!["25aug16".to_string(), "26aug16".to_string()];
        RgbImage::from_pixel(8, 8, Rgb([250, 180, 0]))
            .save_with_format(dir.path().join("25aug16_sunspot.jpg"), ImageFormat::Png)
            .unwrap();

        let mut sink = CollectSink::default();
        let summary = render(&config, &mut sink).unwrap();

        assert_eq!(
            summary,
            RenderSummary {
                frames: 2,
                images: 1,
                placeholders: 3
            }
        );
        let has_sun = |f: &RgbImage| f.pixels().any(|p| *p == Rgb([250, 180, 0]));
        assert!(has_sun(&sink.frames[0]));
        assert!(!has_sun(&sink.frames[1]));
    }

    #[test]
    fn panel_count_must_match_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(dir.path());
        config.names.push("flare".to_string());
        let mut sink = CollectSink::default();

        let err = render(&config, &mut sink).unwrap_err();
        assert!(matches!(err, AppError::NameListMismatch { inputs: 3, outputs: 2 }));
        assert!(sink.frames.is_empty());
        assert!(!sink.finished);
    }

    #[test]
    fn bad_background_fails_before_any_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(dir.path());
        config.figure.background = "teal".to_string();
        let mut sink = CollectSink::default();

        assert!(matches!(
            render(&config, &mut sink),
            Err(AppError::InvalidColor { .. })
        ));
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn oversized_frame_is_rejected_before_any_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(dir.path());
        config.movie.dpi = u32::MAX;
        let mut sink = CollectSink::default();

        let err = render(&config, &mut sink).unwrap_err();
        assert!(matches!(err, AppError::FrameTooLarge { max: 7680, .. }));
        assert!(sink.frames.is_empty());

        config.movie.dpi = 1200;
        config.figure.size = (6.4, 4.8);
        assert!(matches!(prepare(&config), Ok(plan) if plan.width == 7680));
    }

    #[test]
    fn default_plan_matches_movie_settings() {
        let plan = prepare(&RenderConfig::default()).unwrap();
        assert_eq!((plan.width, plan.height), (1920, 1440));
        assert_eq!(plan.dates.first().map(String::as_str), Some("12aug16"));
        assert_eq!(plan.dates.last().map(String::as_str), Some("31aug16"));
        assert_eq!(plan.placeholder, None);
    }
}
