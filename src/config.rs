use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::utils::date::TOKEN_FORMAT;
use crate::utils::log::progress;
use crate::utils::{date_tokens, parse_date};

/// Which days to process: either an explicit token list or an inclusive
/// `since`..`until` range rendered with `format`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DateSelection<'a> {
    pub(crate) dates: &'a [String],
    pub(crate) since: Option<&'a str>,
    pub(crate) until: Option<&'a str>,
    pub(crate) format: &'a str,
}

impl DateSelection<'_> {
    /// A range wins over the literal list. A lone `since` or `until`
    /// selects that single day.
    pub(crate) fn resolve(&self) -> Result<Vec<String>> {
        let tokens = match (self.since, self.until) {
            (None, None) => self.dates.to_vec(),
            (Some(day), None) | (None, Some(day)) => {
                let day = parse_date(day)?;
                date_tokens(day, day, self.format)
            }
            (Some(since), Some(until)) => {
                date_tokens(parse_date(since)?, parse_date(until)?, self.format)
            }
        };
        if tokens.is_empty() {
            return Err(AppError::EmptyDates);
        }
        Ok(tokens)
    }
}

fn default_date_format() -> String {
    TOKEN_FORMAT.to_string()
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FetchConfig {
    pub(crate) base_url: String,
    pub(crate) dates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) until: Option<String>,
    pub(crate) date_format: String,
    /// Remote file names, without date or extension
    pub(crate) names: Vec<String>,
    /// One extension per remote name, or a single shared one
    pub(crate) exts: Vec<String>,
    pub(crate) out_dir: String,
    /// Local names, paired with `names` by position
    pub(crate) out_names: Vec<String>,
    pub(crate) out_ext: String,
    pub(crate) timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://spaceweather.com/images2016/".to_string(),
            dates: strings(&["25aug16"]),
            since: None,
            until: None,
            date_format: default_date_format(),
            names: strings(&["coronalhole_sdo_blank", "hmi1898"]),
            exts: strings(&[".jpg", ".gif"]),
            out_dir: "sun_images/".to_string(),
            out_names: strings(&["coronalhole", "sunspot"]),
            out_ext: ".jpg".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FetchConfig {
    pub(crate) fn date_selection(&self) -> DateSelection<'_> {
        DateSelection {
            dates: &self.dates,
            since: self.since.as_deref(),
            until: self.until.as_deref(),
            format: &self.date_format,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct MovieConfig {
    pub(crate) filename: String,
    pub(crate) fps: u32,
    /// kbit/s
    pub(crate) bitrate: u32,
    pub(crate) dpi: u32,
    pub(crate) codec: String,
}

impl Default for MovieConfig {
    fn default() -> Self {
        Self {
            filename: "make_movie.mp4".to_string(),
            fps: 1,
            bitrate: 5000,
            dpi: 300,
            codec: "libx264".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PanelConfig {
    pub(crate) title: String,
    /// Grid shape as (rows, cols)
    pub(crate) grid: (u32, u32),
    /// Cell as (row, col)
    pub(crate) loc: (u32, u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FigureConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    /// Width and height in inches
    pub(crate) size: (f64, f64),
    pub(crate) background: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) placeholder_background: Option<String>,
    pub(crate) panels: Vec<PanelConfig>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            title: Some("Sun images from spaceweather.com".to_string()),
            size: (6.4, 4.8),
            background: "#ffffff".to_string(),
            placeholder_background: None,
            panels: vec![
                PanelConfig {
                    title: "Coronal Holes".to_string(),
                    grid: (1, 2),
                    loc: (0, 0),
                },
                PanelConfig {
                    title: "Sunspots".to_string(),
                    grid: (1, 2),
                    loc: (0, 1),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RenderConfig {
    pub(crate) image_dir: String,
    pub(crate) dates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) until: Option<String>,
    pub(crate) date_format: String,
    /// Image names, one per panel
    pub(crate) names: Vec<String>,
    pub(crate) ext: String,
    pub(crate) movie: MovieConfig,
    pub(crate) figure: FigureConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_dir: "sun_images/".to_string(),
            dates: strings(&[
                "12aug16", "13aug16", "14aug16", "15aug16", "16aug16", "17aug16", "18aug16",
                "19aug16", "20aug16", "21aug16", "22aug16", "23aug16", "24aug16", "25aug16",
                "26aug16", "27aug16", "28aug16", "29aug16", "30aug16", "31aug16",
            ]),
            since: None,
            until: None,
            date_format: default_date_format(),
            names: strings(&["coronalhole", "sunspot"]),
            ext: ".jpg".to_string(),
            movie: MovieConfig::default(),
            figure: FigureConfig::default(),
        }
    }
}

impl RenderConfig {
    pub(crate) fn date_selection(&self) -> DateSelection<'_> {
        DateSelection {
            dates: &self.dates,
            since: self.since.as_deref(),
            until: self.until.as_deref(),
            format: &self.date_format,
        }
    }

    /// Every image name needs a panel and vice versa.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.names.len() != self.figure.panels.len() {
            return Err(AppError::NameListMismatch {
                inputs: self.names.len(),
                outputs: self.figure.panels.len(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) verbose: bool,
    pub(crate) fetch: FetchConfig,
    pub(crate) render: RenderConfig,
}

impl Config {
    /// Load from an explicit path, or the first default location that
    /// exists. Falls back to built-in defaults when no file is found.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|message| AppError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        progress!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        toml::from_str::<Config>(content).map_err(|e| e.message().to_string())
    }

    pub(crate) fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/solarreel/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("solarreel").join("config.toml"));
        }

        // 2. Platform config dir (Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("solarreel").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.solarreel.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".solarreel.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("solarreel")));
    }

    #[test]
    fn defaults_are_consistent() {
        let config = Config::default();
        config.render.validate().unwrap();
        assert_eq!(config.render.date_selection().resolve().unwrap().len(), 20);
        assert_eq!(config.fetch.date_selection().resolve().unwrap(), vec!["25aug16"]);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse(
            r#"
verbose = true

[fetch]
dates = ["24aug16", "25aug16"]

[render.movie]
fps = 4
"#,
        )
        .unwrap();
        assert!(config.verbose);
        assert_eq!(config.fetch.dates, vec!["24aug16", "25aug16"]);
        assert_eq!(config.fetch.date_format, "%d%b%y");
        assert_eq!(config.render.dates.len(), 20);
        assert_eq!(config.fetch.base_url, "http://spaceweather.com/images2016/");
        assert_eq!(config.render.movie.fps, 4);
        assert_eq!(config.render.movie.bitrate, 5000);
        assert_eq!(config.render.figure.panels.len(), 2);
    }

    #[test]
    fn panels_parse_from_array_of_tables() {
        let config = Config::parse(
            r#"
[render]
names = ["sunspot"]

[[render.figure.panels]]
title = "Sunspots"
grid = [1, 1]
loc = [0, 0]
"#,
        )
        .unwrap();
        let panels = &config.render.figure.panels;
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].grid, (1, 1));
        config.render.validate().unwrap();
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(Config::parse("[fetch\nnames = 3").is_err());
        assert!(Config::parse("[fetch]\nnames = 3").is_err());
    }

    #[test]
    fn load_file_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[render]\nnames = \"oops\"").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, AppError::Config { path: ref p, .. } if p == &path));
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn range_overrides_literal_dates() {
        let dates = strings(&["01jan16"]);
        let selection = DateSelection {
            dates: &dates,
            since: Some("2016-08-30"),
            until: Some("20160831"),
            format: TOKEN_FORMAT,
        };
        assert_eq!(selection.resolve().unwrap(), vec!["30aug16", "31aug16"]);
    }

    #[test]
    fn lone_until_selects_one_day() {
        let selection = DateSelection {
            dates: &[],
            since: None,
            until: Some("2016-08-25"),
            format: TOKEN_FORMAT,
        };
        assert_eq!(selection.resolve().unwrap(), vec!["25aug16"]);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let selection = DateSelection {
            dates: &[],
            since: None,
            until: None,
            format: TOKEN_FORMAT,
        };
        let err = selection.resolve().unwrap_err();
        assert!(matches!(err, AppError::EmptyDates));
    }

    #[test]
    fn effective_config_round_trips_through_toml() {
        let text = Config::default().to_toml();
        let back = Config::parse(&text).unwrap();
        assert_eq!(back.render.dates.len(), 20);
        assert_eq!(back.render.figure.panels[1].title, "Sunspots");
    }
}
