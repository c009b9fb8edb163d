use image::{Rgb, RgbImage};

use crate::config::PanelConfig;

use super::font::{draw_text_centered, line_height, text_height};
use super::panel::{Panel, Rect};

/// Subplot margins as fractions of the canvas
const LEFT: f64 = 0.125;
const RIGHT: f64 = 0.9;
const TOP: f64 = 0.88;
const BOTTOM: f64 = 0.11;
/// Gap between grid cells as a fraction of the cell size
const WSPACE: f64 = 0.2;
const HSPACE: f64 = 0.2;

/// Largest frame side accepted; 8K UHD width
pub(crate) const MAX_FRAME_SIDE: u32 = 7680;

const TITLE_INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Canvas size in pixels for a figure of `size` inches at `dpi`, rounded
/// down to even numbers as yuv420p requires.
pub(crate) fn frame_size(size: (f64, f64), dpi: u32) -> (u32, u32) {
    let px = |inches: f64| (((inches * dpi as f64).round() as u32) & !1).max(2);
    (px(size.0), px(size.1))
}

/// Pixel rectangle of cell `loc` in a `grid` of (rows, cols), laid out like
/// matplotlib's `subplot2grid`. Out-of-range locations are clamped to the
/// last row/column.
pub(crate) fn grid_cell(width: u32, height: u32, grid: (u32, u32), loc: (u32, u32)) -> Rect {
    let rows = grid.0.max(1) as f64;
    let cols = grid.1.max(1) as f64;
    let row = loc.0.min(grid.0.max(1) - 1) as f64;
    let col = loc.1.min(grid.1.max(1) - 1) as f64;

    let avail_w = (RIGHT - LEFT) * width as f64;
    let avail_h = (TOP - BOTTOM) * height as f64;
    let cell_w = avail_w / (cols + WSPACE * (cols - 1.0));
    let cell_h = avail_h / (rows + HSPACE * (rows - 1.0));

    let x = LEFT * width as f64 + col * cell_w * (1.0 + WSPACE);
    let y = (1.0 - TOP) * height as f64 + row * cell_h * (1.0 + HSPACE);

    Rect {
        x: x.round() as u32,
        y: y.round() as u32,
        w: cell_w.round() as u32,
        h: cell_h.round() as u32,
    }
}

/// A canvas holding a fixed set of panels and an optional figure title
pub(crate) struct Figure {
    width: u32,
    height: u32,
    background: Rgb<u8>,
    panels: Vec<Panel>,
    suptitle: Option<String>,
    title_scale: u32,
}

impl Figure {
    pub(crate) fn new(width: u32, height: u32, background: Rgb<u8>, specs: &[PanelConfig]) -> Self {
        let title_scale = (height / 360).max(1);
        let panels = specs
            .iter()
            .map(|spec| Panel::new(grid_cell(width, height, spec.grid, spec.loc), title_scale))
            .collect();
        Self {
            width,
            height,
            background,
            panels,
            suptitle: None,
            title_scale,
        }
    }

    pub(crate) fn panel_mut(&mut self, index: usize) -> Option<&mut Panel> {
        self.panels.get_mut(index)
    }

    pub(crate) fn set_suptitle(&mut self, text: String) {
        self.suptitle = Some(text);
    }

    fn suptitle_scale(&self) -> u32 {
        (self.title_scale * 3).div_ceil(2)
    }

    /// Top edge of the figure title: one line pitch above the highest panel
    /// title (or panel, if none are titled), clamped to the canvas.
    pub(crate) fn suptitle_top(&self) -> u32 {
        let anchor = self
            .panels
            .iter()
            .map(|p| p.title_top().unwrap_or(p.rect().y))
            .min()
            .unwrap_or(self.height / 10);
        let scale = self.suptitle_scale();
        let gap = line_height(scale) - text_height(scale);
        anchor.saturating_sub(gap + text_height(scale))
    }

    /// Compose the current state of every panel into one frame.
    pub(crate) fn render(&self) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(self.width, self.height, self.background);
        for panel in &self.panels {
            panel.draw(&mut canvas);
        }
        if let Some(text) = &self.suptitle {
            draw_text_centered(
                &mut canvas,
                self.width / 2,
                self.suptitle_top(),
                text,
                self.suptitle_scale(),
                TITLE_INK,
            );
        }
        canvas
    }
}
