//! A single plotting region of the figure
//!
//! Panels keep their position for the whole run; content, title and axis
//! decorations are replaced in place on every frame.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as PixelRect;

use super::font::{draw_text_centered, line_height, text_height};

const INK: Rgb<u8> = Rgb([0, 0, 0]);
const FACE: Rgb<u8> = Rgb([255, 255, 255]);

/// Pixel rectangle, origin at the canvas top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rect {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) w: u32,
    pub(crate) h: u32,
}

impl Rect {
    pub(crate) fn center_x(&self) -> u32 {
        self.x + self.w / 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickPosition {
    /// Ticks on the left and bottom edges
    Default,
    None,
}

/// Tick labels for one axis. `Auto` labels each tick with its data
/// coordinate; `Fixed` uses the given strings, and an empty list means none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TickLabels {
    Auto,
    Fixed(Vec<String>),
}

/// Axis decoration switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decorations {
    /// Left, right, top, bottom
    pub(crate) spines: [bool; 4],
    pub(crate) ticks: TickPosition,
    pub(crate) x_tick_labels: TickLabels,
    pub(crate) y_tick_labels: TickLabels,
}

impl Decorations {
    fn shown() -> Self {
        Self {
            spines: [true; 4],
            ticks: TickPosition::Default,
            x_tick_labels: TickLabels::Auto,
            y_tick_labels: TickLabels::Auto,
        }
    }

    fn hidden() -> Self {
        Self {
            spines: [false; 4],
            ticks: TickPosition::None,
            x_tick_labels: TickLabels::Fixed(Vec::new()),
            y_tick_labels: TickLabels::Fixed(Vec::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum PanelContent {
    Empty,
    Image(RgbImage),
}

#[derive(Debug, Clone)]
pub(crate) struct Panel {
    rect: Rect,
    title: String,
    axis_on: bool,
    // Switched but never drawn; frames always render with the axis off
    #[allow(dead_code)]
    decorations: Decorations,
    background: Rgb<u8>,
    content: PanelContent,
    text_scale: u32,
}

impl Panel {
    pub(crate) fn new(rect: Rect, text_scale: u32) -> Self {
        Self {
            rect,
            title: String::new(),
            axis_on: true,
            decorations: Decorations::shown(),
            background: FACE,
            content: PanelContent::Empty,
            text_scale: text_scale.max(1),
        }
    }

    pub(crate) fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        self.title.clear();
        self.title.push_str(title);
    }

    pub(crate) fn set_axis_off(&mut self) {
        self.axis_on = false;
    }

    /// Reset to a fresh axes: no content, decorations back on.
    pub(crate) fn clear(&mut self) {
        self.content = PanelContent::Empty;
        self.axis_on = true;
        self.decorations = Decorations::shown();
        self.background = FACE;
    }

    pub(crate) fn show_image(&mut self, img: RgbImage) {
        self.content = PanelContent::Image(img);
    }

    /// Blank the panel after its image failed to load: previous image gone,
    /// every spine hidden, no tick marks, no tick labels. The title is kept
    /// so the panel can still be identified.
    pub(crate) fn set_placeholder(&mut self, background: Option<Rgb<u8>>) {
        self.clear();
        self.decorations = Decorations::hidden();
        if let Some(color) = background {
            self.background = color;
        }
    }

    /// Top edge of the drawn title, or `None` when untitled
    pub(crate) fn title_top(&self) -> Option<u32> {
        if self.title.is_empty() {
            return None;
        }
        let gap = line_height(self.text_scale) - text_height(self.text_scale);
        Some(
            self.rect
                .y
                .saturating_sub(gap + text_height(self.text_scale)),
        )
    }

    pub(crate) fn draw(&self, canvas: &mut RgbImage) {
        if self.axis_on {
            self.fill(canvas, self.background);
        }
        if let PanelContent::Image(img) = &self.content {
            self.draw_image(canvas, img);
        }
        if let Some(top) = self.title_top() {
            draw_text_centered(
                canvas,
                self.rect.center_x(),
                top,
                &self.title,
                self.text_scale,
                INK,
            );
        }
    }

    fn fill(&self, canvas: &mut RgbImage, color: Rgb<u8>) {
        let r = self.rect;
        if r.w == 0 || r.h == 0 {
            return;
        }
        draw_filled_rect_mut(canvas, PixelRect::at(r.x as i32, r.y as i32).of_size(r.w, r.h), color);
    }

    /// Scale to fit, keep aspect ratio, centre in the panel
    fn draw_image(&self, canvas: &mut RgbImage, img: &RgbImage) {
        let (iw, ih) = img.dimensions();
        if iw == 0 || ih == 0 || self.rect.w == 0 || self.rect.h == 0 {
            return;
        }
        let k = f64::min(
            self.rect.w as f64 / iw as f64,
            self.rect.h as f64 / ih as f64,
        );
        let w = ((iw as f64 * k).round() as u32).clamp(1, self.rect.w);
        let h = ((ih as f64 * k).round() as u32).clamp(1, self.rect.h);
        let x = self.rect.x + (self.rect.w - w) / 2;
        let y = self.rect.y + (self.rect.h - h) / 2;

        if (w, h) == (iw, ih) {
            imageops::overlay(canvas, img, x as i64, y as i64);
        } else {
            let scaled = imageops::resize(img, w, h, FilterType::Triangle);
            imageops::overlay(canvas, &scaled, x as i64, y as i64);
        }
    }
}
