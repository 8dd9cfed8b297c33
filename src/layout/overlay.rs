//! Overlay layout shared by the exporter and the live preview.
//!
//! Everything here is a pure function of the canvas size and the overlay
//! parameters; font metrics only enter later, when a renderer turns a line
//! centre into a baseline.

use kurbo::Point;

use crate::{
    composition::model::TextOverlaySpec,
    foundation::error::PostcraftResult,
};

/// Base font size as a fraction of the canvas width.
pub const FONT_SIZE_RATIO: f64 = 0.08;
/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;

/// One line of the overlay and where its em-box centre lands.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LineSlot {
    /// Zero-based line number.
    pub index: usize,
    /// Line content without the line terminator; may be empty.
    pub text: String,
    /// Horizontal and vertical centre of the line, in canvas pixels.
    pub center: Point,
}

impl LineSlot {
    /// True for blank lines, which occupy height but draw nothing.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Resolved geometry of a multi-line overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayLayout {
    /// Font size in canvas pixels.
    pub font_size: f64,
    /// Distance between consecutive line centres.
    pub line_height: f64,
    /// The percentage anchor resolved to canvas pixels.
    pub anchor: Point,
    /// Lines in drawing order. Empty when the overlay has no text.
    pub lines: Vec<LineSlot>,
    /// Top edge of the block (`anchor.y - n * line_height / 2`).
    pub block_top: f64,
    /// Bottom edge of the block (`anchor.y + n * line_height / 2`).
    pub block_bottom: f64,
}

impl OverlayLayout {
    /// Vertical extent of the block.
    pub fn block_height(&self) -> f64 {
        self.block_bottom - self.block_top
    }
}

/// Split overlay text into lines. Empty segments are kept; a trailing `\r` is dropped.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

/// Lay out `overlay` on a `width` x `height` canvas.
pub fn plan_overlay(width: u32, height: u32, overlay: &TextOverlaySpec) -> PostcraftResult<OverlayLayout> {
    overlay.validate()?;

    let w = f64::from(width);
    let h = f64::from(height);
    let font_size = w * FONT_SIZE_RATIO * overlay.font_scale;
    let line_height = font_size * LINE_HEIGHT_RATIO;
    let anchor = Point::new(w * overlay.horizontal_pos / 100.0, h * overlay.vertical_pos / 100.0);

    let texts = split_lines(&overlay.text);
    let n = texts.len() as f64;
    let start_y = anchor.y - (n * line_height) / 2.0 + line_height / 2.0;

    let lines = texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| LineSlot {
            index,
            text: text.to_owned(),
            center: Point::new(anchor.x, start_y + index as f64 * line_height),
        })
        .collect();

    Ok(OverlayLayout {
        font_size,
        line_height,
        anchor,
        lines,
        block_top: anchor.y - n * line_height / 2.0,
        block_bottom: anchor.y + n * line_height / 2.0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/overlay.rs"]
mod tests;
