//! Approximate live preview expressed as CSS.
//!
//! The preview reuses [`plan_overlay`] so slider changes move text exactly as
//! the export will. Effects are approximations: CSS `text-shadow` and
//! `-webkit-text-stroke` do not render joins and glows identically to the
//! raster path.

use crate::{
    composition::model::{Design, FilterSpec, TextOverlaySpec},
    foundation::{
        core::{Rgb8, Rgba8},
        error::{PostcraftError, PostcraftResult},
    },
    layout::overlay::plan_overlay,
    render::text::{DropShadow, POP_STROKE_RATIO},
};

/// One absolutely positioned preview line.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PreviewLine {
    /// Line content.
    pub text: String,
    /// Line centre from the left edge, in display pixels.
    pub left_px: f64,
    /// Line centre from the top edge, in display pixels.
    pub top_px: f64,
    /// `left_px` as a percentage of the display width.
    pub left_percent: f64,
    /// `top_px` as a percentage of the display height.
    pub top_percent: f64,
}

/// CSS properties approximating one export at display size.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PreviewOverlay {
    /// `filter` for the image element.
    pub filter: String,
    /// `font-family`.
    pub font_family: String,
    /// `font-weight`.
    pub font_weight: u16,
    /// `font-size` in display pixels.
    pub font_size_px: f64,
    /// Distance between line centres in display pixels.
    pub line_height_px: f64,
    /// `color`.
    pub color: String,
    /// `text-shadow`, if the design has one.
    pub text_shadow: Option<String>,
    /// `-webkit-text-stroke`, if the design outlines text.
    pub text_stroke: Option<String>,
    /// `paint-order`, set together with the stroke.
    pub paint_order: Option<String>,
    /// Lines, each centred with `transform: translate(-50%, -50%)`.
    pub lines: Vec<PreviewLine>,
}

impl PreviewOverlay {
    /// Declarations shared by every line, as a `style` attribute value.
    pub fn css_declarations(&self) -> String {
        let mut decls = vec![
            format!("font-family: {}", self.font_family),
            format!("font-weight: {}", self.font_weight),
            format!("font-size: {}px", fmt_px(self.font_size_px)),
            format!("color: {}", self.color),
            "transform: translate(-50%, -50%)".to_owned(),
            "white-space: pre".to_owned(),
        ];
        if let Some(s) = &self.text_shadow {
            decls.push(format!("text-shadow: {s}"));
        }
        if let Some(s) = &self.text_stroke {
            decls.push(format!("-webkit-text-stroke: {s}"));
        }
        if let Some(s) = &self.paint_order {
            decls.push(format!("paint-order: {s}"));
        }
        decls.join("; ")
    }
}

/// Describe the preview of `overlay` over an image shown at `display_width` x `display_height`.
pub fn describe(
    display_width: u32,
    display_height: u32,
    filter: &FilterSpec,
    overlay: &TextOverlaySpec,
) -> PostcraftResult<PreviewOverlay> {
    if display_width == 0 || display_height == 0 {
        return Err(PostcraftError::validation(
            "preview display size must be non-zero",
        ));
    }
    let layout = plan_overlay(display_width, display_height, overlay)?;
    let face = overlay.design.face();
    let (w, h) = (f64::from(display_width), f64::from(display_height));

    let (color, text_shadow, text_stroke) = match overlay.design {
        Design::Standard | Design::Serif | Design::Impact => (
            overlay.color,
            Some(shadow_css(&DropShadow::standard(overlay.shadow_color))),
            None,
        ),
        Design::Pop => (
            overlay.color,
            Some(shadow_css(&DropShadow::pop())),
            Some(format!(
                "{}px #ffffff",
                fmt_px(POP_STROKE_RATIO * layout.font_size)
            )),
        ),
        Design::Neon => (
            Rgb8::WHITE,
            Some(shadow_css(&DropShadow::neon(Rgba8::from(overlay.color)))),
            None,
        ),
    };
    let paint_order = text_stroke.as_ref().map(|_| "stroke fill".to_owned());

    let lines = layout
        .lines
        .iter()
        .map(|slot| PreviewLine {
            text: slot.text.clone(),
            left_px: slot.center.x,
            top_px: slot.center.y,
            left_percent: slot.center.x / w * 100.0,
            top_percent: slot.center.y / h * 100.0,
        })
        .collect();

    Ok(PreviewOverlay {
        filter: filter.css().to_owned(),
        font_family: face.css_generic().to_owned(),
        font_weight: face.css_weight(),
        font_size_px: layout.font_size,
        line_height_px: layout.line_height,
        color: color.to_hex(),
        text_shadow,
        text_stroke,
        paint_order,
        lines,
    })
}

fn shadow_css(s: &DropShadow) -> String {
    format!(
        "{}px {}px {}px {}",
        fmt_px(s.offset.x),
        fmt_px(s.offset.y),
        fmt_px(f64::from(s.blur)),
        s.color.to_css()
    )
}

fn fmt_px(v: f64) -> String {
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/preview/css.rs"]
mod tests;
