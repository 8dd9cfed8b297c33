//! Per-design text recipes.
//!
//! Every draw goes into its own transparent premultiplied layer which is then
//! composited onto the canvas, matching how a 2D canvas applies `shadow*`
//! state: the shadow of a draw lands first, the draw itself on top.

use kurbo::{Affine, Point, Vec2};

use crate::{
    assets::text::ShapedLine,
    composition::model::{Design, TextOverlaySpec},
    effects::{
        blur::{GaussianKernel, blur_premul_in_place},
        composite::over_in_place,
    },
    foundation::{core::Rgba8, error::PostcraftResult},
};

/// Stroke width of the Pop outline as a fraction of the font size.
pub const POP_STROKE_RATIO: f64 = 0.15;

/// Canvas-style drop shadow parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropShadow {
    /// Shadow colour; its alpha scales the drawn coverage.
    pub color: Rgba8,
    /// Canvas `shadowBlur` (sigma is half of it).
    pub blur: f32,
    /// Shadow offset in pixels.
    pub offset: Vec2,
}

impl DropShadow {
    /// Standard / Serif / Impact shadow in `color`.
    pub fn standard(color: Rgba8) -> Self {
        Self {
            color,
            blur: 10.0,
            offset: Vec2::new(2.0, 2.0),
        }
    }

    /// Soft shadow under the Pop fill.
    pub fn pop() -> Self {
        Self {
            color: Rgba8::new(0, 0, 0, 51),
            blur: 5.0,
            offset: Vec2::new(3.0, 3.0),
        }
    }

    /// Neon glow in the fill colour.
    pub fn neon(color: Rgba8) -> Self {
        Self {
            color,
            blur: 15.0,
            offset: Vec2::ZERO,
        }
    }

    fn is_visible(&self) -> bool {
        self.color.a != 0 && (self.blur > 0.0 || self.offset != Vec2::ZERO)
    }
}

/// How glyph outlines are painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ink {
    /// Fill the outlines.
    Fill,
    /// Stroke the outlines with round joins at this width.
    Stroke(f64),
}

/// A shaped line and where its baseline starts on the canvas.
#[derive(Clone, Debug)]
pub struct PlacedLine {
    /// Glyphs to draw.
    pub shaped: ShapedLine,
    /// Left end of the baseline in canvas pixels.
    pub origin: Point,
}

impl PlacedLine {
    /// Centre `shaped` horizontally on `center.x` and its em box vertically on `center.y`.
    pub fn centered(shaped: ShapedLine, center: Point) -> Self {
        let origin = Point::new(
            center.x - f64::from(shaped.width) / 2.0,
            center.y + f64::from(shaped.middle_baseline_offset()),
        );
        Self { shaped, origin }
    }
}

/// Draws glyph layers onto one premultiplied RGBA8 canvas.
pub struct LayerPainter<'a> {
    canvas: &'a mut [u8],
    width: u16,
    height: u16,
}

impl<'a> LayerPainter<'a> {
    /// Wrap a `width * height * 4` premultiplied canvas.
    pub fn new(canvas: &'a mut [u8], width: u16, height: u16) -> Self {
        Self {
            canvas,
            width,
            height,
        }
    }

    /// Draw `line` with `ink` in `color`, preceded by `shadow` when it is visible.
    pub fn draw(
        &mut self,
        line: &PlacedLine,
        ink: Ink,
        color: Rgba8,
        shadow: Option<DropShadow>,
    ) -> PostcraftResult<()> {
        if let Some(shadow) = shadow.filter(DropShadow::is_visible) {
            let mut layer = self.rasterize(line, shadow.offset, ink, shadow.color);
            if let Some(kernel) = GaussianKernel::for_shadow(shadow.blur)? {
                blur_premul_in_place(&mut layer, self.width.into(), self.height.into(), &kernel)?;
            }
            over_in_place(self.canvas, &layer, 1.0)?;
        }
        let layer = self.rasterize(line, Vec2::ZERO, ink, color);
        over_in_place(self.canvas, &layer, 1.0)
    }

    fn rasterize(&self, line: &PlacedLine, offset: Vec2, ink: Ink, color: Rgba8) -> Vec<u8> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(Affine::translate(line.origin.to_vec2() + offset));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        if let Ink::Stroke(width) = ink {
            ctx.set_stroke(kurbo::Stroke::new(width).with_join(kurbo::Join::Round));
        }

        for run in &line.shaped.runs {
            let glyphs = run.glyphs.iter().copied();
            let builder = ctx.glyph_run(&run.font).font_size(run.font_size);
            match ink {
                Ink::Fill => builder.fill_glyphs(glyphs),
                Ink::Stroke(_) => builder.stroke_glyphs(glyphs),
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        pixmap.data_as_u8_slice().to_vec()
    }
}

/// Paint one line in the style of `overlay.design`.
pub fn draw_design_line(
    painter: &mut LayerPainter<'_>,
    line: &PlacedLine,
    overlay: &TextOverlaySpec,
    font_size: f64,
) -> PostcraftResult<()> {
    let fill = Rgba8::from(overlay.color);
    match overlay.design {
        Design::Standard | Design::Serif | Design::Impact => painter.draw(
            line,
            Ink::Fill,
            fill,
            Some(DropShadow::standard(overlay.shadow_color)),
        ),
        Design::Pop => {
            painter.draw(
                line,
                Ink::Stroke(POP_STROKE_RATIO * font_size),
                Rgba8::new(255, 255, 255, 255),
                None,
            )?;
            painter.draw(line, Ink::Fill, fill, Some(DropShadow::pop()))
        }
        Design::Neon => {
            painter.draw(line, Ink::Fill, fill, Some(DropShadow::neon(fill)))?;
            painter.draw(line, Ink::Fill, Rgba8::new(255, 255, 255, 255), None)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
