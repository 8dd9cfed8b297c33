use std::{borrow::Cow, collections::HashMap};

use crate::{
    assets::fonts::FontBook,
    composition::model::FontFace,
    foundation::error::{PostcraftError, PostcraftResult},
};

/// Glyphs from one font within a shaped line.
#[derive(Clone, Debug)]
pub struct ShapedRun {
    /// Font the glyph ids index into.
    pub font: vello_cpu::peniko::FontData,
    /// Size in pixels.
    pub font_size: f32,
    /// Positions relative to the line origin (left edge, on the baseline).
    pub glyphs: Vec<vello_cpu::Glyph>,
}

/// One shaped line of text.
#[derive(Clone, Debug)]
pub struct ShapedLine {
    /// Advance width in pixels.
    pub width: f32,
    /// Distance from the baseline up to the top of the em box.
    pub ascent: f32,
    /// Distance from the baseline down to the bottom of the em box (positive).
    pub descent: f32,
    /// Glyph runs in visual order.
    pub runs: Vec<ShapedRun>,
}

impl ShapedLine {
    /// Baseline offset that puts the em-box middle at y = 0 (canvas `textBaseline = "middle"`).
    pub fn middle_baseline_offset(&self) -> f32 {
        (self.ascent - self.descent) / 2.0
    }

    /// Total glyph count.
    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|r| r.glyphs.len()).sum()
    }
}

/// Family stack plus the attributes of the registered primary font.
///
/// Faces may share a family name (a bold cut registers under its regular
/// family), so the attributes are what select the right font within it.
#[derive(Clone, Debug)]
struct FaceQuery {
    stack: String,
    weight: parley::style::FontWeight,
    width: parley::style::FontWidth,
    style: parley::style::FontStyle,
}

/// Font registered from one byte buffer.
struct Registered {
    family: String,
    weight: parley::style::FontWeight,
    width: parley::style::FontWidth,
    style: parley::style::FontStyle,
}

/// Shapes single lines with Parley against the faces of a [`FontBook`].
///
/// Fonts are registered once at construction. Only the book's fonts are
/// visible; no system fonts are consulted, so output is stable across hosts.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    stacks: HashMap<FontFace, FaceQuery>,
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl TextLayoutEngine {
    /// Register every face and fallback in `book`.
    pub fn new(book: &FontBook) -> PostcraftResult<Self> {
        let mut font_ctx = parley::FontContext::default();

        let mut fallback_names = Vec::new();
        for bytes in book.fallbacks() {
            let name = register(&mut font_ctx, bytes)?.family;
            if !fallback_names.contains(&name) {
                fallback_names.push(name);
            }
        }

        let mut stacks = HashMap::new();
        for (face, bytes) in book.faces() {
            let primary = register(&mut font_ctx, bytes)?;
            let mut names = vec![primary.family.clone()];
            for name in &fallback_names {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            let stack = names
                .iter()
                .map(|n| format!("\"{}\"", n.replace('"', "")))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::debug!(
                ?face,
                %stack,
                weight = primary.weight.value(),
                width = primary.width.ratio(),
                "registered font stack"
            );
            stacks.insert(
                face,
                FaceQuery {
                    stack,
                    weight: primary.weight,
                    width: primary.width,
                    style: primary.style,
                },
            );
        }

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            stacks,
            font_cache: HashMap::new(),
        })
    }

    /// True when `face` can be shaped.
    pub fn has_face(&self, face: FontFace) -> bool {
        self.stacks.contains_key(&face)
    }

    /// CSS-style family list used for `face`, primary first.
    pub fn font_stack(&self, face: FontFace) -> Option<&str> {
        self.stacks.get(&face).map(|q| q.stack.as_str())
    }

    /// Shape a single line (no wrapping) at `size_px`.
    pub fn shape_line(&mut self, face: FontFace, text: &str, size_px: f32) -> PostcraftResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PostcraftError::validation(
                "text size must be finite and > 0",
            ));
        }
        let query = self
            .stacks
            .get(&face)
            .ok_or_else(|| PostcraftError::font(format!("no font installed for the {face:?} face")))?
            .clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(query.stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(query.weight));
        builder.push_default(parley::style::StyleProperty::FontWidth(query.width));
        builder.push_default(parley::style::StyleProperty::FontStyle(query.style));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut shaped = ShapedLine {
            width: layout.width(),
            ascent: 0.0,
            descent: 0.0,
            runs: Vec::new(),
        };

        for (i, line) in layout.lines().enumerate() {
            let metrics = line.metrics();
            if i == 0 {
                shaped.ascent = metrics.ascent;
                shaped.descent = metrics.descent.abs();
            }
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let font = run.run().font();
                let key = (font.data.id(), font.index);
                let font_data = self
                    .font_cache
                    .entry(key)
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(font.data.data().to_vec()),
                            font.index,
                        )
                    })
                    .clone();

                let glyphs = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y - metrics.baseline,
                    })
                    .collect();
                shaped.runs.push(ShapedRun {
                    font: font_data,
                    font_size: run.run().font_size(),
                    glyphs,
                });
            }
        }

        Ok(shaped)
    }
}

fn register(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> PostcraftResult<Registered> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let (family_id, fonts) = families
        .first()
        .ok_or_else(|| PostcraftError::font("no font families registered from font bytes"))?;
    let family = font_ctx
        .collection
        .family_name(*family_id)
        .ok_or_else(|| PostcraftError::font("registered font family has no name"))?
        .to_string();

    let (weight, width, style) = fonts
        .first()
        .map(|info| (info.weight(), info.width(), info.style()))
        .unwrap_or((
            parley::style::FontWeight::NORMAL,
            parley::style::FontWidth::NORMAL,
            parley::style::FontStyle::Normal,
        ));
    Ok(Registered {
        family,
        weight,
        width,
        style,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
