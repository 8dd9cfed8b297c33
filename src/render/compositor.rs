use image::RgbaImage;

use crate::{
    assets::{encode::encode_jpeg, fonts::FontBook, text::TextLayoutEngine},
    composition::model::{
        CompositionResult, EXPORT_JPEG_QUALITY, EncodedRaster, FilterSpec, NormalizedImage,
        TextOverlaySpec,
    },
    effects::filter::apply_filter,
    foundation::error::{PostcraftError, PostcraftResult},
    layout::overlay::plan_overlay,
    render::text::{LayerPainter, PlacedLine, draw_design_line},
};

/// Export renderer: filter, text overlay and JPEG encoding.
///
/// Holds shaped-font state so repeated exports reuse registered faces. Output
/// depends only on the arguments of [`Compositor::compose`] and the fonts the
/// compositor was built with.
pub struct Compositor {
    engine: TextLayoutEngine,
}

impl Compositor {
    /// Build a compositor drawing with `fonts`.
    pub fn new(fonts: &FontBook) -> PostcraftResult<Self> {
        Ok(Self {
            engine: TextLayoutEngine::new(fonts)?,
        })
    }

    /// Render and encode one export at quality 80.
    #[tracing::instrument(
        skip_all,
        fields(
            width = image.width(),
            height = image.height(),
            filter = ?filter,
            design = ?overlay.design,
        )
    )]
    pub fn compose(
        &mut self,
        image: &NormalizedImage,
        filter: FilterSpec,
        overlay: &TextOverlaySpec,
    ) -> PostcraftResult<CompositionResult> {
        let pixels = self.render(image, filter, overlay)?;
        let jpeg = encode_jpeg(&pixels, EXPORT_JPEG_QUALITY)?;
        tracing::debug!(jpeg_len = jpeg.len(), "encoded composition");

        Ok(CompositionResult(EncodedRaster {
            width: pixels.width(),
            height: pixels.height(),
            quality: EXPORT_JPEG_QUALITY,
            jpeg,
            pixels,
        }))
    }

    /// Composited raster without encoding.
    pub fn render(
        &mut self,
        image: &NormalizedImage,
        filter: FilterSpec,
        overlay: &TextOverlaySpec,
    ) -> PostcraftResult<RgbaImage> {
        overlay.validate()?;
        let (width, height) = (image.width(), image.height());
        let (Ok(w16), Ok(h16)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(PostcraftError::validation(format!(
                "canvas {width}x{height} exceeds the renderer limit"
            )));
        };

        let mut canvas = apply_filter(image.pixels(), filter);
        if overlay.is_empty() {
            return Ok(canvas);
        }

        let layout = plan_overlay(width, height, overlay)?;
        let face = overlay.design.face();
        tracing::debug!(
            lines = layout.lines.len(),
            font_size = layout.font_size,
            ?face,
            "laid out overlay"
        );

        let mut placed = Vec::with_capacity(layout.lines.len());
        for slot in layout.lines.iter().filter(|s| !s.is_blank()) {
            let shaped = self
                .engine
                .shape_line(face, &slot.text, layout.font_size as f32)?;
            tracing::trace!(
                line = slot.index,
                glyphs = shaped.glyph_count(),
                width = shaped.width,
                "shaped line"
            );
            placed.push(PlacedLine::centered(shaped, slot.center));
        }

        let mut painter = LayerPainter::new(&mut canvas, w16, h16);
        for line in &placed {
            draw_design_line(&mut painter, line, overlay, layout.font_size)?;
        }
        Ok(canvas)
    }
}

/// One-shot export: build a [`Compositor`] for `fonts` and compose once.
pub fn compose(
    fonts: &FontBook,
    image: &NormalizedImage,
    filter: FilterSpec,
    overlay: &TextOverlaySpec,
) -> PostcraftResult<CompositionResult> {
    Compositor::new(fonts)?.compose(image, filter, overlay)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
