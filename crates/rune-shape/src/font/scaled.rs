use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use swash::GlyphId;
use swash::scale::ScaleContext;

use crate::font::{Font, FontFace, GlyphExtents, ScaledFontMetrics, ShapeRequest};
use crate::shaping::{Glyph, GlyphString, hb_shaper};
use crate::units::{GlyphUnit, Rectangle};

/// A [`FontFace`] at a pixel size.
pub struct ScaledFont {
    face: Arc<FontFace>,
    size: f32,
    metrics: ScaledFontMetrics,
    /// Scaler state reused across extents queries.
    context: Mutex<ScaleContext>,
}

impl fmt::Debug for ScaledFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaledFont")
            .field("face", &self.face)
            .field("size", &self.size)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Clone for ScaledFont {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.face), self.size)
    }
}

impl ScaledFont {
    pub fn new(face: Arc<FontFace>, size: f32) -> Self {
        let metrics = face.metrics().scale_to_pixels(size);
        Self {
            face,
            size,
            metrics,
            context: Mutex::new(ScaleContext::new()),
        }
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Pixels per em.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn metrics(&self) -> ScaledFontMetrics {
        self.metrics
    }

    fn outline_extents(&self, glyph_id: GlyphId) -> GlyphExtents {
        let advance = GlyphUnit::from_f32(self.face.advance_width(glyph_id, self.size));
        let logical = self.metrics.logical_rect(advance);
        let bounds = {
            let mut context = self.context.lock().unwrap_or_else(PoisonError::into_inner);
            self.face.outline_bounds(&mut context, glyph_id, self.size)
        };
        let ink = match bounds {
            Some(bounds) if bounds.max.x > bounds.min.x => {
                let top = GlyphUnit::from_f32(bounds.max.y);
                let bottom = GlyphUnit::from_f32(bounds.min.y);
                let left = GlyphUnit::from_f32(bounds.min.x);
                let right = GlyphUnit::from_f32(bounds.max.x);
                // Outlines are y-up; rectangles are y-down.
                Rectangle::new(left, -top, right - left, top - bottom)
            }
            _ => Rectangle::default(),
        };
        GlyphExtents { ink, logical }
    }
}

impl Font for ScaledFont {
    fn glyph_extents(&self, glyph: Glyph) -> GlyphExtents {
        if glyph == Glyph::EMPTY {
            return GlyphExtents::default();
        }
        if glyph.is_unknown() {
            // Draw unknown glyphs with .notdef when the face has one.
            let notdef = self.outline_extents(0);
            if notdef.logical.width == GlyphUnit::ZERO {
                return GlyphExtents::unknown_default();
            }
            return notdef;
        }
        match GlyphId::try_from(glyph.id()) {
            Ok(glyph_id) => self.outline_extents(glyph_id),
            Err(_) => {
                tracing::warn!(glyph = glyph.id(), "glyph id out of range for font");
                GlyphExtents::unknown_default()
            }
        }
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> GlyphString {
        hb_shaper::shape_with_face(&self.face, self.size, request)
    }
}
