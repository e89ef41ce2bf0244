use std::sync::Arc;

use swash::scale::ScaleContext;
use swash::zeno::Bounds;
use swash::{FontRef, GlyphId, Metrics};

use crate::font::{FontError, FontMetrics};

/// A font file (TTF/OTF, or one face of a collection) held in memory.
///
/// Owns the bytes and the swash cache key; scaling to a size happens in
/// [`ScaledFont`](crate::font::ScaledFont).
#[derive(Debug, Clone)]
pub struct FontFace {
    data: Arc<[u8]>,
    /// Face index within a collection.
    index: u32,
    /// Offset to the table directory for this face.
    offset: u32,
    key: swash::CacheKey,
    metrics: FontMetrics,
}

impl FontFace {
    pub fn from_bytes(data: Arc<[u8]>, index: u32) -> Result<Self, FontError> {
        let font = FontRef::from_index(&data, index as usize).ok_or(FontError::InvalidFont)?;
        let metrics = metrics_from_swash(&font);
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data,
            index,
            offset,
            key,
            metrics,
        })
    }

    pub fn from_vec(data: Vec<u8>, index: u32) -> Result<Self, FontError> {
        Self::from_bytes(Arc::from(data), index)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>, index: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path)?;
        Self::from_vec(data, index)
    }

    /// Raw font bytes, for handing to harfrust.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Font-wide metrics in font units.
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    pub(crate) fn as_swash_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    /// Horizontal advance of `glyph_id` in pixels at `font_size`.
    pub fn advance_width(&self, glyph_id: GlyphId, font_size: f32) -> f32 {
        self.as_swash_ref()
            .glyph_metrics(&[])
            .scale(font_size)
            .advance_width(glyph_id)
    }

    /// Outline bounds of `glyph_id` in pixels, y up. `None` for glyphs
    /// without an outline (spaces, bitmap-only faces).
    pub fn outline_bounds(
        &self,
        context: &mut ScaleContext,
        glyph_id: GlyphId,
        font_size: f32,
    ) -> Option<Bounds> {
        let mut scaler = context
            .builder(self.as_swash_ref())
            .size(font_size)
            .build();
        scaler.scale_outline(glyph_id).map(|outline| outline.bounds())
    }
}

fn metrics_from_swash(font: &FontRef<'_>) -> FontMetrics {
    let Metrics {
        units_per_em,
        ascent,
        descent,
        leading,
        ..
    } = font.metrics(&[]);

    FontMetrics {
        ascent,
        descent,
        line_gap: leading,
        units_per_em,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage() {
        let err = FontFace::from_vec(vec![0u8; 16], 0).unwrap_err();
        assert!(matches!(err, FontError::InvalidFont));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FontFace::from_path("/nonexistent/font.ttf", 0).unwrap_err();
        assert!(matches!(err, FontError::Io(_)));
    }
}
