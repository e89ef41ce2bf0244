use crate::units::{GlyphUnit, Rectangle};

/// Font-wide metrics in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Ascent above baseline (positive).
    pub ascent: f32,
    /// Descent below baseline (positive).
    pub descent: f32,
    pub line_gap: f32,
    pub units_per_em: u16,
}

impl FontMetrics {
    /// Pixels per font unit at `font_size` pixels per em.
    pub fn scale_factor(&self, font_size: f32) -> f32 {
        if self.units_per_em != 0 {
            font_size / self.units_per_em as f32
        } else {
            1.0
        }
    }

    pub fn scale_to_pixels(&self, font_size: f32) -> ScaledFontMetrics {
        let scale = self.scale_factor(font_size);
        ScaledFontMetrics {
            ascent: GlyphUnit::from_f32(self.ascent * scale),
            descent: GlyphUnit::from_f32(self.descent * scale),
            line_gap: GlyphUnit::from_f32(self.line_gap * scale),
        }
    }

    /// Convert a distance in font units to glyph units.
    pub fn to_glyph_units(&self, font_units: i32, font_size: f32) -> GlyphUnit {
        GlyphUnit::from_f32(font_units as f32 * self.scale_factor(font_size))
    }
}

/// Font metrics at a given size, in glyph units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaledFontMetrics {
    pub ascent: GlyphUnit,
    pub descent: GlyphUnit,
    pub line_gap: GlyphUnit,
}

impl ScaledFontMetrics {
    /// Logical rectangle of a glyph with the given advance: from the
    /// ascent line down to the descent line.
    pub fn logical_rect(&self, advance: GlyphUnit) -> Rectangle {
        Rectangle::new(
            GlyphUnit::ZERO,
            -self.ascent,
            advance,
            self.ascent + self.descent,
        )
    }
}
