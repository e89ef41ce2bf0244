#![allow(dead_code)]

use std::sync::Arc;

use rune_shape::font::{Font, GlyphExtents, ShapeRequest};
use rune_shape::item::{Analysis, Item};
use rune_shape::shaping::{Glyph, GlyphGeometry, GlyphInfo, GlyphString};
use rune_shape::units::{GlyphUnit, Rectangle};

pub fn du(v: i32) -> GlyphUnit {
    GlyphUnit::from_device_units(v)
}

/// Monospaced test font: every glyph is `advance` wide, ascent 12, descent
/// 4. Private-use characters are not covered. With `ligatures`, "fi"
/// becomes one glyph.
#[derive(Debug, Clone)]
pub struct MonoFont {
    pub advance: GlyphUnit,
    pub ligatures: bool,
    /// Emit glyphs in logical order even for RTL runs.
    pub ignore_direction: bool,
}

impl MonoFont {
    pub fn new(advance: i32) -> Arc<dyn Font> {
        Arc::new(Self {
            advance: du(advance),
            ligatures: false,
            ignore_direction: false,
        })
    }

    pub fn with_ligatures(advance: i32) -> Arc<dyn Font> {
        Arc::new(Self {
            advance: du(advance),
            ligatures: true,
            ignore_direction: false,
        })
    }

    pub fn backwards(advance: i32) -> Arc<dyn Font> {
        Arc::new(Self {
            advance: du(advance),
            ligatures: false,
            ignore_direction: true,
        })
    }
}

fn is_private_use(ch: char) -> bool {
    ('\u{E000}'..='\u{F8FF}').contains(&ch)
}

impl Font for MonoFont {
    fn glyph_extents(&self, glyph: Glyph) -> GlyphExtents {
        if glyph == Glyph::EMPTY {
            return GlyphExtents::default();
        }
        GlyphExtents {
            ink: Rectangle::new(du(1), du(-10), self.advance - du(2), du(10)),
            logical: Rectangle::new(GlyphUnit::ZERO, du(-12), self.advance, du(16)),
        }
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> GlyphString {
        if request.item_text.chars().any(is_private_use) {
            return GlyphString::new();
        }
        let mut glyphs = GlyphString::new();
        let mut chars = request.item_text.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            let mut id = ch as u32;
            if self.ligatures && ch == 'f' && chars.peek().map(|(_, next)| *next) == Some('i') {
                chars.next();
                id = 0xFB01;
            }
            glyphs.push(
                GlyphInfo {
                    glyph: Glyph::new(id),
                    geometry: GlyphGeometry::with_width(self.advance),
                    is_cluster_start: false,
                },
                offset,
            );
        }
        if request.analysis.is_rtl() && !self.ignore_direction {
            glyphs.reverse();
        }
        glyphs
    }
}

pub fn analysis(font: &Arc<dyn Font>, level: u8) -> Analysis {
    Analysis {
        level,
        ..Analysis::with_font(font.clone())
    }
}

/// Item covering all of `text`.
pub fn whole_item(text: &str, font: &Arc<dyn Font>, level: u8) -> Item {
    Item {
        offset: 0,
        length: text.len(),
        num_chars: text.chars().count(),
        analysis: analysis(font, level),
    }
}
