use crate::units::GlyphUnit;

/// Glyph id within a font, or one of the sentinels below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Glyph(pub u32);

impl Glyph {
    /// Renders nothing and takes no space.
    pub const EMPTY: Glyph = Glyph(0x0FFF_FFFF);
    /// Set on ids that stand for a character with no real glyph; the low
    /// bits carry the character.
    pub const UNKNOWN_FLAG: u32 = 0x1000_0000;

    pub const fn new(id: u32) -> Self {
        Glyph(id)
    }

    /// Placeholder box for `ch`.
    pub const fn unknown(ch: char) -> Self {
        Glyph(ch as u32 | Self::UNKNOWN_FLAG)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    pub const fn is_unknown(self) -> bool {
        self.0 & Self::UNKNOWN_FLAG != 0
    }

    /// The character an unknown glyph stands for.
    pub fn unknown_char(self) -> Option<char> {
        if self.is_unknown() {
            char::from_u32(self.0 & !Self::UNKNOWN_FLAG)
        } else {
            None
        }
    }
}

/// Positioning of one glyph. Offsets are relative to the pen position;
/// `width` is the advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphGeometry {
    pub width: GlyphUnit,
    pub x_offset: GlyphUnit,
    /// Positive moves the glyph down.
    pub y_offset: GlyphUnit,
}

impl GlyphGeometry {
    pub fn with_width(width: GlyphUnit) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn round(&mut self) {
        self.width = self.width.round_to_device_unit();
        self.x_offset = self.x_offset.round_to_device_unit();
        self.y_offset = self.y_offset.round_to_device_unit();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphInfo {
    pub glyph: Glyph,
    pub geometry: GlyphGeometry,
    /// First glyph of its cluster in storage order.
    pub is_cluster_start: bool,
}

impl GlyphInfo {
    pub fn new(glyph: Glyph, width: GlyphUnit) -> Self {
        Self {
            glyph,
            geometry: GlyphGeometry::with_width(width),
            is_cluster_start: false,
        }
    }
}
