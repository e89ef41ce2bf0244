//! Font capabilities used by shaping.
//!
//! The core only ever talks to the [`Font`] trait. [`ScaledFont`] is the
//! concrete implementation on top of `swash` (metrics, outlines) and
//! `harfrust` (shaping).

pub mod face;
pub mod metrics;
pub mod scaled;

pub use face::FontFace;
pub use metrics::{FontMetrics, ScaledFontMetrics};
pub use scaled::ScaledFont;

use core::fmt;

use crate::item::Analysis;
use crate::shaping::{Glyph, GlyphString, ShapeFlags};
use crate::units::{GlyphUnit, Rectangle};

/// Errors that can occur while loading fonts.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid font data")]
    InvalidFont,
}

/// Width of the box drawn for an unknown glyph when no font is available,
/// in device units.
pub const UNKNOWN_GLYPH_WIDTH: i32 = 10;
/// Height of the unknown-glyph box, in device units.
pub const UNKNOWN_GLYPH_HEIGHT: i32 = 14;

/// Ink and logical rectangles of one glyph, relative to its origin on the
/// baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphExtents {
    pub ink: Rectangle,
    pub logical: Rectangle,
}

impl GlyphExtents {
    /// Box used for unknown glyphs without a font.
    pub fn unknown_default() -> Self {
        let width = GlyphUnit::from_device_units(UNKNOWN_GLYPH_WIDTH);
        let height = GlyphUnit::from_device_units(UNKNOWN_GLYPH_HEIGHT);
        let rect = Rectangle::new(GlyphUnit::ZERO, -height, width, height);
        Self {
            ink: rect,
            logical: rect,
        }
    }

    /// Extents of `glyph` in `font`, or the default unknown box.
    pub fn of(font: Option<&dyn Font>, glyph: Glyph) -> Self {
        match font {
            Some(font) => font.glyph_extents(glyph),
            None if glyph == Glyph::EMPTY => Self::default(),
            None => Self::unknown_default(),
        }
    }
}

/// Inputs to one shaping call.
#[derive(Clone, Copy)]
pub struct ShapeRequest<'a> {
    /// The run's own text.
    pub item_text: &'a str,
    /// The whole paragraph, for context across run boundaries.
    pub paragraph_text: &'a str,
    /// Byte offset of `item_text` within `paragraph_text`.
    pub item_offset: usize,
    pub analysis: &'a Analysis,
    pub flags: ShapeFlags,
}

impl fmt::Debug for ShapeRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeRequest")
            .field("item_text", &self.item_text)
            .field("item_offset", &self.item_offset)
            .field("level", &self.analysis.level)
            .field("flags", &self.flags)
            .finish()
    }
}

impl<'a> ShapeRequest<'a> {
    /// Paragraph text before the run.
    pub fn pre_context(&self) -> &'a str {
        self.paragraph_text.get(..self.item_offset).unwrap_or("")
    }

    /// Paragraph text after the run.
    pub fn post_context(&self) -> &'a str {
        self.paragraph_text
            .get(self.item_offset + self.item_text.len()..)
            .unwrap_or("")
    }
}

/// A font at a fixed size, as seen by the shaper.
pub trait Font: fmt::Debug + Send + Sync {
    /// Extents of a glyph. Unknown glyphs should report the box the
    /// renderer draws for them.
    fn glyph_extents(&self, glyph: Glyph) -> GlyphExtents;

    /// Shape a run. An empty result makes the caller fall back to one
    /// placeholder glyph per character.
    fn shape(&self, request: &ShapeRequest<'_>) -> GlyphString {
        let _ = request;
        GlyphString::new()
    }
}
