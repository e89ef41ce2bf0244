use std::sync::Arc;

use bitflags::bitflags;
use unicode_script::Script;

use crate::font::Font;
use crate::item::attributes::Attribute;

/// Glyph orientation. `South` is ordinary horizontal text; the others rotate
/// the baseline for vertical writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gravity {
    #[default]
    South,
    East,
    North,
    West,
    /// Pick a gravity from context. Treated as `South` by the line code.
    Auto,
}

impl Gravity {
    pub fn is_vertical(self) -> bool {
        matches!(self, Gravity::East | Gravity::West)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AnalysisFlags: u8 {
        /// Glyphs are centered on the baseline (vertical text).
        const CENTERED_BASELINE = 1 << 0;
        /// The run is an inserted ellipsis.
        const IS_ELLIPSIS = 1 << 1;
        /// A hyphen should be rendered at the end of the run.
        const NEED_HYPHEN = 1 << 2;
    }
}

/// Everything the shaper needs to know about a run besides its text.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub font: Option<Arc<dyn Font>>,
    /// Bidi embedding level; odd levels are RTL.
    pub level: u8,
    pub gravity: Gravity,
    pub flags: AnalysisFlags,
    pub script: Script,
    /// BCP-47 language tag.
    pub language: Option<String>,
    /// Attributes that did not take part in segmentation, in application
    /// order.
    pub extra_attrs: Vec<Attribute>,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            font: None,
            level: 0,
            gravity: Gravity::South,
            flags: AnalysisFlags::empty(),
            script: Script::Unknown,
            language: None,
            extra_attrs: Vec::new(),
        }
    }
}

impl Analysis {
    pub fn with_font(font: Arc<dyn Font>) -> Self {
        Self {
            font: Some(font),
            ..Self::default()
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.level & 1 == 1
    }
}
