use bitflags::bitflags;

use crate::item::Item;
use crate::item::attributes::{
    AttrValue, Attribute, OverlineKind, ShapeOverride, ShowFlags, UnderlineKind,
};
use crate::units::GlyphUnit;

bitflags! {
    /// Underline styles in effect; a run can carry several at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UnderlineSet: u8 {
        const SINGLE = 1 << 0;
        const DOUBLE = 1 << 1;
        const LOW = 1 << 2;
        const ERROR = 1 << 3;
    }
}

impl From<UnderlineKind> for UnderlineSet {
    fn from(kind: UnderlineKind) -> Self {
        match kind {
            UnderlineKind::None => UnderlineSet::empty(),
            UnderlineKind::Single | UnderlineKind::SingleLine => UnderlineSet::SINGLE,
            UnderlineKind::Double | UnderlineKind::DoubleLine => UnderlineSet::DOUBLE,
            UnderlineKind::Low => UnderlineSet::LOW,
            UnderlineKind::Error | UnderlineKind::ErrorLine => UnderlineSet::ERROR,
        }
    }
}

/// Flattened view of an item's extra attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemProperties {
    pub underline: UnderlineSet,
    pub strikethrough: bool,
    pub overline: bool,
    pub rise: GlyphUnit,
    pub letter_spacing: GlyphUnit,
    pub shape: Option<ShapeOverride>,
    pub show: ShowFlags,
}

impl ItemProperties {
    /// Fold `item`'s extra attributes. Later attributes override earlier
    /// ones except for underlines, which accumulate.
    pub fn from_item(item: &Item) -> Self {
        Self::from_attrs(&item.analysis.extra_attrs)
    }

    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut props = ItemProperties::default();
        for attr in attrs {
            match attr.value {
                AttrValue::Underline(kind) => props.underline |= UnderlineSet::from(kind),
                AttrValue::Overline(kind) => props.overline = kind == OverlineKind::Single,
                AttrValue::Strikethrough(on) => props.strikethrough = on,
                AttrValue::Rise(rise) => props.rise = rise,
                AttrValue::LetterSpacing(spacing) => props.letter_spacing = spacing,
                AttrValue::Shape(shape) => props.shape = Some(shape),
                AttrValue::Show(flags) => props.show = flags,
            }
        }
        props
    }
}
