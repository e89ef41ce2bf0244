//! Attributes attached to byte ranges of a paragraph.
//!
//! Only the attributes that affect shaping and line metrics are modelled.
//! [`AttrList`] is a minimal in-memory store; anything that can produce
//! ranges and attributes can stand in for it through [`AttrIterator`].

use bitflags::bitflags;

use crate::units::{GlyphUnit, Rectangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnderlineKind {
    #[default]
    None,
    Single,
    Double,
    /// Below the descenders.
    Low,
    /// Spelling-error squiggle.
    Error,
    SingleLine,
    DoubleLine,
    ErrorLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlineKind {
    #[default]
    None,
    Single,
}

bitflags! {
    /// Which invisible characters are rendered as visible glyphs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShowFlags: u8 {
        const SPACES = 1 << 0;
        const LINE_BREAKS = 1 << 1;
        const IGNORABLES = 1 << 2;
    }
}

/// Replacement geometry for a run that is drawn by the caller (inline images,
/// widgets) instead of being shaped. Each character takes one `logical`
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShapeOverride {
    pub ink: Rectangle,
    pub logical: Rectangle,
}

impl ShapeOverride {
    /// Ink and logical extents of `n_chars` copies laid side by side.
    pub fn extents(&self, n_chars: usize) -> (Rectangle, Rectangle) {
        if n_chars == 0 {
            return (Rectangle::default(), Rectangle::default());
        }
        let extra = self.logical.width * (n_chars as i32 - 1);
        let spread = |rect: Rectangle| {
            Rectangle::new(
                rect.x.min(rect.x + extra),
                rect.y,
                rect.width.max(rect.width + extra),
                rect.height,
            )
        };
        (spread(self.ink), spread(self.logical))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrValue {
    Underline(UnderlineKind),
    Overline(OverlineKind),
    Strikethrough(bool),
    /// Baseline displacement, positive upward.
    Rise(GlyphUnit),
    LetterSpacing(GlyphUnit),
    Shape(ShapeOverride),
    Show(ShowFlags),
}

/// An attribute value applied to the byte range `[start_index, end_index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub value: AttrValue,
    pub start_index: usize,
    pub end_index: usize,
}

impl Attribute {
    pub fn new(value: AttrValue, start_index: usize, end_index: usize) -> Self {
        Self {
            value,
            start_index,
            end_index,
        }
    }

    /// Attribute covering all text.
    pub fn everywhere(value: AttrValue) -> Self {
        Self::new(value, 0, usize::MAX)
    }
}

/// Forward-only cursor over ranges of constant attributes.
pub trait AttrIterator {
    /// Byte range `[start, end)` of the current segment.
    fn range(&self) -> (usize, usize);

    /// Attributes in effect over the current segment.
    fn attrs(&self) -> Vec<Attribute>;

    /// Move to the next segment. Returns false, leaving the cursor in
    /// place, when there is none.
    fn advance(&mut self) -> bool;
}

/// Attributes sorted by start index.
#[derive(Debug, Clone, Default)]
pub struct AttrList {
    attrs: Vec<Attribute>,
}

impl AttrList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert after any attributes with the same start index.
    pub fn insert(&mut self, attr: Attribute) {
        let pos = self
            .attrs
            .partition_point(|existing| existing.start_index <= attr.start_index);
        self.attrs.insert(pos, attr);
    }

    /// Insert before any attributes with the same start index.
    pub fn insert_before(&mut self, attr: Attribute) {
        let pos = self
            .attrs
            .partition_point(|existing| existing.start_index < attr.start_index);
        self.attrs.insert(pos, attr);
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> AttrListIter<'_> {
        let mut bounds: Vec<usize> = Vec::with_capacity(self.attrs.len() * 2 + 2);
        bounds.push(0);
        bounds.push(usize::MAX);
        for attr in &self.attrs {
            bounds.push(attr.start_index);
            bounds.push(attr.end_index);
        }
        bounds.sort_unstable();
        bounds.dedup();
        AttrListIter {
            list: self,
            bounds,
            segment: 0,
        }
    }
}

/// Segments an [`AttrList`] at every attribute boundary.
#[derive(Debug, Clone)]
pub struct AttrListIter<'a> {
    list: &'a AttrList,
    bounds: Vec<usize>,
    segment: usize,
}

impl AttrIterator for AttrListIter<'_> {
    fn range(&self) -> (usize, usize) {
        (self.bounds[self.segment], self.bounds[self.segment + 1])
    }

    fn attrs(&self) -> Vec<Attribute> {
        let start = self.bounds[self.segment];
        self.list
            .attrs
            .iter()
            .filter(|attr| attr.start_index <= start && attr.end_index > start)
            .copied()
            .collect()
    }

    fn advance(&mut self) -> bool {
        if self.segment + 2 >= self.bounds.len() {
            return false;
        }
        self.segment += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rectangle {
        Rectangle::new(GlyphUnit(x), GlyphUnit(y), GlyphUnit(w), GlyphUnit(h))
    }

    #[test]
    fn insert_keeps_start_order() {
        let mut list = AttrList::new();
        list.insert(Attribute::new(AttrValue::Strikethrough(true), 5, 9));
        list.insert(Attribute::new(AttrValue::Rise(GlyphUnit(3)), 0, 4));
        list.insert(Attribute::new(AttrValue::Strikethrough(false), 5, 6));
        list.insert_before(Attribute::new(AttrValue::Rise(GlyphUnit(1)), 5, 7));

        let values: Vec<AttrValue> = list.attrs().iter().map(|a| a.value).collect();
        assert_eq!(
            values,
            vec![
                AttrValue::Rise(GlyphUnit(3)),
                AttrValue::Rise(GlyphUnit(1)),
                AttrValue::Strikethrough(true),
                AttrValue::Strikethrough(false),
            ]
        );
    }

    #[test]
    fn iterator_segments_at_boundaries() {
        let mut list = AttrList::new();
        list.insert(Attribute::new(AttrValue::Strikethrough(true), 2, 6));
        list.insert(Attribute::new(AttrValue::Rise(GlyphUnit(7)), 4, 10));

        let mut iter = list.iter();
        let mut seen = Vec::new();
        loop {
            seen.push((iter.range(), iter.attrs().len()));
            if !iter.advance() {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                ((0, 2), 0),
                ((2, 4), 1),
                ((4, 6), 2),
                ((6, 10), 1),
                ((10, usize::MAX), 0),
            ]
        );
    }

    #[test]
    fn empty_list_has_one_segment() {
        let list = AttrList::new();
        let mut iter = list.iter();
        assert_eq!(iter.range(), (0, usize::MAX));
        assert!(iter.attrs().is_empty());
        assert!(!iter.advance());
    }

    #[test]
    fn shape_override_extents_repeat_logical_width() {
        let shape = ShapeOverride {
            ink: rect(0, -8, 6, 8),
            logical: rect(0, -10, 10, 12),
        };
        let (ink, logical) = shape.extents(3);
        assert_eq!(ink, rect(0, -8, 26, 8));
        assert_eq!(logical, rect(0, -10, 30, 12));
        assert_eq!(shape.extents(0), (Rectangle::default(), Rectangle::default()));
    }
}
