//! Runs of text that share one shaping context.

pub mod analysis;
pub mod attributes;
pub mod properties;

pub use analysis::{Analysis, AnalysisFlags, Gravity};
pub use attributes::{
    AttrIterator, AttrList, AttrListIter, AttrValue, Attribute, OverlineKind, ShapeOverride,
    ShowFlags, UnderlineKind,
};
pub use properties::{ItemProperties, UnderlineSet};

use crate::error::{Result, ShapeError};

/// A maximal run of paragraph text sharing one [`Analysis`].
///
/// `offset` and `length` are byte positions in the paragraph text.
#[derive(Debug, Clone, Default)]
pub struct Item {
    pub offset: usize,
    pub length: usize,
    pub num_chars: usize,
    pub analysis: Analysis,
}

impl Item {
    /// Create an item over `text[offset..offset + length]`.
    pub fn new(text: &str, offset: usize, length: usize, analysis: Analysis) -> Result<Self> {
        let slice = offset
            .checked_add(length)
            .and_then(|end| text.get(offset..end))
            .ok_or_else(|| {
                ShapeError::invalid(format!(
                    "item range {offset}..{} is not a character range of the text",
                    offset.saturating_add(length)
                ))
            })?;
        Ok(Self {
            offset,
            length,
            num_chars: slice.chars().count(),
            analysis,
        })
    }

    /// Byte offset one past the item's last byte.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// The item's slice of the paragraph text.
    pub fn text<'t>(&self, paragraph: &'t str) -> Option<&'t str> {
        paragraph.get(self.offset..self.end())
    }

    pub fn properties(&self) -> ItemProperties {
        ItemProperties::from_item(self)
    }

    /// Merge every attribute whose range overlaps the item into its
    /// analysis.
    ///
    /// `iter` must be positioned at or before the item's start. It is left
    /// on the segment containing the item's last byte, or past the item if
    /// a segment starts beyond it.
    pub fn apply_attrs<I: AttrIterator + ?Sized>(&mut self, iter: &mut I) {
        let item_end = self.end();
        let mut collected: Vec<Attribute> = Vec::new();

        loop {
            let (start, end) = iter.range();
            if start >= item_end {
                break;
            }
            if end > self.offset {
                for attr in iter.attrs() {
                    if !collected.contains(&attr) && !self.analysis.extra_attrs.contains(&attr) {
                        collected.push(attr);
                    }
                }
            }
            if end >= item_end || !iter.advance() {
                break;
            }
        }

        self.analysis.extra_attrs.extend(collected);
    }

    /// Split off the leading `split_index` bytes (`split_offset` chars) as a
    /// new item; `self` keeps the remainder.
    pub fn split(&mut self, split_index: usize, split_offset: usize) -> Result<Item> {
        if split_index == 0 || split_index >= self.length {
            return Err(ShapeError::invalid(format!(
                "split index {split_index} outside 1..{}",
                self.length
            )));
        }
        if split_offset == 0 || split_offset >= self.num_chars {
            return Err(ShapeError::invalid(format!(
                "split offset {split_offset} outside 1..{}",
                self.num_chars
            )));
        }

        let mut head = self.clone();
        head.length = split_index;
        head.num_chars = split_offset;

        self.offset += split_index;
        self.length -= split_index;
        self.num_chars -= split_offset;
        Ok(head)
    }
}
