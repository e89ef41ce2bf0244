//! Walking the clusters of a shaped run in logical order.
//!
//! Glyphs are stored in visual order, so for an RTL run the first logical
//! cluster sits at the end of the glyph string. [`GlyphItemIter`] hides
//! that: `next_cluster` always moves forward through the text.

use crate::error::{Result, ShapeError};
use crate::shaping::glyph_item::GlyphItem;

/// Position of an iterator: the current cluster spans glyphs
/// `start_glyph..end_glyph` (walking down for RTL), bytes
/// `start_index..end_index` of the paragraph, and characters
/// `start_char..end_char` of the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClusterSpan {
    pub start_glyph: isize,
    pub start_index: usize,
    pub start_char: usize,
    pub end_glyph: isize,
    pub end_index: usize,
    pub end_char: usize,
}

/// Cluster cursor over a [`GlyphItem`].
///
/// Borrows the item and the paragraph text; holds indices only.
#[derive(Debug, Clone)]
pub struct GlyphItemIter<'a> {
    glyph_item: &'a GlyphItem,
    text: &'a str,
    span: ClusterSpan,
}

impl<'a> GlyphItemIter<'a> {
    /// `text` is the paragraph the item was shaped from; it must contain
    /// the item's byte range.
    pub fn new(glyph_item: &'a GlyphItem, text: &'a str) -> Result<Self> {
        let item = &glyph_item.item;
        if text.get(item.offset..item.end()).is_none() {
            return Err(ShapeError::invalid(format!(
                "text of {} bytes does not cover item range {}..{}",
                text.len(),
                item.offset,
                item.end()
            )));
        }
        Ok(Self {
            glyph_item,
            text,
            span: ClusterSpan::default(),
        })
    }

    pub fn span(&self) -> ClusterSpan {
        self.span
    }

    fn is_rtl(&self) -> bool {
        self.glyph_item.item.analysis.is_rtl()
    }

    fn num_glyphs(&self) -> isize {
        self.glyph_item.glyphs.len() as isize
    }

    fn cluster_at(&self, glyph: isize) -> usize {
        self.glyph_item.glyphs.log_clusters()[glyph as usize]
    }

    fn count_chars(&self, start: usize, end: usize) -> usize {
        self.text.get(start..end).map_or(0, |s| s.chars().count())
    }

    /// Move to the first cluster. False if the item has no glyphs.
    pub fn init_start(&mut self) -> bool {
        let item = &self.glyph_item.item;
        let glyph = if item.analysis.is_rtl() { self.num_glyphs() - 1 } else { 0 };
        self.span = ClusterSpan {
            start_glyph: glyph,
            start_index: item.offset,
            start_char: 0,
            end_glyph: glyph,
            end_index: item.offset,
            end_char: 0,
        };
        self.next_cluster()
    }

    /// Move to the last cluster. False if the item has no glyphs.
    pub fn init_end(&mut self) -> bool {
        let item = &self.glyph_item.item;
        let glyph = if item.analysis.is_rtl() { -1 } else { self.num_glyphs() };
        self.span = ClusterSpan {
            start_glyph: glyph,
            start_index: item.end(),
            start_char: item.num_chars,
            end_glyph: glyph,
            end_index: item.end(),
            end_char: item.num_chars,
        };
        self.prev_cluster()
    }

    /// Advance to the next cluster in logical order. Returns false, without
    /// moving, past the last cluster.
    pub fn next_cluster(&mut self) -> bool {
        let rtl = self.is_rtl();
        let mut glyph = self.span.end_glyph;
        if (!rtl && glyph >= self.num_glyphs()) || (rtl && glyph < 0) {
            return false;
        }

        let glyph_item = self.glyph_item;
        let item = &glyph_item.item;
        self.span.start_glyph = self.span.end_glyph;
        self.span.start_index = self.span.end_index;
        self.span.start_char = self.span.end_char;

        let step = if rtl { -1 } else { 1 };
        let cluster = self.cluster_at(glyph);
        loop {
            glyph += step;
            if glyph < 0 || glyph >= self.num_glyphs() {
                self.span.end_index = item.end();
                self.span.end_char = item.num_chars;
                break;
            }
            let next = self.cluster_at(glyph);
            if next != cluster {
                let end_index = item.offset + next;
                let consumed = self.count_chars(self.span.start_index, end_index);
                self.span.end_index = end_index;
                self.span.end_char += consumed;
                break;
            }
        }
        self.span.end_glyph = glyph;
        true
    }

    /// Step back to the previous cluster in logical order. Returns false,
    /// without moving, before the first cluster.
    pub fn prev_cluster(&mut self) -> bool {
        let rtl = self.is_rtl();
        let mut glyph = self.span.start_glyph;
        let first = if rtl { self.num_glyphs() - 1 } else { 0 };
        if glyph == first {
            return false;
        }

        let glyph_item = self.glyph_item;
        let item = &glyph_item.item;
        self.span.end_glyph = self.span.start_glyph;
        self.span.end_index = self.span.start_index;
        self.span.end_char = self.span.start_char;

        let step = if rtl { 1 } else { -1 };
        let cluster = self.cluster_at(glyph + step);
        loop {
            if glyph == first {
                self.span.start_index = item.offset;
                self.span.start_char = 0;
                break;
            }
            glyph += step;
            if self.cluster_at(glyph) != cluster {
                glyph -= step;
                let start_index = item.offset + self.cluster_at(glyph);
                let consumed = self.count_chars(start_index, self.span.end_index);
                self.span.start_index = start_index;
                self.span.start_char = self.span.start_char.saturating_sub(consumed);
                break;
            }
        }
        self.span.start_glyph = glyph;
        true
    }
}

/// Iterator over the clusters of a [`GlyphItem`] in logical order.
#[derive(Debug, Clone)]
pub struct Clusters<'a> {
    iter: GlyphItemIter<'a>,
    started: bool,
}

impl<'a> Clusters<'a> {
    pub(crate) fn new(iter: GlyphItemIter<'a>) -> Self {
        Self {
            iter,
            started: false,
        }
    }
}

impl Iterator for Clusters<'_> {
    type Item = ClusterSpan;

    fn next(&mut self) -> Option<ClusterSpan> {
        let moved = if self.started {
            self.iter.next_cluster()
        } else {
            self.started = true;
            self.iter.init_start()
        };
        moved.then(|| self.iter.span())
    }
}
