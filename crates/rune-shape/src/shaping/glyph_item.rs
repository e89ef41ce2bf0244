use crate::error::{Result, ShapeError};
use crate::item::Item;
use crate::shaping::cluster::{ClusterSpan, Clusters, GlyphItemIter};
use crate::shaping::glyph_string::GlyphString;
use crate::unicode::CharAttr;
use crate::units::GlyphUnit;

/// An item together with its shaped glyphs.
#[derive(Debug, Clone, Default)]
pub struct GlyphItem {
    pub item: Item,
    pub glyphs: GlyphString,
}

/// Split letter spacing into the part added before a cluster and the part
/// added after it. Whole-unit spacing keeps the left half on whole units.
pub fn distribute_letter_spacing(spacing: GlyphUnit) -> (GlyphUnit, GlyphUnit) {
    let mut left = spacing / 2;
    if spacing.is_device_aligned() {
        left = left.round_to_device_unit();
    }
    (left, spacing - left)
}

impl GlyphItem {
    pub fn new(item: Item, glyphs: GlyphString) -> Self {
        Self { item, glyphs }
    }

    pub fn width(&self) -> GlyphUnit {
        self.glyphs.width()
    }

    pub fn iter<'a>(&'a self, text: &'a str) -> Result<GlyphItemIter<'a>> {
        GlyphItemIter::new(self, text)
    }

    /// Clusters in logical order.
    pub fn clusters<'a>(&'a self, text: &'a str) -> Result<Clusters<'a>> {
        Ok(Clusters::new(self.iter(text)?))
    }

    /// Add `spacing` between clusters. `log_attrs` has one entry per
    /// character of the item, starting at its first.
    ///
    /// Nothing is added before the first or after the last character of the
    /// item; line assembly handles the outer edges.
    pub fn letter_space(&mut self, text: &str, log_attrs: &[CharAttr], spacing: GlyphUnit) -> Result<()> {
        if log_attrs.len() < self.item.num_chars {
            return Err(ShapeError::invalid(format!(
                "{} char attributes for an item of {} chars",
                log_attrs.len(),
                self.item.num_chars
            )));
        }

        let (left, right) = distribute_letter_spacing(spacing);
        let spans: Vec<ClusterSpan> = self.clusters(text)?.collect();
        let num_chars = self.item.num_chars;
        let glyphs = self.glyphs.glyphs_mut();

        for span in spans {
            let ltr = span.start_glyph < span.end_glyph;
            let start = span.start_glyph as usize;

            if !log_attrs[span.start_char].is_cursor_position {
                // Zero-width marks stay over their base as it widens.
                let geometry = &mut glyphs[start].geometry;
                if geometry.width == GlyphUnit::ZERO {
                    if ltr {
                        geometry.x_offset -= right;
                    } else {
                        geometry.x_offset += left;
                    }
                }
                continue;
            }

            if span.start_char > 0 {
                let geometry = &mut glyphs[start].geometry;
                if ltr {
                    geometry.width += left;
                    geometry.x_offset += left;
                } else {
                    geometry.width += right;
                }
            }
            if span.end_char < num_chars {
                if ltr {
                    glyphs[(span.end_glyph - 1) as usize].geometry.width += right;
                } else {
                    let geometry = &mut glyphs[(span.end_glyph + 1) as usize].geometry;
                    geometry.x_offset += left;
                    geometry.width += left;
                }
            }
        }
        Ok(())
    }

    /// Cut the first `split_index` bytes off into a new glyph item, keeping
    /// the rest in `self`. `Ok(None)` when no glyph belongs to the tail,
    /// in which case nothing changes.
    pub fn split(&mut self, text: &str, split_index: usize) -> Result<Option<GlyphItem>> {
        if split_index == 0 || split_index >= self.item.length {
            return Err(ShapeError::invalid(format!(
                "split index {split_index} outside 1..{}",
                self.item.length
            )));
        }
        let split_offset = text
            .get(self.item.offset..self.item.offset + split_index)
            .map(|head| head.chars().count())
            .ok_or_else(|| ShapeError::invalid(format!("split index {split_index} is not a char boundary")))?;

        let num_glyphs = self.glyphs.len();
        let clusters = self.glyphs.log_clusters();
        let rtl = self.item.analysis.is_rtl();

        // Glyphs `head_range` move to the new item.
        let head_range = if rtl {
            match clusters.iter().rposition(|cluster| *cluster >= split_index) {
                Some(i) => i + 1..num_glyphs,
                None => return Ok(None),
            }
        } else {
            match clusters.iter().position(|cluster| *cluster >= split_index) {
                Some(i) => 0..i,
                None => return Ok(None),
            }
        };

        let head_item = self.item.split(split_index, split_offset)?;

        let mut head_glyphs = GlyphString::new();
        let mut tail_glyphs = GlyphString::new();
        for (i, (info, cluster)) in self
            .glyphs
            .glyphs()
            .iter()
            .zip(self.glyphs.log_clusters())
            .enumerate()
        {
            if head_range.contains(&i) {
                head_glyphs.push(*info, *cluster);
            } else {
                tail_glyphs.push(*info, cluster.saturating_sub(split_index));
            }
        }
        self.glyphs = tail_glyphs;

        Ok(Some(GlyphItem::new(head_item, head_glyphs)))
    }

    /// Advance of each character, in logical order. A cluster's width is
    /// shared evenly among its characters, with the remainder on the first.
    pub fn logical_widths(&self, text: &str) -> Result<Vec<GlyphUnit>> {
        let mut widths = vec![GlyphUnit::ZERO; self.item.num_chars];
        let glyphs = self.glyphs.glyphs();

        for span in self.clusters(text)? {
            let step: isize = if span.start_glyph < span.end_glyph { 1 } else { -1 };
            let mut cluster_width = GlyphUnit::ZERO;
            let mut glyph = span.start_glyph;
            while glyph != span.end_glyph {
                cluster_width += glyphs[glyph as usize].geometry.width;
                glyph += step;
            }

            let num_chars = span.end_char - span.start_char;
            if num_chars > 0 {
                let char_width = cluster_width / num_chars as i32;
                for width in &mut widths[span.start_char..span.end_char] {
                    *width = char_width;
                }
                widths[span.start_char] += cluster_width - char_width * num_chars as i32;
            }
        }
        Ok(widths)
    }
}
