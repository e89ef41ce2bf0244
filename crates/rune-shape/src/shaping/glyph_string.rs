use crate::error::{Result, ShapeError};
use crate::font::{Font, GlyphExtents};
use crate::shaping::glyph::{Glyph, GlyphGeometry, GlyphInfo};
use crate::units::{GlyphUnit, Rectangle};

/// Shaped glyphs of one run, in visual order, with the cluster each glyph
/// belongs to.
///
/// `log_clusters[i]` is the byte offset, relative to the start of the run,
/// of the first character of glyph `i`'s cluster. The two vectors always
/// have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphString {
    glyphs: Vec<GlyphInfo>,
    log_clusters: Vec<usize>,
}

impl GlyphString {
    pub fn new() -> Self {
        Self::default()
    }

    /// `len` empty glyphs, all in cluster 0.
    pub fn with_len(len: usize) -> Self {
        let mut string = Self::new();
        string.resize(len);
        string
    }

    pub fn resize(&mut self, len: usize) {
        self.glyphs.resize(len, GlyphInfo::new(Glyph::EMPTY, GlyphUnit::ZERO));
        self.log_clusters.resize(len, 0);
    }

    pub fn push(&mut self, info: GlyphInfo, cluster: usize) {
        self.glyphs.push(info);
        self.log_clusters.push(cluster);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[GlyphInfo] {
        &self.glyphs
    }

    pub fn glyphs_mut(&mut self) -> &mut [GlyphInfo] {
        &mut self.glyphs
    }

    pub fn log_clusters(&self) -> &[usize] {
        &self.log_clusters
    }

    pub fn log_clusters_mut(&mut self) -> &mut [usize] {
        &mut self.log_clusters
    }

    /// Mutable glyphs and clusters together.
    pub fn parts_mut(&mut self) -> (&mut [GlyphInfo], &mut [usize]) {
        (&mut self.glyphs, &mut self.log_clusters)
    }

    /// Reverse glyphs and clusters in `start..end`.
    pub fn reverse_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.len());
        if start < end {
            self.glyphs[start..end].reverse();
            self.log_clusters[start..end].reverse();
        }
    }

    pub fn reverse(&mut self) {
        self.reverse_range(0, self.len());
    }

    /// Sum of advances.
    pub fn width(&self) -> GlyphUnit {
        self.glyphs.iter().map(|info| info.geometry.width).sum()
    }

    /// Ink and logical extents of the whole string.
    pub fn extents(&self, font: Option<&dyn Font>) -> (Rectangle, Rectangle) {
        self.extents_with(0, self.len(), |glyph| GlyphExtents::of(font, glyph))
    }

    /// Ink and logical extents of glyphs `start..end`, with x measured from
    /// the left edge of glyph `start`.
    pub fn extents_range(
        &self,
        start: usize,
        end: usize,
        font: Option<&dyn Font>,
    ) -> Result<(Rectangle, Rectangle)> {
        if start > end || end > self.len() {
            return Err(ShapeError::invalid(format!(
                "glyph range {start}..{end} invalid for {} glyphs",
                self.len()
            )));
        }
        Ok(self.extents_with(start, end, |glyph| GlyphExtents::of(font, glyph)))
    }

    fn extents_with(
        &self,
        start: usize,
        end: usize,
        extents_of: impl Fn(Glyph) -> GlyphExtents,
    ) -> (Rectangle, Rectangle) {
        let mut ink = Rectangle::default();
        let mut logical = Rectangle::default();
        let mut x_pos = GlyphUnit::ZERO;

        for (i, info) in self.glyphs[start..end].iter().enumerate() {
            let GlyphExtents {
                ink: glyph_ink,
                logical: glyph_logical,
            } = extents_of(info.glyph);
            let GlyphGeometry {
                width,
                x_offset,
                y_offset,
            } = info.geometry;

            if !glyph_ink.is_empty() {
                let placed = Rectangle::new(
                    x_pos + glyph_ink.x + x_offset,
                    glyph_ink.y + y_offset,
                    glyph_ink.width,
                    glyph_ink.height,
                );
                ink = if ink.is_empty() { placed } else { ink.union(&placed) };
            }

            logical.width += width;
            if i == 0 {
                logical.y = glyph_logical.y;
                logical.height = glyph_logical.height;
            } else {
                let top = logical.y.min(glyph_logical.y);
                let bottom = logical.bottom().max(glyph_logical.bottom());
                logical.y = top;
                logical.height = bottom - top;
            }

            x_pos += width;
        }

        (ink, logical)
    }

    /// X position of the leading (or trailing) edge of the character at
    /// byte `index` of `text`, the run's own text. Positions inside a
    /// multi-character cluster are interpolated.
    pub fn index_to_x(&self, text: &str, is_rtl: bool, index: usize, trailing: bool) -> GlyphUnit {
        if self.is_empty() {
            return GlyphUnit::ZERO;
        }

        let mut start_index: Option<usize> = None;
        let mut end_index: Option<usize> = None;
        let mut start_xpos = GlyphUnit::ZERO;
        let mut end_xpos = GlyphUnit::ZERO;

        if is_rtl {
            let mut width = self.width();
            for i in (0..self.len()).rev() {
                let cluster = self.log_clusters[i];
                if cluster > index {
                    end_index = Some(cluster);
                    end_xpos = width;
                    break;
                }
                if start_index != Some(cluster) {
                    start_index = Some(cluster);
                    start_xpos = width;
                }
                width -= self.glyphs[i].geometry.width;
            }
        } else {
            let mut width = GlyphUnit::ZERO;
            for i in 0..self.len() {
                let cluster = self.log_clusters[i];
                if cluster > index {
                    end_index = Some(cluster);
                    end_xpos = width;
                    break;
                }
                if start_index != Some(cluster) {
                    start_index = Some(cluster);
                    start_xpos = width;
                }
                width += self.glyphs[i].geometry.width;
            }
        }

        let Some(start_index) = start_index else {
            // `index` precedes every cluster.
            return start_xpos;
        };
        let end_index = match end_index {
            Some(end) => end,
            None => {
                end_xpos = if is_rtl { GlyphUnit::ZERO } else { self.width() };
                text.len()
            }
        };

        let mut cluster_chars = 0;
        let mut cluster_offset = 0;
        if let Some(cluster_text) = text.get(start_index..end_index) {
            for (pos, _) in cluster_text.char_indices() {
                if start_index + pos < index {
                    cluster_offset += 1;
                }
                cluster_chars += 1;
            }
        }
        if trailing {
            cluster_offset += 1;
        }
        if cluster_chars == 0 {
            return start_xpos;
        }

        GlyphUnit(
            ((cluster_chars - cluster_offset) * start_xpos.raw() + cluster_offset * end_xpos.raw())
                / cluster_chars,
        )
    }

    /// Byte index within `text` of the character under `x`, and whether `x`
    /// is in its trailing half.
    pub fn x_to_index(&self, text: &str, is_rtl: bool, x: GlyphUnit) -> (usize, bool) {
        let mut start_index: Option<usize> = None;
        let mut end_index: Option<usize> = None;
        let mut start_xpos = GlyphUnit::ZERO;
        let mut end_xpos = GlyphUnit::ZERO;
        let mut found = false;

        if is_rtl {
            let mut width = self.width();
            for i in (0..self.len()).rev() {
                let cluster = self.log_clusters[i];
                if start_index != Some(cluster) {
                    if found {
                        end_index = Some(cluster);
                        end_xpos = width;
                        break;
                    }
                    start_index = Some(cluster);
                    start_xpos = width;
                }
                let glyph_width = self.glyphs[i].geometry.width;
                width -= glyph_width;
                if width <= x && x < width + glyph_width {
                    found = true;
                }
            }
        } else {
            let mut width = GlyphUnit::ZERO;
            for i in 0..self.len() {
                let cluster = self.log_clusters[i];
                if start_index != Some(cluster) {
                    if found {
                        end_index = Some(cluster);
                        end_xpos = width;
                        break;
                    }
                    start_index = Some(cluster);
                    start_xpos = width;
                }
                let glyph_width = self.glyphs[i].geometry.width;
                if width <= x && x < width + glyph_width {
                    found = true;
                }
                width += glyph_width;
            }
        }

        let Some(start_index) = start_index else {
            return (0, false);
        };
        let end_index = match end_index {
            Some(end) => end,
            None => {
                end_xpos = if is_rtl { GlyphUnit::ZERO } else { self.width() };
                text.len()
            }
        };

        if start_xpos == end_xpos {
            return (start_index, false);
        }

        let char_starts: Vec<usize> = text
            .get(start_index..end_index)
            .map(|cluster| cluster.char_indices().map(|(pos, _)| start_index + pos).collect())
            .unwrap_or_default();
        let cluster_chars = char_starts.len() as f64;
        let cp = f64::from((x - start_xpos).raw()) * cluster_chars
            / f64::from((end_xpos - start_xpos).raw());
        let char_at = |n: usize| char_starts.get(n).copied().unwrap_or(end_index);

        if start_xpos < end_xpos {
            let mut n = 0;
            while (n + 1) as f64 <= cp {
                n += 1;
            }
            (char_at(n), cp.fract() >= 0.5)
        } else {
            let mut n = 0;
            while ((n + 1) as f64) < cp {
                n += 1;
            }
            let flipped = cluster_chars - cp;
            (char_at(n), flipped.fract() < 0.5)
        }
    }

    /// Check the structural invariants of a shaped string: cluster-start
    /// flags agree with `log_clusters`, and clusters run forward for LTR
    /// and backward for RTL.
    pub fn check_invariants(&self, is_rtl: bool) -> std::result::Result<(), String> {
        if self.glyphs.len() != self.log_clusters.len() {
            return Err(format!(
                "{} glyphs but {} clusters",
                self.glyphs.len(),
                self.log_clusters.len()
            ));
        }
        for i in 0..self.len() {
            let expected = i == 0 || self.log_clusters[i] != self.log_clusters[i - 1];
            if self.glyphs[i].is_cluster_start != expected {
                return Err(format!("glyph {i}: is_cluster_start should be {expected}"));
            }
            if i > 0 {
                let (prev, cur) = (self.log_clusters[i - 1], self.log_clusters[i]);
                if (!is_rtl && cur < prev) || (is_rtl && cur > prev) {
                    return Err(format!(
                        "glyph {i}: cluster {cur} after {prev} in {} run",
                        if is_rtl { "RTL" } else { "LTR" }
                    ));
                }
            }
        }
        Ok(())
    }
}
