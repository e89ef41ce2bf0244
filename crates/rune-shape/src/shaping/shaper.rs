//! Turning a run's text into a [`GlyphString`].

use bitflags::bitflags;

use crate::font::{GlyphExtents, ShapeRequest};
use crate::item::{Analysis, ItemProperties, ShapeOverride};
use crate::shaping::glyph::{Glyph, GlyphInfo};
use crate::shaping::glyph_string::GlyphString;
use crate::unicode::{is_nonspacing_mark, is_zero_width};
use crate::units::GlyphUnit;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShapeFlags: u8 {
        /// Snap widths and offsets to whole device units.
        const ROUND_POSITIONS = 1 << 0;
        /// Check glyph string invariants after shaping and log violations.
        const VALIDATE = 1 << 1;
    }
}

/// Shape `item_text`, which starts at byte `item_offset` of
/// `paragraph_text`.
///
/// Never fails: runs without a font, or that the font cannot shape, get
/// placeholder glyphs from [`fallback_shape`].
pub fn shape(
    item_text: &str,
    paragraph_text: &str,
    item_offset: usize,
    analysis: &Analysis,
    flags: ShapeFlags,
) -> GlyphString {
    let props = ItemProperties::from_attrs(&analysis.extra_attrs);

    let mut glyphs = match props.shape {
        Some(shape) => shape_override(item_text, &shape, analysis.is_rtl()),
        None => {
            let shaped = match analysis.font.as_deref() {
                Some(font) => font.shape(&ShapeRequest {
                    item_text,
                    paragraph_text,
                    item_offset,
                    analysis,
                    flags,
                }),
                None => GlyphString::new(),
            };
            if shaped.is_empty() && !item_text.is_empty() {
                tracing::debug!(
                    item_offset,
                    has_font = analysis.font.is_some(),
                    "shaping produced no glyphs, using fallback"
                );
                fallback_shape(item_text, analysis)
            } else {
                shaped
            }
        }
    };

    normalize(&mut glyphs, analysis.is_rtl(), flags);
    glyphs
}

/// One empty glyph per character, each as wide as the override's logical
/// rectangle.
pub fn shape_override(item_text: &str, shape: &ShapeOverride, is_rtl: bool) -> GlyphString {
    let mut glyphs = GlyphString::new();
    for (offset, _) in item_text.char_indices() {
        let mut info = GlyphInfo::new(Glyph::EMPTY, shape.logical.width);
        info.is_cluster_start = true;
        glyphs.push(info, offset);
    }
    if is_rtl {
        glyphs.reverse();
    }
    glyphs
}

/// One placeholder glyph per character.
///
/// Non-spacing marks join the cluster of the character before them.
/// Zero-width format characters become empty glyphs; everything else
/// becomes an unknown glyph sized by the font, or by the default box
/// without one.
pub fn fallback_shape(item_text: &str, analysis: &Analysis) -> GlyphString {
    let font = analysis.font.as_deref();
    let mut glyphs = GlyphString::new();
    let mut cluster = 0;

    for (offset, ch) in item_text.char_indices() {
        if !is_nonspacing_mark(ch) {
            cluster = offset;
        }
        let (glyph, width) = if is_zero_width(ch) {
            (Glyph::EMPTY, GlyphUnit::ZERO)
        } else {
            let glyph = Glyph::unknown(ch);
            (glyph, GlyphExtents::of(font, glyph).logical.width)
        };
        glyphs.push(GlyphInfo::new(glyph, width), cluster);
    }

    if analysis.is_rtl() {
        glyphs.reverse();
    }
    glyphs
}

/// Post-shaping cleanup applied to every glyph string.
///
/// Negative advances are flipped into the offset. Clusters must decrease for
/// RTL runs and increase otherwise; a string that comes back the other way
/// round, in either direction, is reversed so the iterators downstream can
/// rely on the order. Cluster starts are then recomputed.
pub(crate) fn normalize(glyphs: &mut GlyphString, is_rtl: bool, flags: ShapeFlags) {
    for info in glyphs.glyphs_mut() {
        let geometry = &mut info.geometry;
        if geometry.width < GlyphUnit::ZERO {
            geometry.width = -geometry.width;
            geometry.x_offset += geometry.width;
        }
    }

    if let (Some(first), Some(last)) = (glyphs.log_clusters().first(), glyphs.log_clusters().last()) {
        let backwards = if is_rtl { first < last } else { first > last };
        if backwards {
            tracing::warn!(
                is_rtl,
                first = *first,
                last = *last,
                "shaper returned glyphs against the run direction; reversing"
            );
            glyphs.reverse();
        }
    }

    update_cluster_starts(glyphs);

    if flags.contains(ShapeFlags::ROUND_POSITIONS) {
        for info in glyphs.glyphs_mut() {
            info.geometry.round();
        }
    }

    if flags.contains(ShapeFlags::VALIDATE) {
        if let Err(problem) = glyphs.check_invariants(is_rtl) {
            tracing::warn!("glyph string invariant violated: {problem}");
        }
    }
}

pub(crate) fn update_cluster_starts(glyphs: &mut GlyphString) {
    let (infos, clusters) = glyphs.parts_mut();
    let mut prev: Option<usize> = None;
    for (info, cluster) in infos.iter_mut().zip(clusters.iter()) {
        info.is_cluster_start = prev != Some(*cluster);
        prev = Some(*cluster);
    }
}
