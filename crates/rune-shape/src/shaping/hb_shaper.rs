//! Shaping backend built on harfrust (pure-Rust HarfBuzz port).

use harfrust::{
    Direction as HbDirection,
    FontRef as HbFontRef,
    Language as HbLanguage,
    Script as HbScript,
    ShaperData,
    ShaperInstance,
    Tag as HbTag,
    UnicodeBuffer as HbUnicodeBuffer,
    Variation,
};
use unicode_script::Script;

use crate::font::{FontFace, ShapeRequest};
use crate::shaping::glyph::{Glyph, GlyphGeometry, GlyphInfo};
use crate::shaping::glyph_string::GlyphString;

/// Shape `request` with `face` at `font_size` pixels per em.
///
/// Returns an empty string when the face cannot be opened by harfrust, so
/// that the caller falls back.
pub(crate) fn shape_with_face(face: &FontFace, font_size: f32, request: &ShapeRequest<'_>) -> GlyphString {
    let font_ref = match HbFontRef::from_index(face.data(), face.index()) {
        Ok(font_ref) => font_ref,
        Err(err) => {
            tracing::warn!("harfrust could not open font: {err}");
            return GlyphString::new();
        }
    };

    // Default instance, no variations.
    let data = ShaperData::new(&font_ref);
    let instance = ShaperInstance::from_variations(&font_ref, core::iter::empty::<Variation>());
    let shaper = data
        .shaper(&font_ref)
        .instance(Some(&instance))
        .point_size(None)
        .build();

    let glyph_buffer = shaper.shape(segment_buffer(request), &[]);
    let infos = glyph_buffer.glyph_infos();
    let positions = glyph_buffer.glyph_positions();

    let metrics = face.metrics();
    let mut glyphs = GlyphString::new();
    for (info, pos) in infos.iter().zip(positions.iter()) {
        let cluster = info.cluster as usize;
        let glyph = if info.glyph_id == 0 {
            request
                .item_text
                .get(cluster..)
                .and_then(|rest| rest.chars().next())
                .map_or(Glyph::EMPTY, Glyph::unknown)
        } else {
            Glyph::new(info.glyph_id)
        };
        let geometry = GlyphGeometry {
            width: metrics.to_glyph_units(pos.x_advance, font_size),
            x_offset: metrics.to_glyph_units(pos.x_offset, font_size),
            // harfrust offsets are y-up.
            y_offset: -metrics.to_glyph_units(pos.y_offset, font_size),
        };
        glyphs.push(
            GlyphInfo {
                glyph,
                geometry,
                is_cluster_start: false,
            },
            cluster,
        );
    }

    tracing::trace!(
        glyphs = glyphs.len(),
        bytes = request.item_text.len(),
        "harfrust shaped run"
    );
    glyphs
}

/// Buffer holding the run text with direction, script and language set
/// from the run's analysis.
fn segment_buffer(request: &ShapeRequest<'_>) -> HbUnicodeBuffer {
    let analysis = request.analysis;
    let mut buffer = HbUnicodeBuffer::new();
    buffer.push_str(request.item_text);
    // Surrounding paragraph text lets contextual forms see across runs.
    buffer.set_pre_context(request.pre_context());
    buffer.set_post_context(request.post_context());
    buffer.set_direction(if analysis.is_rtl() {
        HbDirection::RightToLeft
    } else {
        HbDirection::LeftToRight
    });
    if let Some(script) = hb_script(analysis.script) {
        buffer.set_script(script);
    }
    if let Some(language) = analysis
        .language
        .as_deref()
        .and_then(|tag| tag.parse::<HbLanguage>().ok())
    {
        buffer.set_language(language);
    }
    buffer.guess_segment_properties();
    buffer
}

/// harfrust script for a Unicode script, skipping the pseudo-scripts that
/// harfrust should guess from context.
fn hb_script(script: Script) -> Option<HbScript> {
    if matches!(script, Script::Common | Script::Inherited | Script::Unknown) {
        return None;
    }
    let tag: [u8; 4] = script.short_name().as_bytes().try_into().ok()?;
    HbScript::from_iso15924_tag(HbTag::new(&tag))
}
