use std::sync::Arc;

use anyhow::Result;
use rune_shape::font::{Font, FontFace, ScaledFont};
use rune_shape::item::Analysis;
use rune_shape::shaping::{Glyph, GlyphString, ShapeFlags, shape};
use rune_shape::units::GlyphUnit;
use unicode_script::Script;

const DEJAVU_SANS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSans.ttf");

fn dejavu(size: f32) -> Result<Arc<dyn Font>> {
    let face = FontFace::from_path(DEJAVU_SANS, 0)?;
    Ok(Arc::new(ScaledFont::new(Arc::new(face), size)))
}

fn shape_run(font: &Arc<dyn Font>, text: &str, level: u8, script: Script) -> GlyphString {
    let analysis = Analysis {
        level,
        script,
        ..Analysis::with_font(font.clone())
    };
    shape(text, text, 0, &analysis, ShapeFlags::VALIDATE)
}

#[test]
fn ltr_ligature_shares_a_cluster() -> Result<()> {
    let font = dejavu(16.0)?;
    let glyphs = shape_run(&font, "office", 0, Script::Latin);

    // "ffi" ligates into one glyph on byte 1.
    assert_eq!(glyphs.log_clusters(), &[0, 1, 4, 5]);
    assert!(glyphs.check_invariants(false).is_ok());
    assert!(glyphs.glyphs().iter().all(|g| !g.glyph.is_unknown()));
    assert!(glyphs.width() > GlyphUnit::ZERO);
    Ok(())
}

#[test]
fn rtl_run_has_decreasing_byte_clusters() -> Result<()> {
    let font = dejavu(16.0)?;
    let glyphs = shape_run(&font, "שלום", 1, Script::Hebrew);

    assert_eq!(glyphs.log_clusters(), &[6, 4, 2, 0]);
    assert!(glyphs.check_invariants(true).is_ok());
    assert!(glyphs.glyphs().iter().all(|g| g.is_cluster_start));
    Ok(())
}

#[test]
fn notdef_becomes_unknown_glyph_with_font_width() -> Result<()> {
    let font = dejavu(16.0)?;
    let glyphs = shape_run(&font, "a\u{10FFFD}", 0, Script::Latin);

    assert_eq!(glyphs.len(), 2);
    let missing = glyphs.glyphs()[1];
    assert_eq!(missing.glyph, Glyph::unknown('\u{10FFFD}'));

    let extents = font.glyph_extents(missing.glyph);
    assert!(extents.logical.width > GlyphUnit::ZERO);
    let diff = (missing.geometry.width.raw() - extents.logical.width.raw()).abs();
    assert!(diff <= 1, "shaped {:?} vs logical {:?}", missing.geometry.width, extents.logical.width);
    Ok(())
}

#[test]
fn glyph_extents_are_y_down() -> Result<()> {
    let font = dejavu(16.0)?;
    let glyphs = shape_run(&font, "x", 0, Script::Latin);
    let x = glyphs.glyphs()[0];
    let extents = font.glyph_extents(x.glyph);

    // Ink sits above the baseline, so its top is negative.
    assert!(extents.ink.y < GlyphUnit::ZERO);
    assert!(extents.ink.height > GlyphUnit::ZERO);
    assert!(extents.ink.width > GlyphUnit::ZERO);
    assert!(extents.logical.y < GlyphUnit::ZERO);
    assert!(extents.logical.height > extents.ink.height);
    assert_eq!(extents.logical.width, x.geometry.width);

    // Repeated queries share the cached scaler and agree.
    assert_eq!(font.glyph_extents(x.glyph), extents);
    Ok(())
}

#[test]
fn space_has_no_ink() -> Result<()> {
    let font = dejavu(16.0)?;
    let glyphs = shape_run(&font, " ", 0, Script::Common);
    let extents = font.glyph_extents(glyphs.glyphs()[0].glyph);
    assert_eq!(extents.ink.width, GlyphUnit::ZERO);
    assert!(extents.logical.width > GlyphUnit::ZERO);
    Ok(())
}
