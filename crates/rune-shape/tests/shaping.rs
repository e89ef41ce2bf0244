mod common;

use anyhow::Result;
use common::{MonoFont, analysis, du};
use rune_shape::item::{Analysis, AttrValue, Attribute, ShapeOverride};
use rune_shape::shaping::{Glyph, GlyphString, ShapeFlags, fallback_shape, shape};
use rune_shape::units::{GlyphUnit, Rectangle};

fn assert_cluster_starts(glyphs: &GlyphString) {
    assert_eq!(glyphs.glyphs().len(), glyphs.log_clusters().len());
    for (i, info) in glyphs.glyphs().iter().enumerate() {
        let expected = i == 0 || glyphs.log_clusters()[i] != glyphs.log_clusters()[i - 1];
        assert_eq!(info.is_cluster_start, expected, "glyph {i}");
    }
}

#[test]
fn font_shaping_keeps_invariants() {
    let font = MonoFont::with_ligatures(8);
    for (text, level) in [("office", 0), ("fish", 1), ("", 0), ("a\u{0301}b", 0)] {
        let glyphs = shape(text, text, 0, &analysis(&font, level), ShapeFlags::VALIDATE);
        assert_cluster_starts(&glyphs);
        assert!(glyphs.check_invariants(level % 2 == 1).is_ok(), "{text:?}");
    }
}

#[test]
fn ligature_is_one_cluster() {
    let font = MonoFont::with_ligatures(8);
    let glyphs = shape("fit", "fit", 0, &analysis(&font, 0), ShapeFlags::empty());
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs.glyphs()[0].glyph, Glyph::new(0xFB01));
    assert_eq!(glyphs.log_clusters(), &[0, 2]);
}

#[test]
fn uncovered_text_falls_back_to_font_box() {
    let font = MonoFont::new(9);
    let glyphs = shape("\u{E001}", "x\u{E001}", 1, &analysis(&font, 0), ShapeFlags::empty());
    assert_eq!(glyphs.len(), 1);
    assert_eq!(glyphs.glyphs()[0].glyph, Glyph::unknown('\u{E001}'));
    assert_eq!(glyphs.glyphs()[0].geometry.width, du(9));
}

#[test]
fn zero_width_space_falls_back_to_empty() {
    let glyphs = fallback_shape("\u{200B}", &Analysis::default());
    assert_eq!(glyphs.len(), 1);
    assert_eq!(glyphs.glyphs()[0].glyph, Glyph::EMPTY);
    assert_eq!(glyphs.glyphs()[0].geometry.width, GlyphUnit::ZERO);
}

#[test]
fn fallback_rtl_with_marks() {
    // alef, hiriq (Mn), bet
    let text = "א\u{05B4}ב";
    let glyphs = shape(text, text, 0, &Analysis { level: 1, ..Analysis::default() }, ShapeFlags::empty());
    assert_eq!(glyphs.log_clusters(), &[4, 0, 0]);
    assert_cluster_starts(&glyphs);
    // Reversal puts the mark visually left of its base.
    assert_eq!(glyphs.glyphs()[1].glyph, Glyph::unknown('\u{05B4}'));
    assert_eq!(glyphs.glyphs()[2].glyph, Glyph::unknown('א'));
}

#[test]
fn shaper_ignoring_direction_is_corrected() {
    let font = MonoFont::backwards(5);
    let text = "שלום";
    let glyphs = shape(text, text, 0, &analysis(&font, 1), ShapeFlags::VALIDATE);
    assert_eq!(glyphs.log_clusters(), &[6, 4, 2, 0]);
    assert_cluster_starts(&glyphs);
}

#[test]
fn shape_override_replaces_font() -> Result<()> {
    let font = MonoFont::new(8);
    let mut analysis = analysis(&font, 0);
    let shape_attr = ShapeOverride {
        ink: Rectangle::new(du(0), du(-20), du(20), du(20)),
        logical: Rectangle::new(du(0), du(-20), du(24), du(24)),
    };
    analysis
        .extra_attrs
        .push(Attribute::new(AttrValue::Shape(shape_attr), 0, 2));

    let glyphs = shape("\u{FFFC}\u{FFFC}", "\u{FFFC}\u{FFFC}", 0, &analysis, ShapeFlags::empty());
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs.width(), du(48));
    assert_eq!(glyphs.log_clusters(), &[0, 3]);

    let (_, logical) = glyphs.extents_range(0, 2, Some(&*font))?;
    assert_eq!(logical.width, du(48));
    Ok(())
}

#[test]
fn extents_take_font_boxes() -> Result<()> {
    let font = MonoFont::new(8);
    let glyphs = shape("ab", "ab", 0, &analysis(&font, 0), ShapeFlags::empty());
    let (ink, logical) = glyphs.extents(Some(&*font));
    assert_eq!(logical, Rectangle::new(du(0), du(-12), du(16), du(16)));
    assert_eq!(ink, Rectangle::new(du(1), du(-10), du(14), du(10)));

    assert!(glyphs.extents_range(2, 1, Some(&*font)).is_err());
    Ok(())
}
