use unic_ucd_category::GeneralCategory;

/// Format characters that take no space and draw nothing when a font has
/// no glyph for them.
pub fn is_zero_width(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}'
            | '\u{034F}'
            | '\u{200B}'..='\u{200F}'
            | '\u{2028}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2063}'
            | '\u{FEFF}'
    )
}

/// General category Mn. These attach to the preceding base character.
pub fn is_nonspacing_mark(ch: char) -> bool {
    GeneralCategory::of(ch) == GeneralCategory::NonspacingMark
}
