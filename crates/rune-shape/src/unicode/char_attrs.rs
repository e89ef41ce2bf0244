use unicode_segmentation::UnicodeSegmentation;

/// Logical attributes of the position before a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharAttr {
    /// A cursor can be placed here (grapheme cluster boundary).
    pub is_cursor_position: bool,
    /// The character is whitespace.
    pub is_white: bool,
}

/// One [`CharAttr`] per character of `text`, plus one for the end of the
/// text.
pub fn compute_char_attrs(text: &str) -> Vec<CharAttr> {
    let mut attrs: Vec<CharAttr> = text
        .chars()
        .map(|ch| CharAttr {
            is_cursor_position: false,
            is_white: ch.is_whitespace(),
        })
        .collect();
    attrs.push(CharAttr {
        is_cursor_position: true,
        is_white: false,
    });

    let mut char_index = 0;
    let mut chars = text.char_indices().peekable();
    for (start, _) in text.grapheme_indices(true) {
        while let Some((offset, _)) = chars.peek() {
            if *offset >= start {
                break;
            }
            chars.next();
            char_index += 1;
        }
        attrs[char_index].is_cursor_position = true;
    }
    attrs
}
