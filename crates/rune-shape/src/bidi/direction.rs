use unicode_bidi::{BidiClass, bidi_class};

/// Direction of a character, paragraph or line.
///
/// Characters classify as `Ltr`, `Rtl` or `Neutral`; the weak variants only
/// appear as paragraph base directions, where they mean "detect from the
/// text, falling back to this direction".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
    WeakLtr,
    WeakRtl,
    Neutral,
}

impl Direction {
    /// Collapse to a strong direction: RTL and weak RTL become RTL,
    /// everything else LTR.
    pub fn to_strong(self) -> Direction {
        match self {
            Direction::Rtl | Direction::WeakRtl => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl | Direction::WeakRtl)
    }

    pub fn is_weak(self) -> bool {
        matches!(self, Direction::WeakLtr | Direction::WeakRtl | Direction::Neutral)
    }

    /// Level parity for a strong direction.
    pub fn from_level(level: u8) -> Direction {
        if level & 1 == 1 {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}

/// True for the bidi classes UAX #9 calls strong.
pub(crate) fn is_strong(class: BidiClass) -> bool {
    matches!(class, BidiClass::L | BidiClass::R | BidiClass::AL)
}

/// Inherent direction of a single character.
pub fn classify_character(ch: char) -> Direction {
    match bidi_class(ch) {
        BidiClass::R | BidiClass::AL => Direction::Rtl,
        BidiClass::L => Direction::Ltr,
        _ => Direction::Neutral,
    }
}

/// Direction of the first strongly directional character in `text`, or
/// `Neutral` when there is none.
pub fn find_base_direction(text: &str) -> Direction {
    text.chars()
        .map(classify_character)
        .find(|dir| *dir != Direction::Neutral)
        .unwrap_or(Direction::Neutral)
}
