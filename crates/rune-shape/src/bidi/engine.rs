//! The general Unicode Bidi Algorithm, behind a narrow trait.
//!
//! [`resolve_embedding_levels`](super::resolve_embedding_levels) handles the
//! unidirectional cases itself and only falls through to a [`BidiEngine`]
//! for genuinely mixed text.

use unicode_bidi::{BidiClass, BidiInfo, LTR_LEVEL, Level, RTL_LEVEL};

use super::direction::{Direction, is_strong};

/// Paragraph direction requested from the bidi algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphRequest {
    Ltr,
    Rtl,
    /// Detect from the first strong character, LTR if there is none.
    WeakLtr,
    /// Detect from the first strong character, RTL if there is none.
    WeakRtl,
}

impl ParagraphRequest {
    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Ltr => ParagraphRequest::Ltr,
            Direction::Rtl => ParagraphRequest::Rtl,
            Direction::WeakRtl => ParagraphRequest::WeakRtl,
            Direction::WeakLtr | Direction::Neutral => ParagraphRequest::WeakLtr,
        }
    }

    pub fn has_rtl_taste(self) -> bool {
        matches!(self, ParagraphRequest::Rtl | ParagraphRequest::WeakRtl)
    }

    pub fn is_weak(self) -> bool {
        matches!(self, ParagraphRequest::WeakLtr | ParagraphRequest::WeakRtl)
    }

    /// Direction used when the text itself gives no answer.
    pub fn fallback_direction(self) -> Direction {
        if self.has_rtl_taste() {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}

/// Bracket pairing data for an `ON` character (UAX #9, BD16).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
    /// The opening bracket of the pair this character belongs to.
    pub opening: char,
    pub is_open: bool,
}

/// Per-character levels and the resolved paragraph direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiResolution {
    pub levels: Vec<u8>,
    pub direction: Direction,
}

#[derive(Debug, thiserror::Error)]
#[error("bidi engine failed: {0}")]
pub struct BidiEngineError(pub String);

/// Full Unicode Bidi Algorithm.
///
/// `classes` and `brackets` are parallel to `text.chars()`. The returned
/// levels must have one entry per character and a strong direction.
pub trait BidiEngine {
    fn resolve_levels(
        &self,
        text: &str,
        classes: &[BidiClass],
        brackets: &[Option<BracketPair>],
        request: ParagraphRequest,
    ) -> Result<BidiResolution, BidiEngineError>;
}

/// [`BidiEngine`] backed by `unicode-bidi`.
///
/// `unicode-bidi` classifies the text again internally, so `classes` is only
/// used to pick the paragraph level and `brackets` is not consulted. Rule L1
/// is applied to each paragraph as if it were a single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeBidiEngine;

impl BidiEngine for UnicodeBidiEngine {
    fn resolve_levels(
        &self,
        text: &str,
        classes: &[BidiClass],
        _brackets: &[Option<BracketPair>],
        request: ParagraphRequest,
    ) -> Result<BidiResolution, BidiEngineError> {
        let has_strong = paragraph_strong_class(classes).is_some();
        let default_level = match request {
            ParagraphRequest::Ltr => Some(LTR_LEVEL),
            ParagraphRequest::Rtl => Some(RTL_LEVEL),
            ParagraphRequest::WeakLtr if !has_strong => Some(LTR_LEVEL),
            ParagraphRequest::WeakRtl if !has_strong => Some(RTL_LEVEL),
            ParagraphRequest::WeakLtr | ParagraphRequest::WeakRtl => None,
        };

        let info = BidiInfo::new(text, default_level);
        let mut byte_levels: Vec<Level> = info.levels.clone();
        for para in &info.paragraphs {
            let range = para.range.clone();
            let line_levels = info.reordered_levels(para, range.clone());
            byte_levels[range.clone()].copy_from_slice(&line_levels[range]);
        }

        let levels: Vec<u8> = text
            .char_indices()
            .map(|(idx, _)| byte_levels[idx].number())
            .collect();
        if levels.len() != classes.len() {
            return Err(BidiEngineError(format!(
                "expected {} levels, resolved {}",
                classes.len(),
                levels.len()
            )));
        }

        let direction = info
            .paragraphs
            .first()
            .map(|para| Direction::from_level(para.level.number()))
            .unwrap_or_else(|| request.fallback_direction());

        Ok(BidiResolution { levels, direction })
    }
}

/// First strong class rule P2 sees: characters between an isolate
/// initiator and its matching PDI are skipped, and the search stops at the
/// end of the first paragraph.
fn paragraph_strong_class(classes: &[BidiClass]) -> Option<BidiClass> {
    let mut isolate_depth = 0usize;
    for class in classes {
        match class {
            BidiClass::B => return None,
            BidiClass::LRI | BidiClass::RLI | BidiClass::FSI => isolate_depth += 1,
            BidiClass::PDI => isolate_depth = isolate_depth.saturating_sub(1),
            class if isolate_depth == 0 && is_strong(*class) => return Some(*class),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_bidi::bidi_class;

    fn classes(text: &str) -> Vec<BidiClass> {
        text.chars().map(bidi_class).collect()
    }

    #[test]
    fn resolves_mixed_paragraph() {
        let text = "abc אבג";
        let classes = classes(text);
        let brackets = vec![None; classes.len()];
        let res = UnicodeBidiEngine
            .resolve_levels(text, &classes, &brackets, ParagraphRequest::WeakLtr)
            .unwrap();
        assert_eq!(res.direction, Direction::Ltr);
        assert_eq!(res.levels, vec![0, 0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn weak_rtl_without_strong_defaults_rtl() {
        let text = "123";
        let classes = classes(text);
        let brackets = vec![None; classes.len()];
        let res = UnicodeBidiEngine
            .resolve_levels(text, &classes, &brackets, ParagraphRequest::WeakRtl)
            .unwrap();
        assert_eq!(res.direction, Direction::Rtl);
        // European numbers in an RTL paragraph sit at level 2.
        assert_eq!(res.levels, vec![2, 2, 2]);
    }

    #[test]
    fn isolated_letters_do_not_decide_weak_paragraph() {
        let text = "\u{2066}abc\u{2069} !";
        let classes = classes(text);
        assert_eq!(paragraph_strong_class(&classes), None);

        let brackets = vec![None; classes.len()];
        let res = UnicodeBidiEngine
            .resolve_levels(text, &classes, &brackets, ParagraphRequest::WeakRtl)
            .unwrap();
        assert_eq!(res.direction, Direction::Rtl);
        assert_eq!(res.levels, vec![1, 2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn strong_search_stops_at_paragraph_end() {
        assert_eq!(paragraph_strong_class(&classes("! \u{2029}abc")), None);
        assert_eq!(paragraph_strong_class(&classes("\u{2067}a\u{2069}ב")), Some(BidiClass::R));
    }

    #[test]
    fn request_mapping() {
        assert_eq!(ParagraphRequest::from_direction(Direction::Neutral), ParagraphRequest::WeakLtr);
        assert!(ParagraphRequest::WeakRtl.has_rtl_taste());
        assert!(!ParagraphRequest::Ltr.is_weak());
    }
}
