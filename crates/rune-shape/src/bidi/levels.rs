use unicode_bidi::{BidiClass, BidiDataSource, HardcodedBidiData, bidi_class};

use super::direction::{Direction, is_strong};
use super::engine::{BidiEngine, BracketPair, ParagraphRequest, UnicodeBidiEngine};

/// Embedding level per character plus the resolved paragraph direction
/// (always `Ltr` or `Rtl`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingLevels {
    pub levels: Vec<u8>,
    pub direction: Direction,
}

impl EmbeddingLevels {
    fn uniform(len: usize, level: u8) -> Self {
        Self {
            levels: vec![level; len],
            direction: Direction::from_level(level),
        }
    }
}

/// What a single pass over the character classes tells us about the
/// paragraph.
#[derive(Debug, Clone, Copy)]
struct TypeSummary {
    has_isolate: bool,
    has_explicit: bool,
    has_rtl_letter: bool,
    has_arabic_number: bool,
    has_number: bool,
    has_letter: bool,
    all_strong_rtl: bool,
}

impl Default for TypeSummary {
    fn default() -> Self {
        Self {
            has_isolate: false,
            has_explicit: false,
            has_rtl_letter: false,
            has_arabic_number: false,
            has_number: false,
            has_letter: false,
            // Vacuously true until an LTR strong type shows up.
            all_strong_rtl: true,
        }
    }
}

impl TypeSummary {
    fn add(&mut self, class: BidiClass) {
        use BidiClass::*;
        match class {
            LRI | RLI | FSI | PDI => self.has_isolate = true,
            LRE | LRO | RLE | RLO | PDF => self.has_explicit = true,
            AN => {
                self.has_arabic_number = true;
                self.has_number = true;
            }
            EN => self.has_number = true,
            _ => {}
        }
        if is_strong(class) {
            self.has_letter = true;
            if class == L {
                self.all_strong_rtl = false;
            } else {
                self.has_rtl_letter = true;
            }
        }
    }

    /// Every level resolves to 0.
    fn is_all_ltr(&self, request: ParagraphRequest) -> bool {
        !self.has_isolate
            && !self.has_explicit
            && !self.has_rtl_letter
            && !self.has_arabic_number
            && (!request.has_rtl_taste() || (request.is_weak() && self.has_letter))
    }

    /// Every level resolves to 1.
    fn is_all_rtl(&self, request: ParagraphRequest) -> bool {
        !self.has_isolate
            && !self.has_explicit
            && !self.has_number
            && self.all_strong_rtl
            && (request.has_rtl_taste() || (request.is_weak() && self.has_letter))
    }
}

/// Resolve embedding levels with the default `unicode-bidi` engine.
pub fn resolve_embedding_levels(text: &str, base: Direction) -> EmbeddingLevels {
    resolve_embedding_levels_with(&UnicodeBidiEngine, text, base)
}

/// Resolve embedding levels for a paragraph.
///
/// Unidirectional paragraphs are answered directly; everything else goes to
/// `engine`. An engine failure degrades to an all-LTR paragraph.
pub fn resolve_embedding_levels_with<E: BidiEngine + ?Sized>(
    engine: &E,
    text: &str,
    base: Direction,
) -> EmbeddingLevels {
    let request = ParagraphRequest::from_direction(base);

    let mut classes = Vec::with_capacity(text.len());
    let mut brackets = Vec::with_capacity(text.len());
    let mut summary = TypeSummary::default();
    for ch in text.chars() {
        let class = bidi_class(ch);
        summary.add(class);
        classes.push(class);
        brackets.push(if class == BidiClass::ON {
            HardcodedBidiData
                .bidi_matched_opening_bracket(ch)
                .map(|pair| BracketPair {
                    opening: pair.opening,
                    is_open: pair.is_open,
                })
        } else {
            None
        });
    }

    if summary.is_all_ltr(request) {
        tracing::trace!(chars = classes.len(), "bidi: all-LTR fast path");
        return EmbeddingLevels::uniform(classes.len(), 0);
    }
    if summary.is_all_rtl(request) {
        tracing::trace!(chars = classes.len(), "bidi: all-RTL fast path");
        return EmbeddingLevels::uniform(classes.len(), 1);
    }

    match engine.resolve_levels(text, &classes, &brackets, request) {
        Ok(resolution) if resolution.levels.len() == classes.len() => EmbeddingLevels {
            levels: resolution.levels,
            direction: resolution.direction.to_strong(),
        },
        Ok(resolution) => {
            tracing::warn!(
                expected = classes.len(),
                got = resolution.levels.len(),
                "bidi engine returned the wrong number of levels; treating paragraph as LTR"
            );
            EmbeddingLevels::uniform(classes.len(), 0)
        }
        Err(err) => {
            tracing::warn!("{err}; treating paragraph as LTR");
            EmbeddingLevels::uniform(classes.len(), 0)
        }
    }
}
