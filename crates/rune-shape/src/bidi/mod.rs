//! Bidirectional text support built on `unicode-bidi`.
//!
//! - Character and paragraph direction detection
//! - Embedding level resolution with unidirectional fast paths
//! - Visual reordering of levelled runs

pub mod direction;
pub mod engine;
pub mod levels;
pub mod reorder;

pub use direction::{Direction, classify_character, find_base_direction};
pub use engine::{
    BidiEngine, BidiEngineError, BidiResolution, BracketPair, ParagraphRequest, UnicodeBidiEngine,
};
pub use levels::{EmbeddingLevels, resolve_embedding_levels, resolve_embedding_levels_with};
pub use reorder::reorder_visual;

/// Embedding level of an LTR paragraph.
pub const LTR_LEVEL: u8 = 0;
/// Embedding level of an RTL paragraph.
pub const RTL_LEVEL: u8 = 1;
