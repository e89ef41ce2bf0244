//! rune-shape: run shaping and cluster layout for rune paragraphs.
//!
//! - Bidi embedding levels and base direction (`unicode-bidi`)
//! - Items: runs sharing one font, level, script and attribute set
//! - Shaping with harfrust, with placeholder fallback glyphs
//! - Cluster iteration in logical order, letter spacing, hit-testing
//! - Line assembly with tab stops and cached extents

pub mod bidi;
pub mod config;
pub mod error;
pub mod font;
pub mod item;
pub mod layout;
pub mod shaping;
pub mod unicode;
pub mod units;

pub use bidi::{Direction, EmbeddingLevels, find_base_direction, resolve_embedding_levels};
pub use config::ShapeConfig;
pub use error::{Result, ShapeError};
pub use font::{Font, FontError, FontFace, GlyphExtents, ScaledFont, ShapeRequest};
pub use item::{Analysis, AttrList, AttrValue, Attribute, Item, ItemProperties};
pub use layout::{LayoutLine, ParagraphContext, TabArray};
pub use shaping::{
    ClusterSpan, Glyph, GlyphGeometry, GlyphInfo, GlyphItem, GlyphItemIter, GlyphString,
    ShapeFlags, fallback_shape, shape,
};
pub use units::{GlyphUnit, Rectangle, SCALE};
