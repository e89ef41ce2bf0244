//! Glyph model, shaping and cluster iteration.

pub mod cluster;
pub mod glyph;
pub mod glyph_item;
pub mod glyph_string;
pub(crate) mod hb_shaper;
pub mod shaper;

pub use cluster::{ClusterSpan, Clusters, GlyphItemIter};
pub use glyph::{Glyph, GlyphGeometry, GlyphInfo};
pub use glyph_item::{GlyphItem, distribute_letter_spacing};
pub use glyph_string::GlyphString;
pub use shaper::{ShapeFlags, fallback_shape, shape, shape_override};
