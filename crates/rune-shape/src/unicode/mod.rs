//! Per-character Unicode helpers.

pub mod char_attrs;
pub mod properties;

pub use char_attrs::{CharAttr, compute_char_attrs};
pub use properties::{is_nonspacing_mark, is_zero_width};
