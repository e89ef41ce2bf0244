//! Assembling shaped runs into lines.

pub mod line;
pub mod paragraph;
pub mod tabs;

pub use line::{CacheStatus, LayoutLine, LineExtents, resolve_line_direction};
pub use paragraph::ParagraphContext;
pub use tabs::{Tab, TabAlign, TabArray};
