use std::cell::OnceCell;

use crate::config::ShapeConfig;
use crate::error::{Result, ShapeError};
use crate::item::{Analysis, Item};
use crate::layout::tabs::TabArray;
use crate::shaping::shape;
use crate::unicode::{CharAttr, compute_char_attrs};
use crate::units::GlyphUnit;

/// Spaces measured for the default tab width.
const SPACES_PER_TAB: i32 = 8;
/// Tab width when the measured one is unusable, in device units.
const FALLBACK_TAB_WIDTH: i32 = 50;

/// Paragraph-wide inputs shared by all lines of a paragraph.
#[derive(Debug)]
pub struct ParagraphContext<'a> {
    text: &'a str,
    log_attrs: Vec<CharAttr>,
    config: &'a ShapeConfig,
    tabs: Option<&'a TabArray>,
    tab_width: OnceCell<GlyphUnit>,
}

impl<'a> ParagraphContext<'a> {
    pub fn new(text: &'a str, config: &'a ShapeConfig) -> Self {
        Self {
            text,
            log_attrs: compute_char_attrs(text),
            config,
            tabs: None,
            tab_width: OnceCell::new(),
        }
    }

    pub fn with_tabs(mut self, tabs: &'a TabArray) -> Self {
        self.tabs = Some(tabs);
        self
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn config(&self) -> &'a ShapeConfig {
        self.config
    }

    pub fn tabs(&self) -> Option<&'a TabArray> {
        self.tabs
    }

    /// One entry per character plus one for the paragraph end.
    pub fn log_attrs(&self) -> &[CharAttr] {
        &self.log_attrs
    }

    /// `item`'s slice of the paragraph.
    pub fn item_text(&self, item: &Item) -> Result<&'a str> {
        item.text(self.text).ok_or_else(|| {
            ShapeError::invalid(format!(
                "item {}..{} outside paragraph of {} bytes",
                item.offset,
                item.end(),
                self.text.len()
            ))
        })
    }

    /// Character attributes starting at `item`'s first character.
    pub fn item_log_attrs(&self, item: &Item) -> Result<&[CharAttr]> {
        let before = self.text.get(..item.offset).ok_or_else(|| {
            ShapeError::invalid(format!("item offset {} is not a char boundary", item.offset))
        })?;
        let start = before.chars().count();
        Ok(self.log_attrs.get(start..).unwrap_or(&[]))
    }

    /// Default distance between tab stops: the configured width, else the
    /// width of eight spaces in the first tab's font. Measured once.
    pub fn tab_width(&self, analysis: &Analysis) -> GlyphUnit {
        *self.tab_width.get_or_init(|| {
            let width = match self.config.tab_width() {
                Some(width) => width,
                None => measure_spaces(analysis, self.config),
            };
            if width <= GlyphUnit::ZERO {
                tracing::debug!(?width, "unusable tab width, using fallback");
                GlyphUnit::from_device_units(FALLBACK_TAB_WIDTH)
            } else {
                width
            }
        })
    }
}

fn measure_spaces(analysis: &Analysis, config: &ShapeConfig) -> GlyphUnit {
    let spaces = " ".repeat(SPACES_PER_TAB as usize);
    // Plain LTR text in the same font, without run attributes.
    let plain = Analysis {
        font: analysis.font.clone(),
        script: analysis.script,
        language: analysis.language.clone(),
        ..Analysis::default()
    };
    shape(&spaces, &spaces, 0, &plain, config.shape_flags()).width()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_tab_width_wins() {
        let config = ShapeConfig {
            tab_width: Some(24.0),
            ..ShapeConfig::default()
        };
        let paragraph = ParagraphContext::new("a\tb", &config);
        assert_eq!(
            paragraph.tab_width(&Analysis::default()),
            GlyphUnit::from_device_units(24)
        );
    }

    #[test]
    fn tab_width_measures_eight_spaces() {
        let config = ShapeConfig::default();
        let paragraph = ParagraphContext::new("a\tb", &config);
        // Without a font each space is a 10-unit placeholder box.
        assert_eq!(
            paragraph.tab_width(&Analysis::default()),
            GlyphUnit::from_device_units(80)
        );
    }

    #[test]
    fn non_positive_tab_width_falls_back() {
        let config = ShapeConfig {
            tab_width: Some(0.0),
            ..ShapeConfig::default()
        };
        let paragraph = ParagraphContext::new("\t", &config);
        assert_eq!(
            paragraph.tab_width(&Analysis::default()),
            GlyphUnit::from_device_units(FALLBACK_TAB_WIDTH)
        );
    }

    #[test]
    fn item_log_attrs_start_at_item() {
        let config = ShapeConfig::default();
        let text = "é a\u{0301}";
        let paragraph = ParagraphContext::new(text, &config);
        let item = Item::new(text, 3, 3, Analysis::default()).unwrap();
        let attrs = paragraph.item_log_attrs(&item).unwrap();
        assert!(attrs[0].is_cursor_position);
        assert!(!attrs[1].is_cursor_position);
        assert_eq!(paragraph.item_text(&item).unwrap(), "a\u{0301}");
    }
}
