use crate::error::{Result, ShapeError};
use crate::units::{GlyphUnit, SCALE};

/// Largest pixel location that still fits in glyph units.
const MAX_PIXEL_LOCATION: i32 = i32::MAX / SCALE;

/// How text aligns at a tab stop. Only left alignment is supported: text
/// after the tab starts at the stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabAlign {
    #[default]
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tab {
    pub alignment: TabAlign,
    /// Distance from the line start, in pixels or glyph units depending on
    /// the owning array.
    pub location: i32,
}

/// Explicit tab stops for a paragraph.
///
/// Stops past the end of the array repeat the gap between the last two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabArray {
    tabs: Vec<Tab>,
    positions_in_pixels: bool,
}

impl TabArray {
    /// `initial_size` stops, all at location 0.
    pub fn new(initial_size: usize, positions_in_pixels: bool) -> Self {
        Self {
            tabs: vec![Tab::default(); initial_size],
            positions_in_pixels,
        }
    }

    /// Left-aligned stops at `locations`.
    pub fn with_positions(positions_in_pixels: bool, locations: &[i32]) -> Result<Self> {
        let mut tabs = Self::new(locations.len(), positions_in_pixels);
        for (index, location) in locations.iter().enumerate() {
            tabs.set_tab(index, TabAlign::Left, *location)?;
        }
        Ok(tabs)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn positions_in_pixels(&self) -> bool {
        self.positions_in_pixels
    }

    pub fn resize(&mut self, new_size: usize) {
        self.tabs.resize(new_size, Tab::default());
    }

    /// Set stop `index`, growing the array if needed.
    pub fn set_tab(&mut self, index: usize, alignment: TabAlign, location: i32) -> Result<()> {
        if location < 0 {
            return Err(ShapeError::invalid(format!(
                "tab {index} has negative location {location}"
            )));
        }
        if self.positions_in_pixels && location > MAX_PIXEL_LOCATION {
            return Err(ShapeError::invalid(format!(
                "tab {index} location {location}px exceeds {MAX_PIXEL_LOCATION}px"
            )));
        }
        if index >= self.tabs.len() {
            self.resize(index + 1);
        }
        self.tabs[index] = Tab {
            alignment,
            location,
        };
        Ok(())
    }

    pub fn tab(&self, index: usize) -> Option<Tab> {
        self.tabs.get(index).copied()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn location(&self, index: usize) -> GlyphUnit {
        let location = self.tabs[index].location;
        if self.positions_in_pixels {
            GlyphUnit::from_device_units(location)
        } else {
            GlyphUnit(location)
        }
    }

    /// Position of stop `index`, extrapolating past the last stop.
    ///
    /// `default_width` spaces the stops when the array is empty, or when
    /// the last two stops give no positive gap.
    pub fn tab_position(&self, index: usize, default_width: GlyphUnit) -> GlyphUnit {
        let n_tabs = self.tabs.len();
        if index < n_tabs {
            return self.location(index);
        }
        if n_tabs == 0 {
            return saturating_step(GlyphUnit::ZERO, default_width, index);
        }

        let last = self.location(n_tabs - 1);
        let next_to_last = if n_tabs > 1 {
            self.location(n_tabs - 2)
        } else {
            GlyphUnit::ZERO
        };
        let gap = if last > next_to_last {
            last - next_to_last
        } else {
            default_width
        };
        saturating_step(last, gap, index - n_tabs + 1)
    }
}

/// `base + step * count`, clamped to the representable range.
fn saturating_step(base: GlyphUnit, step: GlyphUnit, count: usize) -> GlyphUnit {
    let count = i32::try_from(count).unwrap_or(i32::MAX);
    GlyphUnit(base.raw().saturating_add(step.raw().saturating_mul(count)))
}
