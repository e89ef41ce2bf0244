use crate::bidi::{Direction, reorder_visual};
use crate::error::Result;
use crate::item::{Gravity, Item, ItemProperties, ShowFlags};
use crate::layout::paragraph::ParagraphContext;
use crate::shaping::{
    Glyph, GlyphInfo, GlyphItem, GlyphString, distribute_letter_spacing, shape,
};
use crate::units::{GlyphUnit, Rectangle};

/// Whether a line's cached extents can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStatus {
    #[default]
    NotCached,
    Cached,
    /// Runs have been handed out mutably; extents are recomputed on every
    /// request from now on.
    Leaked,
}

/// Ink and logical extents of a line, relative to the start of its
/// baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineExtents {
    pub ink: Rectangle,
    pub logical: Rectangle,
}

/// Collapse `direction` to LTR or RTL, then adjust for vertical gravity.
pub fn resolve_line_direction(direction: Direction, gravity: Gravity) -> Direction {
    let direction = direction.to_strong();
    match gravity {
        Gravity::South | Gravity::Auto => direction,
        Gravity::North => {
            if direction == Direction::Ltr {
                Direction::Rtl
            } else {
                Direction::Ltr
            }
        }
        Gravity::East => Direction::Ltr,
        Gravity::West => Direction::Rtl,
    }
}

/// One line of shaped runs.
#[derive(Debug, Clone, Default)]
pub struct LayoutLine {
    /// Byte offset of the line in the paragraph.
    pub start_index: usize,
    /// Length of the line in bytes.
    pub length: usize,
    pub is_paragraph_start: bool,
    runs: Vec<GlyphItem>,
    resolved_dir: Direction,
    cache_status: CacheStatus,
    cached: Option<LineExtents>,
}

impl LayoutLine {
    pub fn new(start_index: usize, is_paragraph_start: bool) -> Self {
        Self {
            start_index,
            is_paragraph_start,
            ..Self::default()
        }
    }

    /// Runs in visual order once [`reorder_runs`](Self::reorder_runs) has
    /// been called, logical order before.
    pub fn runs(&self) -> &[GlyphItem] {
        &self.runs
    }

    /// Mutable access to the runs. Marks the line leaked.
    pub fn runs_mut(&mut self) -> &mut Vec<GlyphItem> {
        self.leak();
        &mut self.runs
    }

    pub fn leak(&mut self) {
        self.cache_status = CacheStatus::Leaked;
        self.cached = None;
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.cache_status
    }

    pub fn resolved_direction(&self) -> Direction {
        self.resolved_dir
    }

    pub fn set_resolved_direction(&mut self, direction: Direction, gravity: Gravity) {
        self.resolved_dir = resolve_line_direction(direction, gravity);
    }

    fn invalidate(&mut self) {
        if self.cache_status == CacheStatus::Cached {
            self.cache_status = CacheStatus::NotCached;
        }
        self.cached = None;
    }

    /// Shape `item` and append it to the line.
    pub fn insert_run(&mut self, paragraph: &ParagraphContext<'_>, item: Item) -> Result<()> {
        let length = item.length;
        let run = self.shape_run(paragraph, item)?;
        self.runs.push(run);
        self.length += length;
        self.invalidate();
        Ok(())
    }

    /// Shape `item` for this line: tabs are sized against the line so far,
    /// everything else goes through [`shape`] and then letter spacing.
    pub fn shape_run(&self, paragraph: &ParagraphContext<'_>, item: Item) -> Result<GlyphItem> {
        let text = paragraph.item_text(&item)?;
        let props = item.properties();

        if text.starts_with('\t') {
            let glyphs = self.shape_tab(paragraph, &item, &props);
            return Ok(GlyphItem::new(item, glyphs));
        }

        let glyphs = shape(
            text,
            paragraph.text(),
            item.offset,
            &item.analysis,
            paragraph.config().shape_flags(),
        );
        let mut run = GlyphItem::new(item, glyphs);

        if props.letter_spacing != GlyphUnit::ZERO && !run.glyphs.is_empty() {
            let log_attrs = paragraph.item_log_attrs(&run.item)?;
            run.letter_space(paragraph.text(), log_attrs, props.letter_spacing)?;

            // The run's own outer edges.
            let (left, right) = distribute_letter_spacing(props.letter_spacing);
            let glyphs = run.glyphs.glyphs_mut();
            if let Some(first) = glyphs.first_mut() {
                first.geometry.width += left;
                first.geometry.x_offset += left;
            }
            if let Some(last) = glyphs.last_mut() {
                last.geometry.width += right;
            }
        }
        Ok(run)
    }

    /// A single glyph reaching from the current end of the line to the next
    /// tab stop.
    ///
    /// With explicit tab stops the gap to the stop must be at least one
    /// device unit; with default stops, at least one space.
    pub fn shape_tab(
        &self,
        paragraph: &ParagraphContext<'_>,
        item: &Item,
        props: &ItemProperties,
    ) -> GlyphString {
        let glyph = if props.show.contains(ShowFlags::SPACES) {
            Glyph::unknown('\t')
        } else {
            Glyph::EMPTY
        };

        let current_width = self.width();
        let tab_width = paragraph.tab_width(&item.analysis);
        let min_gap = match paragraph.tabs() {
            Some(_) => GlyphUnit::from_device_units(1),
            None => tab_width / 8,
        };
        let target = current_width + min_gap;

        let mut width = GlyphUnit::ZERO;
        for index in 0.. {
            let position = match paragraph.tabs() {
                Some(tabs) => tabs.tab_position(index, tab_width),
                None => tab_width * index as i32,
            };
            if position >= target {
                width = position - current_width;
                break;
            }
        }

        let mut glyphs = GlyphString::new();
        let mut info = GlyphInfo::new(glyph, width);
        info.is_cluster_start = true;
        glyphs.push(info, 0);
        glyphs
    }

    /// Put the runs in visual order by their embedding levels.
    pub fn reorder_runs(&mut self) {
        let levels: Vec<u8> = self.runs.iter().map(|run| run.item.analysis.level).collect();
        let order = reorder_visual(&levels);
        let mut logical: Vec<Option<GlyphItem>> = self.runs.drain(..).map(Some).collect();
        self.runs = order
            .into_iter()
            .filter_map(|index| logical.get_mut(index).and_then(Option::take))
            .collect();
        self.invalidate();
    }

    /// Sum of all glyph advances, computed on every call.
    pub fn width(&self) -> GlyphUnit {
        self.runs.iter().map(GlyphItem::width).sum()
    }

    /// Ink and logical extents, cached until the runs change or the line
    /// leaks.
    pub fn extents(&mut self) -> LineExtents {
        if self.cache_status == CacheStatus::Cached {
            if let Some(extents) = self.cached {
                return extents;
            }
        }

        let extents = self.compute_extents();
        if self.cache_status != CacheStatus::Leaked {
            self.cache_status = CacheStatus::Cached;
            self.cached = Some(extents);
        }
        extents
    }

    fn compute_extents(&self) -> LineExtents {
        let mut ink = Rectangle::default();
        let mut logical = Rectangle::default();
        let mut x_pos = GlyphUnit::ZERO;

        for run in &self.runs {
            let (run_ink, run_logical) = run_extents(run);

            if !run_ink.is_empty() {
                let placed = run_ink.translate(x_pos, GlyphUnit::ZERO);
                ink = if ink.is_empty() { placed } else { ink.union(&placed) };
            }

            let left = logical.x.min(x_pos + run_logical.x);
            let right = logical.right().max(x_pos + run_logical.right());
            let top = logical.y.min(run_logical.y);
            let bottom = logical.bottom().max(run_logical.bottom());
            logical = Rectangle::new(left, top, right - left, bottom - top);

            x_pos += run_logical.width;
        }

        LineExtents { ink, logical }
    }

    /// X position of the character at paragraph byte `index`.
    pub fn index_to_x(&self, paragraph_text: &str, index: usize, trailing: bool) -> GlyphUnit {
        let mut x_pos = GlyphUnit::ZERO;
        for run in &self.runs {
            let item = &run.item;
            if item.offset <= index && index < item.end() {
                let text = item.text(paragraph_text).unwrap_or("");
                return x_pos
                    + run.glyphs.index_to_x(text, item.analysis.is_rtl(), index - item.offset, trailing);
            }
            x_pos += run.width();
        }
        x_pos
    }

    /// Paragraph byte index of the character under `x`, and whether `x` is
    /// in its trailing half. Positions off either end snap to the nearest
    /// edge of the line.
    pub fn x_to_index(&self, paragraph_text: &str, x: GlyphUnit) -> (usize, bool) {
        let (Some(first), Some(last)) = (self.runs.first(), self.runs.last()) else {
            return (self.start_index, false);
        };
        if x < GlyphUnit::ZERO {
            return visual_edge(first, paragraph_text, true);
        }

        let mut x_pos = GlyphUnit::ZERO;
        for run in &self.runs {
            let width = run.width();
            if x < x_pos + width {
                let item = &run.item;
                let text = item.text(paragraph_text).unwrap_or("");
                let (index, trailing) =
                    run.glyphs.x_to_index(text, item.analysis.is_rtl(), x - x_pos);
                return (item.offset + index, trailing);
            }
            x_pos += width;
        }
        visual_edge(last, paragraph_text, false)
    }
}

fn run_extents(run: &GlyphItem) -> (Rectangle, Rectangle) {
    let props = run.item.properties();
    let (ink, logical) = match props.shape {
        Some(shape) => shape.extents(run.item.num_chars),
        None => run.glyphs.extents(run.item.analysis.font.as_deref()),
    };
    if props.rise == GlyphUnit::ZERO {
        return (ink, logical);
    }
    (
        ink.translate(GlyphUnit::ZERO, -props.rise),
        logical.translate(GlyphUnit::ZERO, -props.rise),
    )
}

/// The character at the visual left or right edge of `run`.
fn visual_edge(run: &GlyphItem, paragraph_text: &str, left: bool) -> (usize, bool) {
    let item = &run.item;
    let last_char = item
        .text(paragraph_text)
        .and_then(|text| text.char_indices().last())
        .map_or(0, |(offset, _)| offset);
    // The left edge of an LTR run is its logical start.
    if left != item.analysis.is_rtl() {
        (item.offset, false)
    } else {
        (item.offset + last_char, true)
    }
}
