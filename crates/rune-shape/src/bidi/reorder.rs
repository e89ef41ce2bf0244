use unicode_bidi::{BidiInfo, LTR_LEVEL, Level};

/// Visual order of a sequence of levelled items (rule L2).
///
/// Returns a permutation where `order[visual] = logical`. Levels above the
/// UAX #9 maximum are treated as LTR.
pub fn reorder_visual(levels: &[u8]) -> Vec<usize> {
    let levels: Vec<Level> = levels
        .iter()
        .map(|level| {
            Level::new(*level).unwrap_or_else(|_| {
                tracing::warn!(level, "embedding level out of range");
                LTR_LEVEL
            })
        })
        .collect();
    BidiInfo::reorder_visual(&levels)
}
