use anyhow::Result;
use rune_shape::bidi::{
    BidiEngine, BidiEngineError, BidiResolution, BracketPair, Direction, ParagraphRequest,
    classify_character, find_base_direction, reorder_visual, resolve_embedding_levels,
    resolve_embedding_levels_with,
};
use unicode_bidi::BidiClass;

struct Failing;

impl BidiEngine for Failing {
    fn resolve_levels(
        &self,
        _text: &str,
        _classes: &[BidiClass],
        _brackets: &[Option<BracketPair>],
        _request: ParagraphRequest,
    ) -> std::result::Result<BidiResolution, BidiEngineError> {
        Err(BidiEngineError("unavailable".into()))
    }
}

#[test]
fn base_direction_needs_a_strong_character() {
    assert_eq!(find_base_direction("123 !@#"), Direction::Neutral);
    assert_eq!(find_base_direction("1a"), classify_character('a'));
    assert_eq!(find_base_direction("« مرحبا »"), Direction::Rtl);
}

#[test]
fn ascii_paragraph_is_all_ltr() {
    let levels = resolve_embedding_levels("The quick brown fox", Direction::Neutral);
    assert_eq!(levels.direction, Direction::Ltr);
    assert_eq!(levels.levels.len(), 19);
    assert!(levels.levels.iter().all(|level| *level == 0));
}

#[test]
fn arabic_paragraph_is_all_rtl() {
    let levels = resolve_embedding_levels("مرحبا بالعالم", Direction::WeakLtr);
    assert_eq!(levels.direction, Direction::Rtl);
    assert!(levels.levels.iter().all(|level| *level == 1));
}

#[test]
fn mixed_paragraph_resolves_runs() -> Result<()> {
    let text = "car שלום 42 end";
    let levels = resolve_embedding_levels(text, Direction::Neutral);
    assert_eq!(levels.direction, Direction::Ltr);
    assert_eq!(levels.levels.len(), text.chars().count());

    let hebrew_start = text.chars().position(|ch| ch == 'ש').ok_or_else(|| anyhow::anyhow!("no shin"))?;
    assert_eq!(&levels.levels[..3], &[0, 0, 0]);
    assert_eq!(&levels.levels[hebrew_start..hebrew_start + 4], &[1, 1, 1, 1]);
    assert_eq!(*levels.levels.last().unwrap_or(&9), 0);
    Ok(())
}

#[test]
fn isolates_skip_fast_path() {
    // An isolate around plain Latin text still resolves, via the engine.
    let text = "ab\u{2067}cd\u{2069}";
    let levels = resolve_embedding_levels(text, Direction::Ltr);
    assert_eq!(levels.levels.len(), 6);
    assert_eq!(&levels.levels[..2], &[0, 0]);
    // Text inside the RLI is embedded above the paragraph level.
    assert!(levels.levels[3] >= 1);
}

#[test]
fn weak_rtl_ignores_letters_inside_isolates() {
    let res = resolve_embedding_levels("\u{2066}abc\u{2069} !", Direction::WeakRtl);
    assert_eq!(res.direction, Direction::Rtl);
    assert_eq!(res.levels, vec![1, 2, 2, 2, 1, 1, 1]);

    // The same isolate under a weak LTR request stays LTR.
    let res = resolve_embedding_levels("\u{2066}abc\u{2069} !", Direction::WeakLtr);
    assert_eq!(res.direction, Direction::Ltr);
    assert_eq!(res.levels[0], 0);
}

#[test]
fn failing_engine_degrades_to_ltr() {
    let levels = resolve_embedding_levels_with(&Failing, "abc שלום", Direction::Rtl);
    assert_eq!(levels.direction, Direction::Ltr);
    assert_eq!(levels.levels, vec![0; 8]);

    // Unidirectional text never reaches the engine.
    let levels = resolve_embedding_levels_with(&Failing, "שלום", Direction::Rtl);
    assert_eq!(levels.direction, Direction::Rtl);
    assert_eq!(levels.levels, vec![1; 4]);
}

#[test]
fn visual_order_of_levels() {
    let levels = resolve_embedding_levels("ab אב cd", Direction::Ltr);
    let order = reorder_visual(&levels.levels);
    assert_eq!(order, vec![0, 1, 2, 4, 3, 5, 6, 7]);
}
