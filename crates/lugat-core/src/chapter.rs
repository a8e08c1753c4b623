//! Chapter arithmetic: fixed-size slices of the entry list are the atomic
//! unit of checkpoint durability.

/// Number of chapters needed for `total` entries.
pub fn chapter_count(total: usize, chapter_size: usize) -> usize {
    total.div_ceil(chapter_size)
}

/// Global `[start, end)` bounds of a chapter.
pub fn chapter_bounds(total: usize, chapter_size: usize, chapter: usize) -> (usize, usize) {
    let start = chapter * chapter_size;
    (start.min(total), ((chapter + 1) * chapter_size).min(total))
}

/// Chapter to resume from, given the durable cursor. The cursor only ever
/// lands on chapter boundaries (or the end of the list), so this is the
/// first chapter with unpersisted entries.
pub fn resume_chapter(processed: usize, chapter_size: usize) -> usize {
    processed / chapter_size
}

/// Whole-number progress, rounded.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}
