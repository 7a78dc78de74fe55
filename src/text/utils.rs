// text/utils.rs

/// CJK Unified Ideographs block, the only range counted as poem content.
pub fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

pub fn is_note_open(c: char) -> bool {
    matches!(c, '（' | '(')
}

pub fn is_note_close(c: char) -> bool {
    matches!(c, '）' | ')')
}

/// Flags every character of `line` that belongs to a parenthetical note,
/// brackets included.
pub fn note_mask(line: &str) -> Vec<bool> {
    let mut in_note = false;
    line.chars()
        .map(|c| {
            if is_note_open(c) {
                in_note = true;
                true
            } else if is_note_close(c) {
                in_note = false;
                true
            } else {
                in_note
            }
        })
        .collect()
}
