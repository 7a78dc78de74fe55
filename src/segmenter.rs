use log::debug;

use crate::text::utils::{is_cjk, is_note_close, is_note_open};

/// Re-splits raw poem lines at sentence terminators.
///
/// A split needs at least `min_content_chars` ideographs (note text excluded)
/// since the previous split. A parenthetical note directly after a terminator
/// is kept with it: the split waits until the note closes.
pub struct LineSegmenter {
    pub min_content_chars: usize,
    pub terminators: Vec<char>,
}

impl Default for LineSegmenter {
    fn default() -> Self {
        Self::init()
    }
}

impl LineSegmenter {
    pub fn init() -> Self {
        LineSegmenter {
            min_content_chars: 10,
            terminators: vec!['。', '？', '！'],
        }
    }

    /// Segments every raw line of a poem and concatenates the results in order.
    pub fn process_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|line| self.process(line.as_ref()))
            .collect()
    }

    pub fn process(&self, line: &str) -> Vec<String> {
        let chars: Vec<char> = line.chars().collect();
        let mut lines = Vec::new();
        let mut buffer = String::with_capacity(line.len());
        let mut content_count = 0;
        let mut in_paren = false;
        let mut deferred_split = false;

        for (idx, &c) in chars.iter().enumerate() {
            buffer.push(c);

            if is_note_open(c) {
                in_paren = true;
            }

            if !in_paren && is_cjk(c) {
                content_count += 1;
            }

            if is_note_close(c) {
                in_paren = false;
                if deferred_split {
                    lines.push(std::mem::take(&mut buffer));
                    content_count = 0;
                    deferred_split = false;
                }
                continue;
            }

            // Only split if we have enough content
            let is_terminator = !in_paren && self.terminators.contains(&c);
            if is_terminator && content_count >= self.min_content_chars {
                if next_opens_note(&chars, idx + 1) {
                    deferred_split = true;
                } else {
                    lines.push(std::mem::take(&mut buffer));
                    content_count = 0;
                    deferred_split = false;
                }
            }
        }

        if !buffer.is_empty() {
            lines.push(buffer);
        }
        debug!("segmented {:?} into {:?}", line, lines);
        lines
    }
}

/// Whether the first non-whitespace character at or after `start` opens a note.
pub fn next_opens_note(chars: &[char], start: usize) -> bool {
    chars
        .iter()
        .skip(start)
        .find(|c| !c.is_whitespace())
        .is_some_and(|&c| is_note_open(c))
}
