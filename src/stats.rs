// stats.rs
//! Rhyme statistics over an augmented corpus.
//!
//! The rhyme target of a poem is the rhyme of its last annotated character.
//! A position rhymes when the last non-note character before a delimiter, or
//! at the end of a line, carries that same rhyme.

use std::collections::BTreeSet;

use log::debug;

use crate::{
    corpus::{AugmentedPoem, CharRecord},
    rhyme::Scheme,
};

/// Poem types with a fixed rhyme scheme, in reporting order.
pub const REGULATED_TYPES: [&str; 4] = ["五言絕句", "七言絕句", "五言律詩", "七言律詩"];

pub fn is_rhyme_delimiter(c: char) -> bool {
    matches!(c, '，' | '。' | '？' | '！' | '；' | ',' | '.' | '?' | '!' | ';')
}

fn record_is_delimiter(r: &CharRecord) -> bool {
    r.first_char().is_some_and(is_rhyme_delimiter)
}

/// Rhyme of the last non-note character that has one.
pub fn rhyme_target(poem: &AugmentedPoem, scheme: Scheme) -> Option<&str> {
    poem.content
        .iter()
        .rev()
        .flat_map(|line| line.data.iter().rev())
        .filter(|r| !r.is_note)
        .map(|r| r.rhyme(scheme))
        .find(|rhyme| !rhyme.is_empty())
}

/// Indices of records in `records` that rhyme with `target`.
pub fn rhyme_indices_for_line(records: &[CharRecord], target: &str, scheme: Scheme) -> BTreeSet<usize> {
    let mut indices = BTreeSet::new();
    if target.is_empty() {
        return indices;
    }
    let rhymes_at = |k: usize| records[k].rhyme(scheme) == target;

    // before delimiters
    for (i, record) in records.iter().enumerate() {
        if !record_is_delimiter(record) {
            continue;
        }
        if let Some(k) = (0..i).rev().find(|&k| !records[k].is_note) {
            if rhymes_at(k) {
                indices.insert(k);
            }
        }
    }

    // end of line
    if let Some(k) = (0..records.len())
        .rev()
        .find(|&k| !records[k].is_note && !record_is_delimiter(&records[k]))
    {
        if rhymes_at(k) {
            indices.insert(k);
        }
    }
    indices
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhymeStats {
    /// Rhyming positions in the whole poem; a single stray match counts as 0.
    pub matched: usize,
    /// Delimiter slots, or the line count when the poem has no delimiters.
    pub total: usize,
    /// Required lines that contain at least one rhyming position.
    pub required_rhymed: usize,
    pub required_total: usize,
    pub passed: bool,
    pub adherence: f64,
}

fn required_lines(poem_type: &str) -> Option<&'static [usize]> {
    if poem_type.contains("絕句") {
        Some(&[1, 3])
    } else if poem_type.contains("律詩") {
        Some(&[1, 3, 5, 7])
    } else {
        None
    }
}

/// Rhyme statistics for regulated verse; `None` for other poem types.
pub fn calculate_rhyme_stats(poem: &AugmentedPoem, scheme: Scheme) -> Option<RhymeStats> {
    let required = required_lines(poem.poem_type.as_deref().unwrap_or(""))?;

    let mut total = poem
        .content
        .iter()
        .flat_map(|line| line.data.iter())
        .filter(|r| !r.is_note && record_is_delimiter(r))
        .count();
    if total == 0 {
        total = poem.content.len();
    }

    let Some(target) = rhyme_target(poem, scheme) else {
        return Some(RhymeStats {
            matched: 0,
            total,
            required_rhymed: 0,
            required_total: required.len(),
            passed: false,
            adherence: 0.0,
        });
    };

    let required_rhymed = required
        .iter()
        .filter_map(|&idx| poem.content.get(idx))
        .filter(|line| !rhyme_indices_for_line(&line.data, target, scheme).is_empty())
        .count();

    let mut matched: usize = poem
        .content
        .iter()
        .map(|line| rhyme_indices_for_line(&line.data, target, scheme).len())
        .sum();
    if matched <= 1 {
        matched = 0;
    }

    let adherence = if total > 0 {
        matched as f64 / total as f64
    } else {
        0.0
    };
    debug!(
        "poem #{} ({}): target {:?}, {}/{}",
        poem.id, scheme, target, matched, total
    );

    Some(RhymeStats {
        matched,
        total,
        required_rhymed,
        required_total: required.len(),
        passed: adherence >= 0.5,
        adherence,
    })
}

/// Search over title, author and note-free text, optionally restricted to
/// one poem type.
#[derive(Debug, Clone, Default)]
pub struct PoemFilter {
    pub term: String,
    pub poem_type: Option<String>,
}

impl PoemFilter {
    pub fn matches(&self, poem: &AugmentedPoem) -> bool {
        let term = self.term.to_lowercase();
        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|f| f.to_lowercase().contains(&term))
        };
        let matches_term = term.is_empty()
            || contains(&poem.title)
            || contains(&poem.author)
            || poem.plain_text().contains(&term);
        let matches_type = match &self.poem_type {
            Some(t) if !t.is_empty() => poem.poem_type.as_deref() == Some(t.as_str()),
            _ => true,
        };
        matches_term && matches_type
    }

    pub fn apply<'a>(&self, poems: &'a [AugmentedPoem]) -> Vec<&'a AugmentedPoem> {
        poems.iter().filter(|p| self.matches(p)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSummary {
    pub poem_type: String,
    pub poems: usize,
    pub passed: usize,
}

/// Counts, for every type in `types` that occurs in the corpus, how many of
/// its poems pass the rhyme check in `scheme`.
pub fn summarize_by_type(poems: &[AugmentedPoem], types: &[&str], scheme: Scheme) -> Vec<TypeSummary> {
    types
        .iter()
        .filter_map(|&t| {
            let applicable: Vec<_> = poems
                .iter()
                .filter(|p| p.poem_type.as_deref() == Some(t))
                .collect();
            if applicable.is_empty() {
                return None;
            }
            let passed = applicable
                .iter()
                .filter(|p| calculate_rhyme_stats(p, scheme).is_some_and(|s| s.passed))
                .count();
            Some(TypeSummary {
                poem_type: t.to_string(),
                poems: applicable.len(),
                passed,
            })
        })
        .collect()
}
