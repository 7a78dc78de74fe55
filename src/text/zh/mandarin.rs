use anyhow::{Result, anyhow};
use pinyin::ToPinyin;

use crate::{rhyme::Scheme, text::PronunciationLookup};

/// Mandarin readings from the `pinyin` crate, tone number at the end
/// (`zhong1`).
#[derive(Debug, Default, Clone, Copy)]
pub struct PinyinLookup;

impl PronunciationLookup for PinyinLookup {
    fn scheme(&self) -> Scheme {
        Scheme::Mandarin
    }

    fn romanize(&self, c: char) -> Result<String> {
        c.to_pinyin()
            .map(|p| p.with_tone_num_end().to_string())
            .ok_or_else(|| anyhow!("illegal zh char: {}", c))
    }
}
