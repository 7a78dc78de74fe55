// text/mod.rs
use std::path::Path;

use anyhow::Result;
use log::{debug, info, warn};

use crate::{
    error::AugmentError,
    rhyme::{Scheme, get_rhyme_final},
    text::zh::{jyutping_list::JyutpingDict, mandarin::PinyinLookup, tupa::TupaDict},
};

pub mod utils;
pub mod zh;

/// A source of romanized pronunciations for single characters.
///
/// Implementations may fail or have no reading for a character; callers
/// treat either case as an empty pronunciation.
pub trait PronunciationLookup {
    fn scheme(&self) -> Scheme;
    fn romanize(&self, c: char) -> Result<String>;
}

/// Pronunciation and rhyme of one character in one scheme. Both are empty
/// when the lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reading {
    pub pronunciation: String,
    pub rhyme: String,
}

pub struct TextProcessor {
    lookups: Vec<Box<dyn PronunciationLookup>>,
}

impl TextProcessor {
    pub fn new(lookups: Vec<Box<dyn PronunciationLookup>>) -> Self {
        Self { lookups }
    }

    /// Builds the standard processor: pinyin from the `pinyin` crate plus the
    /// jyutping and Tupa dictionaries when their paths are given.
    pub fn with_dictionaries<P: AsRef<Path>>(
        jyutping_path: Option<P>,
        tupa_path: Option<P>,
    ) -> Result<Self, AugmentError> {
        let mut lookups: Vec<Box<dyn PronunciationLookup>> = vec![Box::new(PinyinLookup)];

        match jyutping_path {
            Some(path) => {
                info!("Loading jyutping dictionary from {}", path.as_ref().display());
                lookups.push(Box::new(JyutpingDict::load(path)?));
            }
            None => warn!("No jyutping dictionary given, Cantonese fields will be empty"),
        }
        match tupa_path {
            Some(path) => {
                info!("Loading Tupa dictionary from {}", path.as_ref().display());
                lookups.push(Box::new(TupaDict::load(path)?));
            }
            None => warn!("No Tupa dictionary given, Middle Chinese fields will be empty"),
        }

        Ok(Self::new(lookups))
    }

    pub fn has_scheme(&self, scheme: Scheme) -> bool {
        self.lookups.iter().any(|l| l.scheme() == scheme)
    }

    /// Looks up `c` in `scheme` and derives its rhyme. Never fails: a missing
    /// lookup or a lookup error yields an empty reading.
    pub fn read(&self, c: char, scheme: Scheme) -> Reading {
        let Some(lookup) = self.lookups.iter().find(|l| l.scheme() == scheme) else {
            return Reading::default();
        };
        match lookup.romanize(c) {
            Ok(pronunciation) => {
                let rhyme = get_rhyme_final(&pronunciation, scheme);
                Reading {
                    pronunciation,
                    rhyme,
                }
            }
            Err(e) => {
                debug!("{scheme} lookup failed for {c:?}: {e}");
                Reading::default()
            }
        }
    }
}
