use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};

use crate::{error::AugmentError, rhyme::Scheme, text::PronunciationLookup};

/// Cantonese readings keyed by code point.
///
/// The dictionary file is a JSON object mapping hex code points to one or
/// more space-separated jyutping readings, e.g. `{"4E2D": "zung1 zung3"}`.
/// Only the first reading is kept.
#[derive(Debug, Default)]
pub struct JyutpingDict {
    toned: HashMap<u32, String>,
}

impl JyutpingDict {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AugmentError> {
        let contents = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read jyutping dictionary {}", path.as_ref().display())
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, AugmentError> {
        let table: HashMap<String, String> = serde_json::from_str(contents)?;
        let mut toned = HashMap::with_capacity(table.len());

        for (code, jyutping) in table {
            let Some(jyutping) = jyutping.split_whitespace().next() else {
                debug!("empty jyutping entry for {}", code);
                continue;
            };
            match u32::from_str_radix(code.trim_start_matches("U+"), 16) {
                Ok(code_int) => {
                    toned.insert(code_int, jyutping.to_string());
                }
                Err(_) => warn!("Skipping malformed code point: {}", code),
            }
        }
        debug!("loaded {} jyutping entries", toned.len());
        Ok(Self { toned })
    }

    pub fn len(&self) -> usize {
        self.toned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toned.is_empty()
    }
}

impl PronunciationLookup for JyutpingDict {
    fn scheme(&self) -> Scheme {
        Scheme::Cantonese
    }

    fn romanize(&self, c: char) -> Result<String> {
        self.toned
            .get(&(c as u32))
            .cloned()
            .ok_or_else(|| anyhow!("no jyutping for {}", c))
    }
}
