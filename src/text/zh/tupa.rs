use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};

use crate::{error::AugmentError, rhyme::Scheme, text::PronunciationLookup};

/// Middle Chinese (Tupa) readings.
///
/// One `char<TAB>reading` entry per line, `#` starts a comment. When a
/// character is listed more than once the first reading wins.
#[derive(Debug, Default)]
pub struct TupaDict {
    readings: HashMap<char, String>,
}

impl TupaDict {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AugmentError> {
        let contents = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read Tupa dictionary {}", path.as_ref().display())
        })?;
        Ok(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut readings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let columns: Vec<&str> = line.split('\t').collect();
            let mut chars = columns[0].chars();
            match (chars.next(), chars.next(), columns.get(1)) {
                (Some(c), None, Some(reading)) if !reading.trim().is_empty() => {
                    readings
                        .entry(c)
                        .or_insert_with(|| reading.trim().to_string());
                }
                _ => warn!("Skipping malformed line: {}", line),
            }
        }
        debug!("loaded {} Tupa entries", readings.len());
        Self { readings }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl PronunciationLookup for TupaDict {
    fn scheme(&self) -> Scheme {
        Scheme::MiddleChinese
    }

    fn romanize(&self, c: char) -> Result<String> {
        self.readings
            .get(&c)
            .cloned()
            .ok_or_else(|| anyhow!("no Tupa reading for {}", c))
    }
}
