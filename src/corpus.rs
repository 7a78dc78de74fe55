// corpus.rs
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{error::AugmentError, rhyme::Scheme};

/// Poem content as found in the corpus: either one string or a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Lines(Vec<String>),
}

impl Default for Content {
    fn default() -> Self {
        Content::Lines(Vec::new())
    }
}

impl Content {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Content::Text(s) => vec![s.as_str()],
            Content::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Poem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, rename = "type")]
    pub poem_type: Option<String>,
    #[serde(default)]
    pub content: Content,
}

type RawRecord = (String, String, String, String, String, String, String, u8);

/// Per-character annotation. Serialized compactly as
/// `[char, cmn, yue, lzt, cmn_rhyme, yue_rhyme, lzt_rhyme, is_note]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecord", into = "RawRecord")]
pub struct CharRecord {
    pub ch: String,
    pub cmn: String,
    pub yue: String,
    pub lzt: String,
    pub cmn_rhyme: String,
    pub yue_rhyme: String,
    pub lzt_rhyme: String,
    pub is_note: bool,
}

impl CharRecord {
    /// A record with no phonological data, for punctuation and note text.
    pub fn bare(c: char, is_note: bool) -> Self {
        Self {
            ch: c.to_string(),
            is_note,
            ..Default::default()
        }
    }

    pub fn rhyme(&self, scheme: Scheme) -> &str {
        match scheme {
            Scheme::Mandarin => &self.cmn_rhyme,
            Scheme::Cantonese => &self.yue_rhyme,
            Scheme::MiddleChinese => &self.lzt_rhyme,
        }
    }

    pub fn first_char(&self) -> Option<char> {
        self.ch.chars().next()
    }
}

impl From<RawRecord> for CharRecord {
    fn from((ch, cmn, yue, lzt, cmn_rhyme, yue_rhyme, lzt_rhyme, is_note): RawRecord) -> Self {
        Self {
            ch,
            cmn,
            yue,
            lzt,
            cmn_rhyme,
            yue_rhyme,
            lzt_rhyme,
            is_note: is_note != 0,
        }
    }
}

impl From<CharRecord> for RawRecord {
    fn from(r: CharRecord) -> Self {
        (
            r.ch,
            r.cmn,
            r.yue,
            r.lzt,
            r.cmn_rhyme,
            r.yue_rhyme,
            r.lzt_rhyme,
            r.is_note as u8,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedLine {
    pub text: String,
    pub data: Vec<CharRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AugmentedPoem {
    pub id: usize,
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "type")]
    pub poem_type: Option<String>,
    pub content: Vec<AnnotatedLine>,
}

impl AugmentedPoem {
    /// The poem text without notes, used for searching.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .flat_map(|line| line.data.iter())
            .filter(|r| !r.is_note)
            .map(|r| r.ch.as_str())
            .collect()
    }
}

pub fn read_poems<P: AsRef<Path>>(path: P) -> Result<Vec<Poem>, AugmentError> {
    read_json(path)
}

pub fn read_augmented<P: AsRef<Path>>(path: P) -> Result<Vec<AugmentedPoem>, AugmentError> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned, P: AsRef<Path>>(
    path: P,
) -> Result<Vec<T>, AugmentError> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open corpus {}", path.as_ref().display()))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Writes the augmented corpus as a JSON array with one compact poem per line.
pub fn write_augmented<W: Write>(writer: &mut W, poems: &[AugmentedPoem]) -> Result<(), AugmentError> {
    writer.write_all(b"[\n")?;
    for (i, poem) in poems.iter().enumerate() {
        writer.write_all(b"  ")?;
        serde_json::to_writer(&mut *writer, poem)?;
        if i + 1 < poems.len() {
            writer.write_all(b",\n")?;
        } else {
            writer.write_all(b"\n")?;
        }
    }
    writer.write_all(b"]")?;
    Ok(())
}

pub fn save_augmented<P: AsRef<Path>>(path: P, poems: &[AugmentedPoem]) -> Result<(), AugmentError> {
    info!("Saving compacted JSON to {}", path.as_ref().display());
    let mut writer = BufWriter::new(File::create(&path)?);
    write_augmented(&mut writer, poems)?;
    writer.flush()?;
    Ok(())
}
