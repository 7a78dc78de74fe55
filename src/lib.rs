use std::path::Path;

use log::{debug, info};

pub mod corpus;
mod error;
pub mod rhyme;
pub mod segmenter;
pub mod stats;
pub mod text;

pub use corpus::{AnnotatedLine, AugmentedPoem, CharRecord, Content, Poem};
pub use error::AugmentError;
pub use rhyme::{Scheme, get_rhyme_final};
pub use segmenter::LineSegmenter;
pub use text::{PronunciationLookup, Reading, TextProcessor};

use text::utils::{is_cjk, note_mask};

/// How often progress is reported while augmenting a corpus.
const PROGRESS_INTERVAL: usize = 50;

pub struct PoemAugmenter {
    text_processor: TextProcessor,
    segmenter: LineSegmenter,
}

impl PoemAugmenter {
    pub fn new(text_processor: TextProcessor) -> Self {
        Self {
            text_processor,
            segmenter: LineSegmenter::init(),
        }
    }

    pub fn with_segmenter(mut self, segmenter: LineSegmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Annotates one segmented line, one record per character.
    ///
    /// Only ideographs outside notes are looked up; punctuation and note text
    /// get empty phonological fields.
    pub fn annotate_line(&self, line: &str) -> AnnotatedLine {
        let data = line
            .chars()
            .zip(note_mask(line))
            .map(|(c, is_note)| {
                if is_note || !is_cjk(c) {
                    return CharRecord::bare(c, is_note);
                }
                let [cmn, yue, lzt] = Scheme::ALL.map(|s| self.text_processor.read(c, s));
                CharRecord {
                    ch: c.to_string(),
                    cmn: cmn.pronunciation,
                    yue: yue.pronunciation,
                    lzt: lzt.pronunciation,
                    cmn_rhyme: cmn.rhyme,
                    yue_rhyme: yue.rhyme,
                    lzt_rhyme: lzt.rhyme,
                    is_note: false,
                }
            })
            .collect();

        AnnotatedLine {
            text: line.to_string(),
            data,
        }
    }

    /// Segments and annotates one poem. `id` is its 1-based corpus position.
    pub fn augment_poem(&self, id: usize, poem: &Poem) -> AugmentedPoem {
        let lines = self.segmenter.process_lines(&poem.content.lines());
        debug!("poem #{} segmented into {} lines", id, lines.len());

        AugmentedPoem {
            id,
            title: poem.title.clone(),
            author: poem.author.clone(),
            poem_type: poem.poem_type.clone(),
            content: lines.iter().map(|l| self.annotate_line(l)).collect(),
        }
    }

    pub fn augment_all(&self, poems: &[Poem]) -> Vec<AugmentedPoem> {
        poems
            .iter()
            .enumerate()
            .map(|(i, poem)| {
                if (i + 1) % PROGRESS_INTERVAL == 0 {
                    info!("Processing {}/{}...", i + 1, poems.len());
                }
                self.augment_poem(i + 1, poem)
            })
            .collect()
    }

    /// Reads the corpus at `input`, augments every poem and writes the result
    /// to `output`.
    pub fn augment_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<usize, AugmentError> {
        info!("Loading poems from {}", input.as_ref().display());
        let poems = corpus::read_poems(input)?;
        let augmented = self.augment_all(&poems);
        corpus::save_augmented(output, &augmented)?;
        Ok(augmented.len())
    }
}
