use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{ContourLabels, Corpus, Syllable, Utterance};
use crate::stages::MeanPitch;
use crate::stylisers::StyleAlgorithm;

/// Labels of a syllable, with never-stylised syllables reported as unvoiced
fn labels_of(syll: &Syllable) -> ContourLabels {
    syll.contour.unwrap_or_else(ContourLabels::unvoiced)
}

/// One `.sty` line:
/// `start end identity contour_start contour_direction contour_extreme`,
/// followed by the extreme index (`-1` when unvoiced) in raw mode
pub fn format_syllable_line(syll: &Syllable, raw: bool) -> String {
    let labels = labels_of(syll);
    let mut line = format!(
        "{} {} {} {} {} {}",
        syll.start,
        syll.end,
        syll.identity,
        labels.contour_start,
        labels.contour_direction,
        labels.contour_extreme
    );
    if raw {
        match labels.contour_extreme_pos {
            Some(pos) => line.push_str(&format!(" {}", pos)),
            None => line.push_str(" -1"),
        }
    }
    line
}

/// Per-utterance stylisation file
pub struct StyleFile<'a> {
    utterance: &'a Utterance,
    raw: bool,
}

impl<'a> StyleFile<'a> {
    pub fn new(utterance: &'a Utterance, raw: bool) -> Self {
        Self { utterance, raw }
    }

    /// One line per syllable, in order
    pub fn format(&self) -> String {
        let mut output = String::new();
        for syll in &self.utterance.sylls {
            output.push_str(&format_syllable_line(syll, self.raw));
            output.push('\n');
        }
        output
    }

    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())
            .with_context(|| format!("Failed to write file: {:?}", path))?;
        Ok(())
    }
}

/// Machine-readable summary of a stylised corpus
#[derive(Debug, Clone, Serialize)]
pub struct MachineCorpus {
    pub utterances: Vec<MachineUtterance>,
    pub metadata: StyleMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct MachineUtterance {
    pub name: String,
    pub syllables: Vec<MachineSyllable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MachineSyllable {
    pub start: f64,
    pub end: f64,
    pub identity: String,
    pub contour_start: String,
    pub contour_direction: String,
    pub contour_extreme: String,
    pub contour_extreme_pos: Option<usize>,
    /// Number of smoothed frames the labels were derived from
    pub frame_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleMetadata {
    /// RFC 3339 creation time
    pub generated_at: String,
    pub algorithm: StyleAlgorithm,
    pub mean_pitch_hz: f64,
    pub total_utterances: usize,
    pub total_syllables: usize,
    pub unvoiced_syllables: usize,
}

impl StyleMetadata {
    /// Metadata stamped with the current time
    pub fn new(corpus: &Corpus, algorithm: StyleAlgorithm, mean_pitch: MeanPitch) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            algorithm,
            mean_pitch_hz: mean_pitch.hz(),
            total_utterances: corpus.utterances.len(),
            total_syllables: corpus.syllable_count(),
            unvoiced_syllables: corpus
                .syllables()
                .filter(|s| labels_of(s).is_unvoiced())
                .count(),
        }
    }
}

impl MachineSyllable {
    fn from_syllable(syll: &Syllable) -> Self {
        let labels = labels_of(syll);
        Self {
            start: syll.start,
            end: syll.end,
            identity: syll.identity.clone(),
            contour_start: labels.contour_start.to_string(),
            contour_direction: labels.contour_direction.to_string(),
            contour_extreme: labels.contour_extreme.to_string(),
            contour_extreme_pos: labels.contour_extreme_pos,
            frame_count: syll.pitch_values.len(),
        }
    }
}

impl MachineCorpus {
    pub fn from_corpus(corpus: &Corpus, metadata: StyleMetadata) -> Self {
        let utterances = corpus
            .utterances
            .iter()
            .map(|utt| MachineUtterance {
                name: utt.name.clone(),
                syllables: utt.sylls.iter().map(MachineSyllable::from_syllable).collect(),
            })
            .collect();

        Self {
            utterances,
            metadata,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}
