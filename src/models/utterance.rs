use serde::{Deserialize, Serialize};

use super::{ContourLabels, PitchFrame};

/// A syllable with its slice of the pitch track and, once stylised, its labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllable {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Syllable identity (concatenated phone names or the label text)
    pub identity: String,
    /// Pitch frames inside the syllable, ordered by time
    pub pitch_values: Vec<PitchFrame>,
    /// Contour labels, unset until stylisation runs
    pub contour: Option<ContourLabels>,
}

impl Syllable {
    pub fn new(start: f64, end: f64, identity: impl Into<String>) -> Self {
        Self {
            start,
            end,
            identity: identity.into(),
            pitch_values: Vec::new(),
            contour: None,
        }
    }

    /// Same syllable with a different frame sequence
    pub fn with_pitch_values(self, pitch_values: Vec<PitchFrame>) -> Self {
        Self {
            pitch_values,
            ..self
        }
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Number of voiced frames
    pub fn voiced_count(&self) -> usize {
        self.pitch_values.iter().filter(|f| f.voiced).count()
    }
}

/// One utterance: a name and its syllables in chronological order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub name: String,
    pub sylls: Vec<Syllable>,
}

impl Utterance {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sylls: Vec::new(),
        }
    }

    pub fn with_sylls(name: impl Into<String>, sylls: Vec<Syllable>) -> Self {
        Self {
            name: name.into(),
            sylls,
        }
    }
}

/// All utterances processed together in one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub utterances: Vec<Utterance>,
}

impl Corpus {
    pub fn new(utterances: Vec<Utterance>) -> Self {
        Self { utterances }
    }

    /// Iterate over every syllable of every utterance, in order
    pub fn syllables(&self) -> impl Iterator<Item = &Syllable> {
        self.utterances.iter().flat_map(|u| u.sylls.iter())
    }

    /// Total number of syllables
    pub fn syllable_count(&self) -> usize {
        self.utterances.iter().map(|u| u.sylls.len()).sum()
    }

    /// Total number of frames, voiced or not
    pub fn frame_count(&self) -> usize {
        self.syllables().map(|s| s.pitch_values.len()).sum()
    }

    /// Total number of voiced frames
    pub fn voiced_frame_count(&self) -> usize {
        self.syllables().map(Syllable::voiced_count).sum()
    }

    /// Rewrite every syllable with `f`, keeping utterance and syllable order
    pub fn map_syllables<F>(self, mut f: F) -> Self
    where
        F: FnMut(Syllable) -> Syllable,
    {
        let utterances = self
            .utterances
            .into_iter()
            .map(|utt| Utterance {
                name: utt.name,
                sylls: utt.sylls.into_iter().map(&mut f).collect(),
            })
            .collect();
        Self { utterances }
    }
}
