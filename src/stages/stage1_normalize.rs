use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{Corpus, PitchFrame};

/// Corpus-wide mean F0 in Hz, the reference for semitone conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanPitch(f64);

impl MeanPitch {
    pub fn new(hz: f64) -> Self {
        Self(hz)
    }

    pub fn hz(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for MeanPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} Hz", self.0)
    }
}

/// A corpus whose voiced frames hold semitone offsets from `mean_pitch`.
///
/// Only [`normalize`] builds one, so anything taking a `NormalizedCorpus`
/// runs after the mean was fixed and every frame was converted.
#[derive(Debug, Clone)]
pub struct NormalizedCorpus {
    corpus: Corpus,
    mean_pitch: MeanPitch,
}

impl NormalizedCorpus {
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn mean_pitch(&self) -> MeanPitch {
        self.mean_pitch
    }

    pub fn into_corpus(self) -> Corpus {
        self.corpus
    }
}

/// Arithmetic mean of every voiced frame value in the corpus.
/// Falls back to 0 when the corpus has no voiced frames.
pub fn compute_mean_pitch(corpus: &Corpus) -> MeanPitch {
    let (sum, count) = corpus
        .syllables()
        .flat_map(|s| s.pitch_values.iter())
        .filter(|f| f.voiced)
        .fold((0.0, 0usize), |(sum, count), f| (sum + f.value, count + 1));

    if count == 0 {
        warn!("No voiced frames in corpus, mean pitch defaults to 0");
        return MeanPitch(0.0);
    }
    MeanPitch(sum / count as f64)
}

/// Semitone offset of `f0` from `mean_f0`: `12 * log2(f0 / mean_f0)`
pub fn f0_to_semitone(f0: f64, mean_f0: f64) -> f64 {
    12.0 * (f0 / mean_f0).log2()
}

/// Inverse of [`f0_to_semitone`]
pub fn semitone_to_f0(semitone: f64, mean_f0: f64) -> f64 {
    mean_f0 * 2f64.powf(semitone / 12.0)
}

/// Execute Stage 1: convert every voiced frame from Hz to semitones around
/// the corpus mean. Consumes the corpus so no frame is converted twice.
pub fn normalize(corpus: Corpus, mean_pitch: MeanPitch) -> NormalizedCorpus {
    info!("Stage 1: Normalizing to semitones around mean pitch {}", mean_pitch);

    let mean = mean_pitch.hz();
    let corpus = corpus.map_syllables(|syll| {
        let values = syll
            .pitch_values
            .iter()
            .map(|f| {
                if f.voiced {
                    PitchFrame::new(f.time, true, f0_to_semitone(f.value, mean))
                } else {
                    *f
                }
            })
            .collect();
        syll.with_pitch_values(values)
    });

    NormalizedCorpus { corpus, mean_pitch }
}

/// Compute the corpus mean and normalize against it in one step
pub fn normalize_corpus(corpus: Corpus) -> NormalizedCorpus {
    let mean_pitch = compute_mean_pitch(&corpus);
    info!("Mean pitch is {}", mean_pitch);
    normalize(corpus, mean_pitch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Syllable, Utterance};
    use approx::assert_relative_eq;

    fn corpus(values: &[&[(bool, f64)]]) -> Corpus {
        let utterances = values
            .iter()
            .enumerate()
            .map(|(u, sylls)| {
                let syll = Syllable::new(0.0, 1.0, "s").with_pitch_values(
                    sylls
                        .iter()
                        .enumerate()
                        .map(|(i, &(voiced, v))| PitchFrame::new(i as f64 * 0.005, voiced, v))
                        .collect(),
                );
                Utterance::with_sylls(format!("utt{}", u), vec![syll])
            })
            .collect();
        Corpus::new(utterances)
    }

    #[test]
    fn test_mean_spans_all_utterances() {
        let corpus = corpus(&[&[(true, 100.0), (false, 0.0)], &[(true, 200.0), (true, 300.0)]]);
        assert_relative_eq!(compute_mean_pitch(&corpus).hz(), 200.0);
    }

    #[test]
    fn test_mean_of_unvoiced_corpus_is_zero() {
        let corpus = corpus(&[&[(false, 120.0)], &[]]);
        assert_eq!(compute_mean_pitch(&corpus).hz(), 0.0);
        assert_eq!(compute_mean_pitch(&Corpus::default()).hz(), 0.0);
    }

    #[test]
    fn test_semitone_conversion() {
        assert_relative_eq!(f0_to_semitone(200.0, 100.0), 12.0, epsilon = 1e-12);
        assert_relative_eq!(f0_to_semitone(50.0, 100.0), -12.0, epsilon = 1e-12);
        assert_eq!(f0_to_semitone(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_semitone_round_trip() {
        for &mean in &[80.0, 123.4, 250.0] {
            for &f0 in &[55.0, 99.9, 180.0, 440.0, 1000.0] {
                let back = semitone_to_f0(f0_to_semitone(f0, mean), mean);
                assert_relative_eq!(back, f0, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_normalize_converts_voiced_frames_only() {
        let corpus = corpus(&[&[(true, 200.0), (false, 150.0)]]);

        let normalized = normalize(corpus, MeanPitch::new(100.0));

        let frames = &normalized.corpus().utterances[0].sylls[0].pitch_values;
        assert_relative_eq!(frames[0].value, 12.0, epsilon = 1e-12);
        assert_eq!(frames[1].value, 150.0);
        assert_eq!(normalized.mean_pitch().hz(), 100.0);
    }

    #[test]
    fn test_normalize_corpus_uses_global_mean() {
        let corpus = corpus(&[&[(true, 100.0)], &[(true, 400.0)]]);

        let normalized = normalize_corpus(corpus);

        assert_relative_eq!(normalized.mean_pitch().hz(), 250.0);
        let first = normalized.corpus().utterances[0].sylls[0].pitch_values[0].value;
        assert_relative_eq!(first, f0_to_semitone(100.0, 250.0));
    }
}
