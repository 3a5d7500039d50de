use tracing::{debug, info};

use crate::error::Result;
use crate::models::{voiced_frames, Corpus, Utterance};
use crate::smoothing::{smooth, SmoothingConfig};

/// Result of Stage 0 smoothing
#[derive(Debug)]
pub struct SmoothingResult {
    /// The corpus with every syllable's frames replaced by the fitted curve
    pub corpus: Corpus,
    /// Frames before smoothing (voiced and unvoiced)
    pub frames_in: usize,
    /// Frames after smoothing (all voiced)
    pub frames_out: usize,
    /// Syllables left without any voiced frame
    pub empty_syllables: usize,
}

/// Execute Stage 0: LOWESS smoothing of every syllable.
///
/// The configuration is validated before any syllable is touched, so an
/// invalid span fails without producing a partial corpus.
pub fn execute_smoothing(corpus: Corpus, config: &SmoothingConfig) -> Result<SmoothingResult> {
    config.validate()?;

    let frames_in = corpus.frame_count();
    info!(
        "Stage 0: Smoothing {} syllables (span={}, iterations={}, ignore_unvoiced={})",
        corpus.syllable_count(),
        config.span,
        config.iterations,
        config.ignore_unvoiced
    );

    let mut utterances = Vec::with_capacity(corpus.utterances.len());
    for utt in corpus.utterances {
        let mut sylls = Vec::with_capacity(utt.sylls.len());
        for syll in utt.sylls {
            let smoothed = smooth(&syll.pitch_values, config)?;
            sylls.push(syll.with_pitch_values(smoothed));
        }
        debug!("Smoothed utterance {}", utt.name);
        utterances.push(Utterance::with_sylls(utt.name, sylls));
    }
    let corpus = Corpus::new(utterances);

    Ok(summarize(corpus, frames_in))
}

/// Stage 0 without smoothing: drop the unvoiced frames and keep the rest as is
pub fn remove_unvoiced(corpus: Corpus) -> SmoothingResult {
    let frames_in = corpus.frame_count();
    info!(
        "Stage 0: Removing unvoiced frames from {} syllables",
        corpus.syllable_count()
    );
    let corpus = corpus.map_syllables(|syll| {
        let voiced = voiced_frames(&syll.pitch_values);
        syll.with_pitch_values(voiced)
    });
    summarize(corpus, frames_in)
}

fn summarize(corpus: Corpus, frames_in: usize) -> SmoothingResult {
    let frames_out = corpus.frame_count();
    let empty_syllables = corpus
        .syllables()
        .filter(|s| s.pitch_values.is_empty())
        .count();

    info!(
        "Stage 0: {} frames in, {} voiced frames out, {} syllables without voicing",
        frames_in, frames_out, empty_syllables
    );

    SmoothingResult {
        corpus,
        frames_in,
        frames_out,
        empty_syllables,
    }
}
