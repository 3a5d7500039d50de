use tracing::{debug, info};

use crate::models::Corpus;
use crate::stages::NormalizedCorpus;
use crate::stylisers::{stylise_syllable, StyleAlgorithm};

/// Configuration for Stage 2 stylisation
#[derive(Debug, Clone, Default)]
pub struct StyliseConfig {
    /// Labelling scheme applied to every syllable
    pub algorithm: StyleAlgorithm,
}

/// Result of Stage 2 stylisation
#[derive(Debug)]
pub struct StyliseResult {
    /// Corpus with contour labels on every syllable
    pub corpus: Corpus,
    /// Syllables that received register labels
    pub stylised: usize,
    /// Syllables labelled unvoiced for having too few frames
    pub unvoiced: usize,
    /// Stylised syllables with an internal extreme
    pub with_extreme: usize,
}

/// Execute Stage 2: label each syllable's contour.
///
/// The algorithm is resolved once; every syllable is then labelled
/// independently, overwriting any earlier labels.
pub fn execute_stylise(normalized: NormalizedCorpus, config: &StyliseConfig) -> StyliseResult {
    let styliser = config.algorithm.styliser();
    info!(
        "Stage 2: Stylising with {} (mean pitch {})",
        styliser.name(),
        normalized.mean_pitch()
    );

    let mut stylised = 0;
    let mut unvoiced = 0;
    let mut with_extreme = 0;

    let corpus = normalized.into_corpus().map_syllables(|mut syll| {
        let labels = stylise_syllable(&syll, styliser.as_ref());
        if labels.is_unvoiced() {
            unvoiced += 1;
        } else {
            stylised += 1;
            if labels.contour_extreme.is_extreme() {
                with_extreme += 1;
            }
        }
        debug!(
            "{} {} {} {}",
            syll.identity, labels.contour_start, labels.contour_direction, labels.contour_extreme
        );
        syll.contour = Some(labels);
        syll
    });

    info!(
        "Stage 2: {} syllables stylised, {} unvoiced, {} with an extreme",
        stylised, unvoiced, with_extreme
    );

    StyliseResult {
        corpus,
        stylised,
        unvoiced,
        with_extreme,
    }
}
