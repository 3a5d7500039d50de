pub mod error;
pub mod io;
pub mod models;
pub mod smoothing;
pub mod stages;
pub mod stylisers;

pub use error::{Result, StyleError};
pub use io::{
    load_corpus, CorpusSource, HtsDelimiters, LabelFormat, MachineCorpus, StyleMetadata,
    TrackConfig,
};
pub use models::{ContourLabels, Corpus, PitchFrame, Syllable, Utterance};
pub use smoothing::{smooth, SmoothingConfig};
pub use stages::{
    compute_mean_pitch, execute_smoothing, execute_stage3, execute_stylise, normalize,
    remove_unvoiced, MeanPitch, NormalizedCorpus, Stage3Config, StyliseConfig,
};
pub use stylisers::{ContourStyliser, StyleAlgorithm};
