use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::io::labels::{parse_labels, HtsDelimiters, LabelFormat};
use crate::io::track::{attach_track, parse_est_file, TrackConfig};
use crate::models::{Corpus, Utterance};

/// File extension of the pitch track paired with each label file
pub const TRACK_EXTENSION: &str = "f0";

/// Where and how to read a corpus from disk
#[derive(Debug, Clone)]
pub struct CorpusSource {
    /// Directory of label files, one per utterance
    pub lab_dir: PathBuf,
    /// Directory of `<name>.f0` EST pitch tracks
    pub pitch_dir: PathBuf,
    pub format: LabelFormat,
    pub delimiters: HtsDelimiters,
    pub track: TrackConfig,
}

impl CorpusSource {
    pub fn new(lab_dir: impl Into<PathBuf>, pitch_dir: impl Into<PathBuf>) -> Self {
        Self {
            lab_dir: lab_dir.into(),
            pitch_dir: pitch_dir.into(),
            format: LabelFormat::default(),
            delimiters: HtsDelimiters::default(),
            track: TrackConfig::default(),
        }
    }

    /// Path of the pitch track for an utterance
    pub fn track_path(&self, name: &str) -> PathBuf {
        self.pitch_dir.join(format!("{}.{}", name, TRACK_EXTENSION))
    }
}

/// Utterance name of a label file: the file name up to its first `.`
pub fn utterance_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let name = file_name.split('.').next().unwrap_or(file_name);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Label files in `dir`, sorted by name.
/// Subdirectories and editor backups ending in `~` are skipped.
pub fn list_label_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read label directory: {:?}", dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {:?}", dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let backup = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with('~'));
        if backup {
            debug!("Skipping backup file {:?}", path);
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Read one utterance: its labels and the matching pitch track
pub fn load_utterance(label_path: &Path, source: &CorpusSource) -> Result<Utterance> {
    let name = utterance_name(label_path)
        .with_context(|| format!("Cannot derive an utterance name from {:?}", label_path))?;

    let content = std::fs::read_to_string(label_path)
        .with_context(|| format!("Failed to read label file: {:?}", label_path))?;
    let sylls = parse_labels(&name, &content, source.format, &source.delimiters);

    let track_path = source.track_path(&name);
    let frames = parse_est_file(&track_path)
        .with_context(|| format!("Missing or unreadable pitch track for {}", name))?;

    debug!(
        "Loaded {}: {} syllables, {} frames",
        name,
        sylls.len(),
        frames.len()
    );
    Ok(attach_track(
        Utterance::with_sylls(name, sylls),
        &frames,
        &source.track,
    ))
}

/// Load every utterance of a corpus, in sorted file name order
pub fn load_corpus(source: &CorpusSource) -> Result<Corpus> {
    source.track.validate()?;

    let files = list_label_files(&source.lab_dir)?;
    info!(
        "Loading {} {} label files from {:?}",
        files.len(),
        source.format,
        source.lab_dir
    );

    let utterances = files
        .iter()
        .map(|path| load_utterance(path, source))
        .collect::<Result<Vec<_>>>()?;

    let corpus = Corpus::new(utterances);
    info!(
        "Loaded {} utterances, {} syllables, {} frames",
        corpus.utterances.len(),
        corpus.syllable_count(),
        corpus.frame_count()
    );
    Ok(corpus)
}
