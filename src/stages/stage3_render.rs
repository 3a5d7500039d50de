use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::io::{MachineCorpus, StyleFile, StyleMetadata};
use crate::models::Corpus;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Append the extreme index to every line
    pub raw: bool,
    /// Extension of the per-utterance files
    pub extension: String,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            raw: false,
            extension: "sty".to_string(),
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    /// Per-utterance files, in corpus order
    pub files_written: Vec<PathBuf>,
    /// Path to the JSON summary (if generated)
    pub json_path: Option<PathBuf>,
}

/// Execute Stage 3: Rendering
///
/// Writes `<out_dir>/<utterance>.<extension>` for every utterance and,
/// when `json_output` is given, a machine-readable summary of the corpus.
pub fn execute_stage3(
    corpus: &Corpus,
    out_dir: &Path,
    json_output: Option<&Path>,
    metadata: StyleMetadata,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    let mut result = Stage3Result {
        files_written: Vec::with_capacity(corpus.utterances.len()),
        json_path: None,
    };

    info!(
        "Stage 3: Writing {} utterances to {:?}",
        corpus.utterances.len(),
        out_dir
    );
    for utt in &corpus.utterances {
        let path = out_dir.join(format!("{}.{}", utt.name, config.extension));
        StyleFile::new(utt, config.raw).write_file(&path)?;
        result.files_written.push(path);
    }

    if let Some(path) = json_output {
        info!("Writing JSON summary to {:?}", path);
        MachineCorpus::from_corpus(corpus, metadata).write_json(path)?;
        result.json_path = Some(path.to_path_buf());
    }

    Ok(result)
}
