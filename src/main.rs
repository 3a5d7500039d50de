use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pitchstyle::stages::{SmoothingResult, StyliseResult};
use pitchstyle::stylisers::MIN_STYLISED_FRAMES;
use pitchstyle::{
    compute_mean_pitch, execute_smoothing, execute_stage3, execute_stylise, load_corpus,
    normalize, remove_unvoiced, Corpus, CorpusSource, HtsDelimiters, LabelFormat,
    SmoothingConfig, Stage3Config, StyleAlgorithm, StyleMetadata, StyliseConfig, TrackConfig,
};

#[derive(Parser)]
#[command(name = "pitchstyle")]
#[command(author, version, about = "Syllable pitch contour stylisation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the corpus lives and how to read it
#[derive(clap::Args)]
struct CorpusArgs {
    /// Directory of label files, one per utterance
    #[arg(long)]
    lab_dir: PathBuf,

    /// Directory of EST pitch tracks named <utterance>.f0
    #[arg(long)]
    pitch_dir: PathBuf,

    /// Label file format (hts or simple)
    #[arg(long, default_value = "hts")]
    label_format: LabelFormat,

    /// Four comma-separated HTS delimiters: phone start, phone end,
    /// position start, position end
    #[arg(long, default_value = "-,+,@,/A:", allow_hyphen_values = true)]
    hts_delims: HtsDelimiters,

    /// Pitch track frame shift in seconds
    #[arg(long, default_value = "0.005")]
    frame_shift: f64,
}

impl CorpusArgs {
    fn source(self) -> CorpusSource {
        CorpusSource {
            lab_dir: self.lab_dir,
            pitch_dir: self.pitch_dir,
            format: self.label_format,
            delimiters: self.hts_delims,
            track: TrackConfig {
                frame_shift_s: self.frame_shift,
            },
        }
    }
}

/// LOWESS smoothing knobs
#[derive(clap::Args)]
struct SmoothingArgs {
    /// Fraction of voiced frames in each local fit, in (0, 1]
    #[arg(long, default_value = "0.2")]
    span: f64,

    /// Robustness iterations
    #[arg(long, default_value = "3")]
    iterations: usize,

    /// Regress on voiced-frame index instead of time
    #[arg(long)]
    ignore_unvoiced: bool,

    /// Skip smoothing and only drop unvoiced frames
    #[arg(long)]
    no_smooth: bool,
}

impl SmoothingArgs {
    fn config(&self) -> SmoothingConfig {
        SmoothingConfig {
            span: self.span,
            iterations: self.iterations,
            ignore_unvoiced: self.ignore_unvoiced,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Stylise every syllable of a corpus and write one .sty file per utterance
    Stylise {
        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        smoothing: SmoothingArgs,

        /// Output directory for .sty files
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Stylisation algorithm (SIMPLIFIED, JNDSLAM or SLAM)
        #[arg(short, long, default_value = "SIMPLIFIED")]
        algorithm: StyleAlgorithm,

        /// Append the extreme frame index to every line
        #[arg(long)]
        raw: bool,

        /// Also write a JSON summary of the stylised corpus
        #[arg(long)]
        json: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Load and smooth a corpus and print statistics without writing files
    Analyze {
        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        smoothing: SmoothingArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stylise {
            corpus,
            smoothing,
            out_dir,
            algorithm,
            raw,
            json,
            verbose,
        } => {
            setup_logging(verbose);
            stylise_corpus(corpus.source(), &smoothing, out_dir, algorithm, raw, json)
        }
        Commands::Analyze {
            corpus,
            smoothing,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_corpus(corpus.source(), &smoothing)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Load a corpus and run Stage 0 on it
fn load_and_smooth(source: &CorpusSource, smoothing: &SmoothingArgs) -> Result<SmoothingResult> {
    // Fail on bad knobs before touching the filesystem
    let config = smoothing.config();
    config.validate()?;

    info!("Loading corpus from {:?}", source.lab_dir);
    let corpus = load_corpus(source).context("Failed to load corpus")?;

    if smoothing.no_smooth {
        Ok(remove_unvoiced(corpus))
    } else {
        Ok(execute_smoothing(corpus, &config)?)
    }
}

fn stylise_corpus(
    source: CorpusSource,
    smoothing: &SmoothingArgs,
    out_dir: PathBuf,
    algorithm: StyleAlgorithm,
    raw: bool,
    json: Option<PathBuf>,
) -> Result<()> {
    let smoothed = load_and_smooth(&source, smoothing)?;

    // Stage 1: mean pitch and semitone conversion
    let mean_pitch = compute_mean_pitch(&smoothed.corpus);
    info!("Mean pitch is {}", mean_pitch);
    let normalized = normalize(smoothed.corpus, mean_pitch);

    // Stage 2: stylisation
    let StyliseResult {
        corpus,
        stylised,
        unvoiced,
        ..
    } = execute_stylise(normalized, &StyliseConfig { algorithm });

    // Stage 3: rendering
    let metadata = StyleMetadata::new(&corpus, algorithm, mean_pitch);
    let stage3_config = Stage3Config {
        raw,
        ..Default::default()
    };
    let stage3_result = execute_stage3(&corpus, &out_dir, json.as_deref(), metadata, &stage3_config)?;

    info!(
        "{} files written to {:?}",
        stage3_result.files_written.len(),
        out_dir
    );
    if let Some(json_path) = stage3_result.json_path {
        info!("JSON summary written to {:?}", json_path);
    }

    info!(
        "Complete: {} syllables stylised, {} unvoiced",
        stylised, unvoiced
    );

    Ok(())
}

fn analyze_corpus(source: CorpusSource, smoothing: &SmoothingArgs) -> Result<()> {
    let smoothed = load_and_smooth(&source, smoothing)?;
    let corpus: &Corpus = &smoothed.corpus;
    let mean_pitch = compute_mean_pitch(corpus);

    println!("Corpus Analysis");
    println!("===============");
    println!("Utterances: {}", corpus.utterances.len());
    println!("Syllables: {}", corpus.syllable_count());
    println!("Frames read: {}", smoothed.frames_in);
    println!("Voiced frames: {}", smoothed.frames_out);
    println!("Mean pitch: {}", mean_pitch);
    println!();

    let too_short = corpus
        .syllables()
        .filter(|s| s.pitch_values.len() <= MIN_STYLISED_FRAMES)
        .count();
    let short_pct = if corpus.syllable_count() > 0 {
        too_short as f64 / corpus.syllable_count() as f64 * 100.0
    } else {
        0.0
    };

    println!("Stylisation Coverage");
    println!("--------------------");
    println!("Syllables without voicing: {}", smoothed.empty_syllables);
    println!(
        "Syllables too short to stylise: {} ({:.1}%)",
        too_short, short_pct
    );
    println!();

    println!("Utterance Statistics");
    println!("--------------------");
    for utt in &corpus.utterances {
        let frames: usize = utt.sylls.iter().map(|s| s.pitch_values.len()).sum();
        let duration = utt.sylls.last().map(|s| s.end).unwrap_or(0.0);
        println!(
            "{}: {} syllables, {} voiced frames, {:.2}s",
            utt.name,
            utt.sylls.len(),
            frames,
            duration
        );
    }

    Ok(())
}
