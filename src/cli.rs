use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "elocution",
    version,
    about = "Pronunciation and prosody evaluation against a reference text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score an utterance against a reference text and print a JSON report.
    Evaluate(EvaluateArgs),
    /// Convert any supported media file into mono 16 kHz 16-bit WAV.
    Normalize(NormalizeArgs),
    /// Align two texts word by word and print the word error rate.
    Align(AlignArgs),
}

#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("reference_source")
        .required(true)
        .args(["reference", "reference_file"])
))]
pub struct EvaluateArgs {
    /// Recording of the learner (WAV, MP3, FLAC, OGG, ...).
    #[arg(long)]
    pub audio: PathBuf,
    /// Reference text the learner was asked to read.
    #[arg(long)]
    pub reference: Option<String>,
    /// File containing the reference text.
    #[arg(long = "reference-file")]
    pub reference_file: Option<PathBuf>,
    /// Recorded recognizer output (enables the hypothesis-file recognizer).
    #[arg(long)]
    pub hypotheses: Option<PathBuf>,
    /// Recognizer backend to use.
    #[arg(long, default_value = "hypothesis-file")]
    pub recognizer: String,
    /// Language tag passed to the recognizer and recorded in the report.
    #[arg(long, default_value = "en")]
    pub language: String,
    /// JSON file overriding evaluation thresholds.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Pretty-print the JSON report.
    #[arg(long)]
    pub pretty: bool,
}

impl EvaluateArgs {
    pub fn reference_text(&self) -> Result<String> {
        match (&self.reference, &self.reference_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read reference text from {:?}", path)),
            (None, None) => bail!("provide --reference or --reference-file"),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Source media file.
    #[arg(long)]
    pub input: PathBuf,
    /// Destination WAV path.
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct AlignArgs {
    #[arg(long)]
    pub reference: String,
    #[arg(long)]
    pub hypothesis: String,
}
