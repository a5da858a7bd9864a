use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use elocution::audio::normalizer::{MediaNormalizer, SymphoniaNormalizer};
use elocution::audio::pcm;
use elocution::cli::{AlignArgs, Cli, Command, EvaluateArgs, NormalizeArgs};
use elocution::config::{AlignmentConfig, AppConfig};
use elocution::evaluation::alignment::{align, AlignmentStep, EditCounts};
use elocution::evaluation::analysis::word_error_rate;
use elocution::evaluation::Evaluator;
use elocution::recognizer::{HypothesisFileRecognizer, RecognizerRegistry};
use elocution::types::tokenize;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Evaluate(args) => handle_evaluate(&args),
        Command::Normalize(args) => handle_normalize(&args),
        Command::Align(args) => handle_align(&args),
    }
}

fn handle_evaluate(args: &EvaluateArgs) -> Result<()> {
    let config = AppConfig::load(args.config.clone())?;
    let reference = args.reference_text()?;
    let registry = build_registry(args);

    let wav = normalize_file(&args.audio)?;
    let audio = pcm::read_wav(&wav).context("normalized audio is not valid PCM")?;

    let recognizer = registry.get(&args.recognizer)?;
    let report = Evaluator::new(config.evaluation)
        .evaluate_with(recognizer, &audio, &reference, &args.language)
        .context("evaluation failed")?;
    print_json(&report, args.pretty)
}

fn build_registry(args: &EvaluateArgs) -> RecognizerRegistry {
    let mut registry = RecognizerRegistry::new();
    if let Some(path) = &args.hypotheses {
        registry = registry.register(Box::new(HypothesisFileRecognizer::new(path)));
    }
    registry
}

fn handle_normalize(args: &NormalizeArgs) -> Result<()> {
    let wav = normalize_file(&args.input)?;
    fs::write(&args.output, &wav)
        .with_context(|| format!("failed to write normalized audio to {:?}", args.output))?;
    info!(output = %args.output.display(), bytes = wav.len(), "wrote normalized audio");
    Ok(())
}

fn normalize_file(path: &Path) -> Result<Vec<u8>> {
    let media =
        fs::read(path).with_context(|| format!("failed to read media file {:?}", path))?;
    let extension = path.extension().and_then(|e| e.to_str());
    let wav = SymphoniaNormalizer::new()
        .normalize(media, extension)
        .with_context(|| format!("failed to normalize {:?}", path))?;
    Ok(wav)
}

#[derive(Serialize)]
struct AlignmentSummary {
    word_error_rate: f64,
    matches: usize,
    substitutions: usize,
    insertions: usize,
    deletions: usize,
    steps: Vec<AlignmentStep>,
}

fn handle_align(args: &AlignArgs) -> Result<()> {
    let reference = tokenize(&args.reference);
    let hypothesis = tokenize(&args.hypothesis);
    let steps = align(&reference, &hypothesis, &AlignmentConfig::default())?;
    let counts = EditCounts::from_steps(&steps);
    let wer = word_error_rate(&counts, reference.len(), hypothesis.len());
    print_json(
        &AlignmentSummary {
            word_error_rate: wer,
            matches: counts.matches,
            substitutions: counts.substitutions,
            insertions: counts.insertions,
            deletions: counts.deletions,
            steps,
        },
        true,
    )
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
