//! URL Threat DNA - Command Line Scanner

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use urldna_core::constants::{APP_NAME, APP_VERSION};
use urldna_core::logic::features::extract_features;
use urldna_core::logic::model::{load_classifier, ModelConfig};
use urldna_core::logic::scan::{predict_batch, predict_url};

#[derive(Parser, Debug)]
#[command(
    name = "urldna",
    about = "Classify URLs and score their threat DNA from lexical features",
    version,
    long_about = None
)]
struct Args {
    /// URLs to scan
    urls: Vec<String>,

    /// File with one URL per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the full JSON report
    #[arg(long)]
    json: bool,

    /// Print the raw feature record instead of classifying
    #[arg(long)]
    features: bool,

    /// ONNX model artifact (defaults to MODEL_PATH)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Label encoder JSON (defaults to LABELS_PATH)
    #[arg(short, long)]
    labels: Option<PathBuf>,

    /// Expected SHA-256 of the model artifact (defaults to MODEL_SHA256)
    #[arg(long)]
    model_sha256: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn collect_urls(args: &Args) -> Result<Vec<String>> {
    let mut urls = args.urls.clone();

    if let Some(path) = &args.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL list {}", path.display()))?;
        urls.extend(content.lines().map(str::to_string));
    }

    if urls.iter().all(|u| u.trim().is_empty()) {
        bail!("No URLs given; pass them as arguments or with --file");
    }
    Ok(urls)
}

fn model_config(args: &Args) -> ModelConfig {
    let env = ModelConfig::from_env();
    ModelConfig {
        model_path: args.model.clone().or(env.model_path),
        model_sha256: args.model_sha256.clone().or(env.model_sha256),
        labels_path: args.labels.clone().or(env.labels_path),
    }
}

fn print_features(urls: &[String]) -> Result<()> {
    for url in urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
        let record = serde_json::json!({
            "url": url,
            "features": extract_features(url),
        });
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let urls = collect_urls(&args)?;

    if args.features {
        return print_features(&urls);
    }

    let classifier = load_classifier(&model_config(&args)).context("Failed to load classifier")?;
    info!("Classifier ready: {}", classifier.method());

    if args.json {
        let report = match urls.as_slice() {
            [single] => serde_json::to_string_pretty(&predict_url(classifier.as_ref(), single)?)?,
            many => serde_json::to_string_pretty(&predict_batch(classifier.as_ref(), many)?)?,
        };
        println!("{}", report);
        return Ok(());
    }

    for url in urls.iter().filter(|u| !u.trim().is_empty()) {
        let prediction = predict_url(classifier.as_ref(), url)?;
        let (signal, score) = prediction.dna.dominant_signal().unwrap_or(("-", 0.0));
        println!(
            "{:<11} {:>5.1}%  {:<20} {:.2}  {}",
            prediction.prediction, prediction.confidence, signal, score, prediction.url
        );
    }

    Ok(())
}
