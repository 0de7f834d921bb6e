//! The `framecap samples` command: caption every entry in the samples manifest.
//!
//! One sample's failure never stops the batch.

use clap::Args;
use framecap_core::{
    CaptionGenerator, CaptionJob, Config, ImageSource, InferenceResult, SampleManifest,
};
use std::path::PathBuf;

use super::ModelOverrides;

const RULE: &str = "==================================================";

/// Arguments for the `samples` command.
#[derive(Args, Debug)]
pub struct SamplesArgs {
    /// Samples directory (defaults to the configured layout)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Prompt template file (defaults to the configured template)
    #[arg(short, long)]
    pub prompt: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ModelOverrides,
}

/// Per-batch tallies.
#[derive(Debug, Default, PartialEq)]
struct BatchStats {
    succeeded: usize,
    failed: usize,
    skipped: usize,
}

/// Console line for one outcome.
fn outcome_line(result: &InferenceResult) -> String {
    match result {
        InferenceResult::Success { text } => format!("✅ Output Text: {text}"),
        InferenceResult::Failure { error_message, .. } => format!("❌ Error: {error_message}"),
    }
}

/// Execute the samples command.
pub async fn execute(args: SamplesArgs, mut config: Config) -> anyhow::Result<()> {
    args.overrides.apply(&mut config);

    let samples_dir = args.dir.clone().unwrap_or_else(|| config.samples_dir());
    let manifest_path = samples_dir.join(&config.layout.manifest_file);

    println!("Caption Generator - Local Test");
    println!("{RULE}");

    if !manifest_path.is_file() {
        println!("Sample file not found: {}", manifest_path.display());
        return Ok(());
    }
    let manifest = SampleManifest::load(&manifest_path)?;
    tracing::info!(
        "Loaded {} sample(s) from {:?}",
        manifest.samples.len(),
        manifest_path
    );

    let generator = CaptionGenerator::new(&config).await;

    println!("\n{RULE}");
    println!("Testing all samples from JSON:");

    let mut stats = BatchStats::default();
    for sample in &manifest.samples {
        println!("\n--- Testing {} ---", sample.label());
        println!("Description: {}", sample.description);

        let image_path = sample.image_path(&samples_dir);
        if !image_path.is_file() {
            println!("⚠️  Image not found: {}", image_path.display());
            stats.skipped += 1;
            continue;
        }

        let mut job = CaptionJob::new(ImageSource::FromPath(image_path), &sample.description);
        if let Some(prompt) = &args.prompt {
            job = job.with_prompt(prompt);
        }

        let result = generator.generate(&job).await;
        if result.is_success() {
            stats.succeeded += 1;
        } else {
            stats.failed += 1;
        }
        println!("{}", outcome_line(&result));
    }

    println!("\n{RULE}");
    println!("Testing complete!");
    log_batch_stats(&stats);
    Ok(())
}

fn log_batch_stats(stats: &BatchStats) {
    if stats.failed > 0 || stats.skipped > 0 {
        tracing::warn!(
            "Samples: {} succeeded, {} failed, {} skipped",
            stats.succeeded,
            stats.failed,
            stats.skipped
        );
    } else {
        tracing::info!("Samples: {} succeeded", stats.succeeded);
    }
}
