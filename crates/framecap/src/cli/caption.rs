//! The `framecap caption` command.

use clap::{ArgGroup, Args};
use framecap_core::{CaptionGenerator, CaptionJob, Config, ImageSource, InferenceResult};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};

use super::ModelOverrides;

/// Arguments for the `caption` command.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["image", "inline"])))]
pub struct CaptionArgs {
    /// Image file, or `-` to read the image from stdin (files fall back to
    /// the sample directories by file name)
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Inline base64 image, optionally prefixed with `data:<mime>;base64,`
    #[arg(long)]
    pub inline: Option<String>,

    /// Video description substituted into the prompt
    #[arg(short, long)]
    pub description: String,

    /// Prompt template file (defaults to the configured template)
    #[arg(short, long)]
    pub prompt: Option<PathBuf>,

    /// Print the result as JSON (`{success, output_text | error}`)
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: ModelOverrides,
}

impl CaptionArgs {
    /// Build the job, reading the image from `stdin` when `--image -` is given.
    async fn job<R>(&self, stdin: R) -> anyhow::Result<CaptionJob>
    where
        R: AsyncRead + Unpin,
    {
        let source = match (&self.inline, &self.image) {
            (Some(payload), _) => ImageSource::FromInlinePayload(payload.clone()),
            (None, Some(path)) if path == Path::new("-") => {
                ImageSource::FromBytes(read_image(stdin).await?)
            }
            (None, path) => ImageSource::FromPath(path.clone().unwrap_or_default()),
        };
        let job = CaptionJob::new(source, &self.description);
        Ok(match &self.prompt {
            Some(prompt) => job.with_prompt(prompt),
            None => job,
        })
    }
}

async fn read_image<R>(mut reader: R) -> anyhow::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).await?;
    if bytes.is_empty() {
        anyhow::bail!("No image data on stdin");
    }
    tracing::debug!("Read {} image bytes from stdin", bytes.len());
    Ok(bytes)
}

/// Execute the caption command.
pub async fn execute(args: CaptionArgs, mut config: Config) -> anyhow::Result<()> {
    args.overrides.apply(&mut config);
    let generator = CaptionGenerator::new(&config).await;
    tracing::info!(
        "Captioning with {} ({} in {})",
        generator.backend_name(),
        config.model.model_id,
        config.model.region
    );

    let job = args.job(tokio::io::stdin()).await?;
    let result = generator.generate(&job).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.to_response())?);
        return Ok(());
    }

    match result {
        InferenceResult::Success { text } => {
            println!("{text}");
            Ok(())
        }
        InferenceResult::Failure { error_message, .. } => anyhow::bail!(error_message),
    }
}
