use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use shoot_caption::config::MODEL_ENV_VAR;
use shoot_caption::{CaptionPipeline, FileHost, GeminiClient, PipelineConfig};

/// Generate a Slug/Title/Caption/Keywords block from photo shoot notes.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File with the shoot notes. Reads stdin when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the rendered block. Prints to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model identifier sent to Gemini.
    #[arg(long, env = MODEL_ENV_VAR)]
    model: Option<String>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Override the Gemini API root.
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout for the model call.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Credit printed at the end of the caption.
    #[arg(long)]
    credit: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = PipelineConfig::from_env().with_model_override(args.model.as_deref());
    if let Some(credit) = args.credit {
        config = config.with_credit(credit);
    }
    debug!("Using model {}", config.model);

    let mut client =
        GeminiClient::new(args.api_key).with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(base_url) = args.base_url {
        client = client.with_base_url(base_url);
    }

    let mut host = match &args.input {
        Some(path) => FileHost::from_path(path, args.output.clone())
            .with_context(|| format!("reading notes from {}", path.display()))?,
        None => FileHost::from_reader(std::io::stdin().lock(), args.output.clone())
            .context("reading notes from stdin")?,
    };

    let pipeline = CaptionPipeline::new(client, config);
    // The notifier has already reported the failure; only the exit status is left.
    match pipeline.run(&mut host, None).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
