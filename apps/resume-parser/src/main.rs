use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_parser::config::Config;
use resume_parser::{GeminiClient, ResumeExtractor, ResumeParserFramework};

/// Extract name, email and skills from a PDF or Word resume.
#[derive(Debug, Parser)]
#[command(name = "resume-parser", version)]
struct Cli {
    /// Resume file (.pdf or .docx)
    file: PathBuf,

    /// Pretty-print the JSON record
    #[arg(long)]
    pretty: bool,

    /// Gemini model, overrides GEMINI_MODEL
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries only the JSON record.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_parser={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume-parser v{}", env!("CARGO_PKG_VERSION"));

    let mut settings = config.gemini_settings();
    if let Some(model) = cli.model {
        settings.model = model;
    }
    let llm = GeminiClient::new(settings).context("Failed to initialize the Gemini client")?;
    info!("LLM client initialized (model: {})", llm.model());

    let framework = ResumeParserFramework::new(ResumeExtractor::standard(Arc::new(llm)));

    let record = framework
        .parse_resume(&cli.file)
        .await
        .map_err(|e| anyhow::anyhow!("[{}] {e}", e.code()))
        .with_context(|| format!("Failed to parse resume {}", cli.file.display()))?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{output}");

    Ok(())
}
