// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::core::{ConfigManager, MatchClient, Submission};
use crate::report::{render_console, render_json};
use crate::score::ScoreTier;
use crate::types::{AnalysisRequest, PdfFile};
use crate::utils::{file_name_of, read_file_bytes, resolve_text_arg};
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "job-agent")]
#[command(about = "Score job descriptions against your CV")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Job matching backend, overrides config and environment
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to a config.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a job description against a CV
    Analyze {
        /// Job text or URL, or @FILE
        #[arg(long)]
        job: String,
        /// CV text, or @FILE
        #[arg(long, conflicts_with = "cv_pdf", required_unless_present = "cv_pdf")]
        cv_text: Option<String>,
        /// PDF résumé
        #[arg(long)]
        cv_pdf: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,
    },
    /// Extract the text of a PDF résumé
    ExtractPdf { path: PathBuf },
    /// Upload a CV document (PDF or Word)
    UploadCv { path: PathBuf },
    /// Print the tier for a match score
    Tier {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        score: u8,
    },
    /// Run the local job board API
    Serve {
        #[arg(long)]
        port: Option<u16>,
        /// Start with the demo jobs
        #[arg(long)]
        seed: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ConfigManager::load_from(cli.config.as_deref())?.with_base_url(cli.base_url);

    match cli.command {
        Command::Analyze {
            job,
            cv_text,
            cv_pdf,
            format,
        } => {
            let job_text = resolve_text_arg(&job).await?;
            let request = match (cv_text, cv_pdf) {
                (_, Some(path)) => {
                    AnalysisRequest::text_with_pdf(job_text, PdfFile::from_path(&path).await?)
                }
                (Some(text), None) => {
                    AnalysisRequest::text_pair(job_text, resolve_text_arg(&text).await?)
                }
                (None, None) => anyhow::bail!("Provide --cv-text or --cv-pdf"),
            };

            let client = MatchClient::new(config.client_config())?;
            debug!("Submitting request to {}", client.config().base_url);

            match client.submit(&request).await? {
                Submission::Analysis(result) => match format {
                    OutputFormat::Console => print!("{}", render_console(&result)),
                    OutputFormat::Json => println!("{}", render_json(&result)?),
                },
                Submission::ExtractedText(text) => println!("{}", text),
            }
        }

        Command::ExtractPdf { path } => {
            let pdf_file = PdfFile::from_path(&path).await?;
            let client = MatchClient::new(config.client_config())?;

            let text = client.extract_pdf_text(&pdf_file).await?;
            info!("Extracted {} chars from {}", text.len(), pdf_file.file_name());
            println!("{}", text);
        }

        Command::UploadCv { path } => {
            let file_name = file_name_of(&path)
                .with_context(|| format!("Invalid file path: {}", path.display()))?;
            let bytes = read_file_bytes(&path).await?;
            let client = MatchClient::new(config.client_config())?;

            let response = client.upload_cv(&file_name, None, bytes).await?;
            println!("✅ CV '{}' uploaded", file_name);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::Tier { score } => {
            let tier = ScoreTier::from_score(score);
            println!("{} {}% {} ({})", tier.emoji(), score, tier.label(), tier.color());
        }

        Command::Serve { port, seed } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            config.server.seed_jobs |= seed;
            start_web_server(&config).await?;
        }
    }

    Ok(())
}
