// src/core/config_manager.rs
//! Configuration loading: optional config.yaml, then environment variables

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::config::{MatchClientConfig, PdfAnalysisEndpoint, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub job_matching_url: String,
    pub pdf_analysis_endpoint: PdfAnalysisEndpoint,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub seed_jobs: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            job_matching_url: DEFAULT_BASE_URL.to_string(),
            pdf_analysis_endpoint: PdfAnalysisEndpoint::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed_jobs: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    service: ServiceConfig,
    server: ServerConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: EnvironmentSection,
    production: EnvironmentSection,
}

impl ConfigManager {
    /// Load from `config.yaml` in the working directory if present.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load from an explicit file, which then must exist.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let section = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::parse_section(&content, &environment)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else if config_path.is_some() {
            anyhow::bail!("Config file not found: {}", path.display());
        } else {
            EnvironmentSection::default()
        };

        let mut config = Self {
            environment,
            service: section.service,
            server: section.server,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        info!("Job matching service: {}", config.service.job_matching_url);
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOB_AGENT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn parse_section(content: &str, environment: &str) -> Result<EnvironmentSection> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    /// Environment variables win over file values.
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("JOB_MATCHING_API_URL") {
            self.service.job_matching_url = url;
        }

        if let Some(endpoint) = lookup("JOB_MATCHING_PDF_ENDPOINT") {
            self.service.pdf_analysis_endpoint = endpoint
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
        }

        if let Some(timeout) = lookup("JOB_MATCHING_TIMEOUT_SECS") {
            self.service.timeout_seconds = timeout
                .parse::<u64>()
                .context("JOB_MATCHING_TIMEOUT_SECS must be a number of seconds")?;
        }

        if let Some(port) = lookup("JOB_AGENT_PORT") {
            self.server.port = port
                .parse::<u16>()
                .context("JOB_AGENT_PORT must be a valid port number")?;
        }

        if let Some(seed) = lookup("JOB_AGENT_SEED_JOBS") {
            self.server.seed_jobs = matches!(seed.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(())
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.service.job_matching_url = url;
        }
        self
    }

    pub fn client_config(&self) -> MatchClientConfig {
        MatchClientConfig::new(&self.service.job_matching_url)
            .with_pdf_endpoint(self.service.pdf_analysis_endpoint)
            .with_timeout(Duration::from_secs(self.service.timeout_seconds))
    }
}
