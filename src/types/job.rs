// src/types/job.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::AnalysisResult;

const MAX_TITLE_CHARS: usize = 80;

/// A job card as the UI renders it. Lives only as long as the board holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub match_score: Option<u8>,
    pub why_match: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl Job {
    /// Builds a card from a submitted job description and its analysis.
    pub fn from_analysis(
        id: i64,
        job_text: &str,
        result: &AnalysisResult,
        posted: DateTime<Utc>,
    ) -> Self {
        let description = job_text.trim().to_string();
        let url = if is_job_url(&description) {
            Some(description.clone())
        } else {
            None
        };

        let mut job = Self {
            id,
            title: title_from(&description),
            company: String::new(),
            location: String::new(),
            salary: String::new(),
            match_score: None,
            why_match: Vec::new(),
            missing_keywords: Vec::new(),
            description,
            requirements: Vec::new(),
            posted: posted.format("%Y-%m-%d %H:%M").to_string(),
            url,
            analysis: None,
        };
        job.apply_analysis(result);
        job
    }

    /// Replaces the match fields with a fresh analysis; listing data stays.
    pub fn apply_analysis(&mut self, result: &AnalysisResult) {
        self.match_score = result.match_score();
        self.why_match = result.strengths().to_vec();
        self.missing_keywords = result.missing_skills().to_vec();
        self.analysis = result
            .summary()
            .or_else(|| result.raw_text())
            .map(str::to_string);
    }
}

/// The backend scrapes job descriptions given as URLs.
pub fn is_job_url(text: &str) -> bool {
    let text = text.trim();
    text.starts_with("http://") || text.starts_with("https://")
}

/// First non-blank line, shortened for list display.
pub fn title_from(job_text: &str) -> String {
    let line = job_text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Untitled job");

    if line.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = line.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}...", truncated.trim_end())
    } else {
        line.to_string()
    }
}

/// Static jobs shown before anything has been analyzed.
pub fn seed_jobs() -> Vec<Job> {
    vec![
        Job {
            id: 1,
            title: "Senior Rust Engineer".to_string(),
            company: "Ferrous Systems".to_string(),
            location: "Remote (EU)".to_string(),
            salary: "€85k - €110k".to_string(),
            match_score: Some(92),
            why_match: vec![
                "Five years of async Rust in production".to_string(),
                "Built HTTP services with tokio and axum".to_string(),
            ],
            missing_keywords: vec!["Embedded".to_string()],
            description: "Design and maintain high-throughput network services in Rust."
                .to_string(),
            requirements: vec![
                "Rust".to_string(),
                "Tokio".to_string(),
                "PostgreSQL".to_string(),
            ],
            posted: "2 days ago".to_string(),
            url: None,
            analysis: None,
        },
        Job {
            id: 2,
            title: "Backend Developer".to_string(),
            company: "Northwind Analytics".to_string(),
            location: "Berlin, DE".to_string(),
            salary: "€70k - €90k".to_string(),
            match_score: Some(78),
            why_match: vec!["Strong API design background".to_string()],
            missing_keywords: vec!["Kubernetes".to_string(), "Terraform".to_string()],
            description: "Own the data ingestion APIs behind our analytics platform.".to_string(),
            requirements: vec!["Python".to_string(), "Kubernetes".to_string()],
            posted: "1 week ago".to_string(),
            url: None,
            analysis: None,
        },
        Job {
            id: 3,
            title: "Junior AI Engineer".to_string(),
            company: "Lumen Labs".to_string(),
            location: "Lisbon, PT".to_string(),
            salary: "€40k - €55k".to_string(),
            match_score: Some(61),
            why_match: vec!["Experience with AI and data tooling".to_string()],
            missing_keywords: vec![
                "Python libraries".to_string(),
                "Cloud platforms".to_string(),
            ],
            description: "Prototype LLM-backed features with the research team.".to_string(),
            requirements: vec!["Python".to_string(), "PyTorch".to_string()],
            posted: "3 weeks ago".to_string(),
            url: None,
            analysis: None,
        },
    ]
}
