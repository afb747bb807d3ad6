//! Job description vs CV matching client with a local job board API

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod job_board;
pub mod report;
pub mod score;
pub mod submission;
pub mod types;
pub mod utils;
pub mod web;

pub use config::{MatchClientConfig, PdfAnalysisEndpoint};
pub use crate::core::{ConfigManager, MatchClient, Submission};
pub use error::MatchError;
pub use job_board::JobBoard;
pub use score::ScoreTier;
pub use types::{AnalysisRequest, AnalysisResult, Job, PdfFile, StructuredAnalysis};
pub use web::start_web_server;
