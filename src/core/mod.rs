// src/core/mod.rs
//! Backend client and configuration

pub mod config_manager;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use service_client::{MatchClient, Submission};
