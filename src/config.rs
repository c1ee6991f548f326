//! @ai:module:intent Configuration structs for the evaluation harness
//! @ai:module:layer infrastructure
//! @ai:module:public_api EvalConfig, ApiConfig, RunConfig, PathConfig, TestSelection
//! @ai:module:stateless true

use crate::error::{EvalError, Result};
use crate::metrics::FailurePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the evaluation harness
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub paths: PathConfig,
}

/// @ai:intent Settings for the chat-completions oracle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_rate_limit")]
    pub requests_per_minute: u32,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

/// @ai:intent Which evaluations a run performs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TestSelection {
    Accuracy,
    Performance,
    #[default]
    All,
}

impl TestSelection {
    /// @ai:effects pure
    pub fn includes_accuracy(&self) -> bool {
        matches!(self, TestSelection::Accuracy | TestSelection::All)
    }

    /// @ai:effects pure
    pub fn includes_performance(&self) -> bool {
        matches!(self, TestSelection::Performance | TestSelection::All)
    }
}

/// @ai:intent Run configuration for accuracy and load evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub test: TestSelection,
    /// Tokens drawn for the load test
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    #[serde(default = "default_concurrency")]
    pub concurrency_level: usize,
    #[serde(default = "default_repeat_count")]
    pub repeat_count: usize,
    /// Known-reliable tokens in the curated accuracy sample
    #[serde(default = "default_reliable_samples")]
    pub reliable_samples: usize,
    /// Known-scam tokens in the curated accuracy sample
    #[serde(default = "default_scam_samples")]
    pub scam_samples: usize,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default)]
    pub dry_run: bool,
}

/// @ai:intent Path configuration for input/output directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Extra TOML corpus; the built-in corpus is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_dir: Option<PathBuf>,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            requests_per_minute: default_rate_limit(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            test: TestSelection::default(),
            sample_count: default_sample_count(),
            concurrency_level: default_concurrency(),
            repeat_count: default_repeat_count(),
            reliable_samples: default_reliable_samples(),
            scam_samples: default_scam_samples(),
            failure_policy: FailurePolicy::default(),
            dry_run: false,
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            corpus_dir: None,
            results_dir: default_results_dir(),
        }
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_rate_limit() -> u32 {
    60
}

fn default_timeout() -> u64 {
    60
}

fn default_sample_count() -> usize {
    5
}

fn default_concurrency() -> usize {
    3
}

fn default_repeat_count() -> usize {
    1
}

fn default_reliable_samples() -> usize {
    3
}

fn default_scam_samples() -> usize {
    2
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

impl EvalConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Reject counts that would make a run meaningless
    /// @ai:effects pure
    pub fn validate(&self) -> Result<()> {
        let run = &self.run;

        if run.concurrency_level == 0 {
            return Err(EvalError::invalid_config("concurrency_level must be at least 1"));
        }
        if run.sample_count == 0 {
            return Err(EvalError::invalid_config("sample_count must be at least 1"));
        }
        if run.repeat_count == 0 {
            return Err(EvalError::invalid_config("repeat_count must be at least 1"));
        }
        if run.reliable_samples == 0 && run.scam_samples == 0 {
            return Err(EvalError::invalid_config(
                "accuracy sample needs at least one reliable or scam token",
            ));
        }
        if self.api.requests_per_minute == 0 {
            return Err(EvalError::invalid_config("requests_per_minute must be at least 1"));
        }

        Ok(())
    }
}
