//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.crediscope.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Agent runtime settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Baseline portfolio health.
    #[serde(default)]
    pub portfolio: PortfolioConfig,

    /// Simulation settings.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// Agent runtime endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent runtime invocation URL.
    #[serde(default = "default_agent_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            url: default_agent_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_agent_url() -> String {
    "http://localhost:8080/invocations".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Baseline portfolio health, used when flags are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Capital available for disbursement, in dollars.
    #[serde(default = "default_capital")]
    pub capital: f64,

    /// Current default rate as a fraction (0-0.20).
    #[serde(default = "default_default_rate")]
    pub default_rate: f64,

    /// Monthly disbursement target, in dollars.
    #[serde(default = "default_monthly_target")]
    pub monthly_target: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            capital: default_capital(),
            default_rate: default_default_rate(),
            monthly_target: default_monthly_target(),
        }
    }
}

fn default_capital() -> f64 {
    1_000_000.0
}

fn default_default_rate() -> f64 {
    0.035
}

fn default_monthly_target() -> f64 {
    500_000.0
}

/// Simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of applicants to synthesize.
    #[serde(default = "default_count")]
    pub count: usize,

    /// RNG seed for the cohort.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            seed: default_seed(),
        }
    }
}

fn default_count() -> usize {
    20
}

fn default_seed() -> u64 {
    42
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default report path; reports are written only when set here
    /// or via --output.
    #[serde(default)]
    pub output: Option<String>,

    /// Include the recommendations section in evaluation reports.
    #[serde(default = "default_true")]
    pub include_recommendations: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: None,
            include_recommendations: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".crediscope.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, cli: &crate::cli::Cli) {
        if let Some(ref url) = cli.agent_url {
            self.agent.url = url.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.agent.timeout_seconds = timeout;
        }

        // Portfolio flags; --default-rate is a percentage on the CLI.
        if let Some(capital) = cli.capital {
            self.portfolio.capital = capital;
        }
        if let Some(rate_pct) = cli.default_rate {
            self.portfolio.default_rate = rate_pct / 100.0;
        }
        if let Some(target) = cli.monthly_target {
            self.portfolio.monthly_target = target;
        }

        if let Some(ref output) = cli.output {
            self.report.output = Some(output.display().to_string());
        }

        if cli.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
