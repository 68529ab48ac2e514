//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{MAX_AGE, MIN_AGE};

/// Crediscope - control dashboard for a credit-scoring agent runtime
///
/// Evaluate loan applicants against a remote scoring agent, inspect
/// portfolio health, and run bulk simulations over synthetic cohorts.
///
/// Examples:
///   crediscope evaluate --age 35 --income 50000
///   crediscope portfolio --default-rate 3.5
///   crediscope simulate --count 50 --seed 42 --output report.md
///   crediscope init-config
#[derive(Parser, Debug, Clone)]
#[command(name = "crediscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Agent runtime invocation URL
    ///
    /// Can also be set via CREDISCOPE_AGENT_URL or .crediscope.toml.
    #[arg(long, global = true, value_name = "URL", env = "CREDISCOPE_AGENT_URL")]
    pub agent_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .crediscope.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Capital available for disbursement ($)
    #[arg(long, global = true, value_name = "AMOUNT")]
    pub capital: Option<f64>,

    /// Current default rate as a percentage (0-20)
    #[arg(long, global = true, value_name = "PCT")]
    pub default_rate: Option<f64>,

    /// Monthly disbursement target ($)
    #[arg(long, global = true, value_name = "AMOUNT")]
    pub monthly_target: Option<f64>,

    /// Write a report to this file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format (markdown, json)
    #[arg(long, global = true, value_name = "FORMAT", default_value = "markdown")]
    pub format: ReportFormat,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Evaluate a single applicant against the agent runtime
    Evaluate(EvaluateArgs),

    /// Show portfolio health metrics and the delinquency gauge
    Portfolio,

    /// Synthesize a random applicant cohort and evaluate it
    Simulate(SimulateArgs),

    /// Generate a default .crediscope.toml configuration file
    InitConfig,
}

/// Applicant parameters for `evaluate`.
#[derive(Debug, Clone, clap::Args)]
pub struct EvaluateArgs {
    /// Applicant age in years (18-80)
    #[arg(long, default_value_t = 35.0, value_name = "YEARS")]
    pub age: f64,

    /// Annual income ($)
    #[arg(long, default_value_t = 50_000.0, value_name = "AMOUNT")]
    pub income: f64,

    /// Years in current employment
    #[arg(long = "job-years", default_value_t = 3.0, value_name = "YEARS")]
    pub job_years: f64,

    /// Debt-to-income ratio (0-1)
    #[arg(long, default_value_t = 0.3, value_name = "RATIO")]
    pub debt_ratio: f64,
}

/// Options for `simulate`.
#[derive(Debug, Clone, clap::Args)]
pub struct SimulateArgs {
    /// Number of applicants to synthesize (1-500)
    #[arg(long, value_name = "COUNT")]
    pub count: Option<usize>,

    /// RNG seed for the cohort
    ///
    /// The same seed always produces the same cohort.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Synthesize and print the cohort without calling the agent
    #[arg(long)]
    pub dry_run: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Upper bound for simulation cohorts.
pub const MAX_SIMULATION_COUNT: usize = 500;

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate agent URL format if provided
        if let Some(ref url) = self.agent_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Agent URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Validate portfolio flags
        if let Some(capital) = self.capital {
            if capital < 0.0 {
                return Err("Capital must be non-negative".to_string());
            }
        }
        if let Some(rate) = self.default_rate {
            if !(0.0..=20.0).contains(&rate) {
                return Err("Default rate must be between 0 and 20 percent".to_string());
            }
        }
        if let Some(target) = self.monthly_target {
            if target < 0.0 {
                return Err("Monthly target must be non-negative".to_string());
            }
        }

        // Per-command validation
        match &self.command {
            Command::Evaluate(args) => {
                if !(MIN_AGE..=MAX_AGE).contains(&args.age) {
                    return Err(format!(
                        "Age must be between {} and {}",
                        MIN_AGE as u32, MAX_AGE as u32
                    ));
                }
                if args.income < 0.0 {
                    return Err("Income must be non-negative".to_string());
                }
                if args.job_years < 0.0 {
                    return Err("Job years must be non-negative".to_string());
                }
                if !(0.0..=1.0).contains(&args.debt_ratio) {
                    return Err("Debt ratio must be between 0.0 and 1.0".to_string());
                }
            }
            Command::Simulate(args) => {
                if let Some(count) = args.count {
                    if count == 0 || count > MAX_SIMULATION_COUNT {
                        return Err(format!(
                            "Simulation count must be between 1 and {}",
                            MAX_SIMULATION_COUNT
                        ));
                    }
                }
            }
            Command::Portfolio | Command::InitConfig => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
