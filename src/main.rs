//! Crediscope - Control Dashboard for a Credit-Scoring Agent Runtime
//!
//! A CLI tool that submits loan applicants and portfolio parameters to a
//! remote scoring agent and renders the returned decisions as terminal
//! metrics, charts, and file reports.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Invalid arguments or runtime error (connection, malformed response)

mod agent;
mod analysis;
mod cli;
mod config;
mod models;
mod render;
mod report;
mod simulation;

use agent::AgentClient;
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Cli, Command, EvaluateArgs, ReportFormat, SimulateArgs};
use config::Config;
use models::{
    Applicant, EvaluationReport, PortfolioHealth, ReportMetadata, SimulationReport,
    SimulationSummary,
};
use simulation::{ApplicantGenerator, SimulationRunner};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Validate arguments
    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(cli.command, Command::InitConfig) {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&cli);

    info!("Crediscope v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", cli);

    match run(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .crediscope.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".crediscope.toml");

    if path.exists() {
        eprintln!("⚠️  .crediscope.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .crediscope.toml")?;

    println!("✅ Created .crediscope.toml with default settings.");
    println!("   Edit it to customize the agent URL, portfolio baseline, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(cli: &Cli) {
    let level = cli.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch the selected command.
async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let mut config = load_config(&cli)?;
    config.merge_with_args(&cli);

    let portfolio = PortfolioHealth::new(
        config.portfolio.capital,
        config.portfolio.default_rate,
        config.portfolio.monthly_target,
    )
    .map_err(|e| anyhow::anyhow!("Invalid portfolio configuration: {}", e))?;

    match cli.command.clone() {
        Command::Evaluate(args) => run_evaluate(&cli, &config, &portfolio, &args).await,
        Command::Portfolio => {
            render::print_portfolio(&portfolio);
            Ok(())
        }
        Command::Simulate(args) => run_simulate(&cli, &config, &portfolio, &args).await,
        Command::InitConfig => handle_init_config(),
    }
}

/// Evaluate a single applicant and render the decision.
async fn run_evaluate(
    cli: &Cli,
    config: &Config,
    portfolio: &PortfolioHealth,
    args: &EvaluateArgs,
) -> Result<()> {
    let applicant = Applicant::new(args.age, args.income, args.job_years, args.debt_ratio)
        .map_err(|e| anyhow::anyhow!("Invalid applicant: {}", e))?;

    let client = AgentClient::new(config.agent.url.clone(), config.agent.timeout_seconds);

    println!("🤖 Agent runtime: {}", client.url());
    println!("🔍 Evaluating applicant...");

    let start_time = Instant::now();
    let evaluation = client.evaluate(&applicant, portfolio).await?;
    let duration = start_time.elapsed().as_secs_f64();

    render::print_evaluation(&evaluation);

    if let Some(path) = config.report.output.clone() {
        let report = EvaluationReport {
            metadata: report_metadata(&config.agent.url, duration),
            applicant,
            portfolio: portfolio.clone(),
            evaluation,
        };

        let output = match cli.format {
            ReportFormat::Markdown => report::generate_evaluation_markdown(
                &report,
                config.report.include_recommendations,
            ),
            ReportFormat::Json => report::generate_evaluation_json(&report)?,
        };

        std::fs::write(&path, &output)
            .with_context(|| format!("Failed to write report to {}", path))?;
        println!("✅ Report saved to: {}", path);
    }

    Ok(())
}

/// Synthesize a cohort and run it through the agent.
async fn run_simulate(
    cli: &Cli,
    config: &Config,
    portfolio: &PortfolioHealth,
    args: &SimulateArgs,
) -> Result<()> {
    let count = args.count.unwrap_or(config.simulation.count);
    let seed = args.seed.unwrap_or(config.simulation.seed);

    println!("🎲 Synthesizing {} applicants (seed {})", count, seed);
    let mut generator = ApplicantGenerator::new(seed);
    let applicants = generator.cohort(count);

    if args.dry_run {
        println!("\n🔍 Dry run: no agent calls were made.");
        render::print_cohort(&applicants);
        return Ok(());
    }

    let client = AgentClient::new(config.agent.url.clone(), config.agent.timeout_seconds);

    println!("🤖 Agent runtime: {}", client.url());
    println!("🔬 Evaluating cohort...\n");

    let start_time = Instant::now();
    let runner = SimulationRunner::new(&client, portfolio, !cli.quiet);
    let outcome = runner.run(&applicants).await;
    let duration = start_time.elapsed().as_secs_f64();

    if outcome.records.is_empty() {
        anyhow::bail!(
            "All {} evaluations failed; is the agent runtime reachable?",
            count
        );
    }

    let summary = SimulationSummary::from_records(&outcome.records, outcome.failures);
    let histogram = analysis::score_histogram(&outcome.records, analysis::DEFAULT_BINS);
    let counts = analysis::decision_counts(&outcome.records);

    render::print_simulation(&outcome.records, &summary, &histogram, &counts);
    println!("   Duration: {:.1}s", duration);

    if let Some(path) = config.report.output.clone() {
        let report = SimulationReport {
            metadata: report_metadata(&config.agent.url, duration),
            portfolio: portfolio.clone(),
            seed,
            summary,
            histogram,
            records: outcome.records,
        };

        let output = match cli.format {
            ReportFormat::Markdown => report::generate_simulation_markdown(&report),
            ReportFormat::Json => report::generate_simulation_json(&report)?,
        };

        std::fs::write(&path, &output)
            .with_context(|| format!("Failed to write report to {}", path))?;
        println!("\n✅ Report saved to: {}", path);
    }

    Ok(())
}

/// Report metadata stamped at generation time.
fn report_metadata(agent_url: &str, duration_seconds: f64) -> ReportMetadata {
    ReportMetadata {
        agent_url: agent_url.to_string(),
        generated_at: Utc::now(),
        duration_seconds,
    }
}

/// Load configuration from file or use defaults.
fn load_config(cli: &Cli) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = cli.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .crediscope.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
