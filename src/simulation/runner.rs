//! Sequential simulation loop.
//!
//! Each applicant is evaluated with its own agent call, one at a time.
//! A failed call is logged as a warning and the loop continues.

use crate::agent::AgentClient;
use crate::models::{Applicant, PortfolioHealth, SimulationRecord};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

/// Result of a simulation run.
#[derive(Debug, Default)]
pub struct SimulationOutcome {
    /// Successfully evaluated applicants, in cohort order.
    pub records: Vec<SimulationRecord>,
    /// Number of applicants whose evaluation failed.
    pub failures: usize,
}

/// Runs a cohort through the agent runtime.
pub struct SimulationRunner<'a> {
    client: &'a AgentClient,
    portfolio: &'a PortfolioHealth,
    show_progress: bool,
}

impl<'a> SimulationRunner<'a> {
    /// Create a runner bound to one client and portfolio snapshot.
    pub fn new(client: &'a AgentClient, portfolio: &'a PortfolioHealth, show_progress: bool) -> Self {
        Self {
            client,
            portfolio,
            show_progress,
        }
    }

    /// Evaluate the cohort sequentially.
    pub async fn run(&self, applicants: &[Applicant]) -> SimulationOutcome {
        let progress = if self.show_progress {
            let pb = ProgressBar::new(applicants.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                    )
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut records = Vec::with_capacity(applicants.len());
        let mut failures = 0;

        for (i, applicant) in applicants.iter().enumerate() {
            let id = i + 1;

            match self.client.evaluate(applicant, self.portfolio).await {
                Ok(evaluation) => {
                    records.push(SimulationRecord {
                        id,
                        age: applicant.age,
                        income: applicant.income,
                        score_ml: evaluation.score_ml,
                        decision: evaluation.verdict.decision.clone(),
                    });
                }
                Err(e) => {
                    failures += 1;
                    warn!("Applicant {}/{} failed: {}", id, applicants.len(), e);
                }
            }

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!(
            "Simulation complete: {} evaluated, {} failed",
            records.len(),
            failures
        );

        SimulationOutcome { records, failures }
    }
}
