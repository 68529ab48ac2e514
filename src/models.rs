//! Data models for the scoring dashboard.
//!
//! This module contains all the core data structures used throughout
//! the application: applicant and portfolio records, agent runtime
//! responses, and simulation results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Minimum accepted applicant age.
pub const MIN_AGE: f64 = 18.0;
/// Maximum accepted applicant age.
pub const MAX_AGE: f64 = 80.0;
/// Maximum accepted portfolio default rate, as a fraction.
pub const MAX_DEFAULT_RATE: f64 = 0.20;

/// Validation failure for a user-supplied field.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// A loan applicant as submitted to the agent runtime.
///
/// Wire names follow the agent contract; the runtime owns this schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    /// Age in years (18-80).
    #[serde(rename = "edad")]
    pub age: f64,
    /// Annual income in dollars.
    #[serde(rename = "ingresos")]
    pub income: f64,
    /// Years in current employment.
    #[serde(rename = "estabilidad_laboral")]
    pub job_stability_years: f64,
    /// Debt-to-income ratio (0-1).
    #[serde(rename = "ratio_deuda_ingreso")]
    pub debt_to_income: f64,
}

impl Applicant {
    /// Creates a validated applicant record.
    pub fn new(
        age: f64,
        income: f64,
        job_stability_years: f64,
        debt_to_income: f64,
    ) -> Result<Self, ValidationError> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::OutOfRange {
                field: "age",
                min: MIN_AGE,
                max: MAX_AGE,
                value: age,
            });
        }
        if income < 0.0 {
            return Err(ValidationError::Negative {
                field: "income",
                value: income,
            });
        }
        if job_stability_years < 0.0 {
            return Err(ValidationError::Negative {
                field: "job stability",
                value: job_stability_years,
            });
        }
        if !(0.0..=1.0).contains(&debt_to_income) {
            return Err(ValidationError::OutOfRange {
                field: "debt-to-income ratio",
                min: 0.0,
                max: 1.0,
                value: debt_to_income,
            });
        }

        Ok(Self {
            age,
            income,
            job_stability_years,
            debt_to_income,
        })
    }
}

/// Aggregate lending-book parameters sent alongside each applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHealth {
    /// Capital available for disbursement, in dollars.
    #[serde(rename = "capital_disponible")]
    pub capital: f64,
    /// Current default rate as a fraction (0-0.20).
    #[serde(rename = "tasa_mora_actual")]
    pub default_rate: f64,
    /// Monthly disbursement target, in dollars.
    #[serde(rename = "objetivo_mensual_desembolso")]
    pub monthly_target: f64,
}

impl PortfolioHealth {
    /// Creates a validated portfolio record. The default rate is a fraction.
    pub fn new(capital: f64, default_rate: f64, monthly_target: f64) -> Result<Self, ValidationError> {
        if capital < 0.0 {
            return Err(ValidationError::Negative {
                field: "capital",
                value: capital,
            });
        }
        if !(0.0..=MAX_DEFAULT_RATE).contains(&default_rate) {
            return Err(ValidationError::OutOfRange {
                field: "default rate",
                min: 0.0,
                max: MAX_DEFAULT_RATE,
                value: default_rate,
            });
        }
        if monthly_target < 0.0 {
            return Err(ValidationError::Negative {
                field: "monthly target",
                value: monthly_target,
            });
        }

        Ok(Self {
            capital,
            default_rate,
            monthly_target,
        })
    }

    /// Risk band for the current default rate.
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_default_rate(self.default_rate)
    }
}

/// Decision label returned by the agent, classified for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
    Other(String),
}

impl From<&str> for Decision {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "APROBADO" => Decision::Approved,
            "RECHAZADO" => Decision::Rejected,
            _ => Decision::Other(s.trim().to_string()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approved => write!(f, "APROBADO"),
            Decision::Rejected => write!(f, "RECHAZADO"),
            Decision::Other(s) => write!(f, "{}", s),
        }
    }
}

impl Decision {
    /// Returns an emoji badge for the decision.
    pub fn emoji(&self) -> &'static str {
        match self {
            Decision::Approved => "🟢",
            Decision::Rejected => "🔴",
            Decision::Other(_) => "🟡",
        }
    }
}

/// Portfolio risk band, derived from the default rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    /// Default rate below 3%.
    Low,
    /// Default rate between 3% and 7%.
    Elevated,
    /// Default rate at or above 7%.
    Critical,
}

impl RiskBand {
    /// Classifies a default rate (fraction) into a band.
    pub fn from_default_rate(rate: f64) -> Self {
        if rate < 0.03 {
            RiskBand::Low
        } else if rate < 0.07 {
            RiskBand::Elevated
        } else {
            RiskBand::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Elevated => "Elevated",
            RiskBand::Critical => "Critical",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskBand::Low => "🟢",
            RiskBand::Elevated => "🟡",
            RiskBand::Critical => "🔴",
        }
    }
}

/// The decision object inside an agent response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentVerdict {
    /// Decision label (e.g. "APROBADO").
    pub decision: String,
    /// Final score, shape owned by the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_final: Option<Value>,
    /// Justification text for the decision.
    #[serde(rename = "justificacion")]
    pub justification: String,
    /// Optional recommendations for the applicant.
    #[serde(rename = "recomendaciones", default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
}

/// A complete agent runtime response for one applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// ML model score.
    pub score_ml: f64,
    /// Decision object.
    #[serde(rename = "decision")]
    pub verdict: AgentVerdict,
}

impl Evaluation {
    /// Classifies the decision label.
    pub fn decision(&self) -> Decision {
        Decision::from(self.verdict.decision.as_str())
    }

    /// Final score rendered for display; "N/A" when absent.
    pub fn final_score_text(&self) -> String {
        match &self.verdict.score_final {
            Some(Value::String(s)) => s.clone(),
            Some(v) => v.to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// One evaluated applicant in a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRecord {
    /// 1-based position in the cohort.
    pub id: usize,
    /// Synthesized applicant age.
    pub age: f64,
    /// Synthesized annual income.
    pub income: f64,
    /// ML score returned by the agent.
    pub score_ml: f64,
    /// Decision label returned by the agent.
    pub decision: String,
}

/// Aggregate statistics for a simulation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Applicants successfully evaluated.
    pub evaluated: usize,
    /// Applicants with an approved decision.
    pub approved: usize,
    /// Approval rate as a percentage of evaluated applicants.
    pub approval_rate: f64,
    /// Mean ML score across evaluated applicants.
    pub mean_score: f64,
    /// Applicants whose evaluation failed.
    pub failures: usize,
}

impl SimulationSummary {
    /// Builds a summary from simulation records.
    pub fn from_records(records: &[SimulationRecord], failures: usize) -> Self {
        let evaluated = records.len();
        let approved = records
            .iter()
            .filter(|r| Decision::from(r.decision.as_str()) == Decision::Approved)
            .count();

        let approval_rate = if evaluated > 0 {
            approved as f64 / evaluated as f64 * 100.0
        } else {
            0.0
        };
        let mean_score = if evaluated > 0 {
            records.iter().map(|r| r.score_ml).sum::<f64>() / evaluated as f64
        } else {
            0.0
        };

        Self {
            evaluated,
            approved,
            approval_rate,
            mean_score,
            failures,
        }
    }
}

/// One bin of the score histogram, with per-decision counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower bound.
    pub lo: f64,
    /// Exclusive upper bound (inclusive for the last bin).
    pub hi: f64,
    pub approved: usize,
    pub rejected: usize,
    pub other: usize,
}

impl HistogramBin {
    pub fn total(&self) -> usize {
        self.approved + self.rejected + self.other
    }
}

/// Metadata attached to every file report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Agent runtime endpoint used.
    pub agent_url: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Wall-clock duration of the run in seconds.
    pub duration_seconds: f64,
}

/// A single-applicant evaluation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metadata: ReportMetadata,
    pub applicant: Applicant,
    pub portfolio: PortfolioHealth,
    pub evaluation: Evaluation,
}

/// A simulation run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub metadata: ReportMetadata,
    pub portfolio: PortfolioHealth,
    /// RNG seed that produced the cohort.
    pub seed: u64,
    pub summary: SimulationSummary,
    pub histogram: Vec<HistogramBin>,
    pub records: Vec<SimulationRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicant_validation() {
        assert!(Applicant::new(35.0, 50000.0, 3.0, 0.3).is_ok());
        assert!(Applicant::new(17.0, 50000.0, 3.0, 0.3).is_err());
        assert!(Applicant::new(81.0, 50000.0, 3.0, 0.3).is_err());
        assert!(Applicant::new(35.0, -1.0, 3.0, 0.3).is_err());
        assert!(Applicant::new(35.0, 50000.0, -0.5, 0.3).is_err());
        assert!(Applicant::new(35.0, 50000.0, 3.0, 1.1).is_err());
    }

    #[test]
    fn test_applicant_boundary_ages() {
        assert!(Applicant::new(18.0, 0.0, 0.0, 0.0).is_ok());
        assert!(Applicant::new(80.0, 0.0, 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_portfolio_validation() {
        assert!(PortfolioHealth::new(1_000_000.0, 0.035, 500_000.0).is_ok());
        assert!(PortfolioHealth::new(-1.0, 0.035, 500_000.0).is_err());
        assert!(PortfolioHealth::new(1_000_000.0, 0.25, 500_000.0).is_err());
        assert!(PortfolioHealth::new(1_000_000.0, 0.035, -1.0).is_err());
    }

    #[test]
    fn test_applicant_wire_names() {
        let applicant = Applicant::new(35.0, 50000.0, 3.0, 0.3).unwrap();
        let json = serde_json::to_value(&applicant).unwrap();

        assert_eq!(json["edad"], 35.0);
        assert_eq!(json["ingresos"], 50000.0);
        assert_eq!(json["estabilidad_laboral"], 3.0);
        assert_eq!(json["ratio_deuda_ingreso"], 0.3);
    }

    #[test]
    fn test_portfolio_wire_names() {
        let portfolio = PortfolioHealth::new(1_000_000.0, 0.035, 500_000.0).unwrap();
        let json = serde_json::to_value(&portfolio).unwrap();

        assert_eq!(json["capital_disponible"], 1_000_000.0);
        assert_eq!(json["tasa_mora_actual"], 0.035);
        assert_eq!(json["objetivo_mensual_desembolso"], 500_000.0);
    }

    #[test]
    fn test_decision_from_label() {
        assert_eq!(Decision::from("APROBADO"), Decision::Approved);
        assert_eq!(Decision::from("aprobado"), Decision::Approved);
        assert_eq!(Decision::from("RECHAZADO"), Decision::Rejected);
        assert_eq!(
            Decision::from("REVISION MANUAL"),
            Decision::Other("REVISION MANUAL".to_string())
        );
    }

    #[test]
    fn test_decision_emoji() {
        assert_eq!(Decision::Approved.emoji(), "🟢");
        assert_eq!(Decision::Rejected.emoji(), "🔴");
        assert_eq!(Decision::Other("X".to_string()).emoji(), "🟡");
    }

    #[test]
    fn test_risk_band_boundaries() {
        assert_eq!(RiskBand::from_default_rate(0.0), RiskBand::Low);
        assert_eq!(RiskBand::from_default_rate(0.029), RiskBand::Low);
        assert_eq!(RiskBand::from_default_rate(0.03), RiskBand::Elevated);
        assert_eq!(RiskBand::from_default_rate(0.069), RiskBand::Elevated);
        assert_eq!(RiskBand::from_default_rate(0.07), RiskBand::Critical);
        assert_eq!(RiskBand::from_default_rate(0.20), RiskBand::Critical);
    }

    #[test]
    fn test_evaluation_decode() {
        let json = r#"{
            "score_ml": 0.82,
            "decision": {
                "decision": "APROBADO",
                "score_final": 0.79,
                "justificacion": "Solid income and low debt ratio.",
                "recomendaciones": "Offer the standard rate."
            }
        }"#;

        let evaluation: Evaluation = serde_json::from_str(json).unwrap();
        assert_eq!(evaluation.score_ml, 0.82);
        assert_eq!(evaluation.decision(), Decision::Approved);
        assert_eq!(evaluation.final_score_text(), "0.79");
        assert_eq!(
            evaluation.verdict.recommendations.as_deref(),
            Some("Offer the standard rate.")
        );
    }

    #[test]
    fn test_evaluation_decode_minimal() {
        let json = r#"{
            "score_ml": 0.41,
            "decision": {
                "decision": "RECHAZADO",
                "justificacion": "Debt ratio too high."
            }
        }"#;

        let evaluation: Evaluation = serde_json::from_str(json).unwrap();
        assert_eq!(evaluation.decision(), Decision::Rejected);
        assert_eq!(evaluation.final_score_text(), "N/A");
        assert!(evaluation.verdict.recommendations.is_none());
    }

    #[test]
    fn test_evaluation_decode_missing_keys() {
        let json = r#"{"decision": {"decision": "APROBADO", "justificacion": "ok"}}"#;
        assert!(serde_json::from_str::<Evaluation>(json).is_err());
    }

    #[test]
    fn test_simulation_summary() {
        let records = vec![
            SimulationRecord {
                id: 1,
                age: 30.0,
                income: 40000.0,
                score_ml: 0.8,
                decision: "APROBADO".to_string(),
            },
            SimulationRecord {
                id: 2,
                age: 45.0,
                income: 30000.0,
                score_ml: 0.4,
                decision: "RECHAZADO".to_string(),
            },
            SimulationRecord {
                id: 3,
                age: 52.0,
                income: 60000.0,
                score_ml: 0.6,
                decision: "APROBADO".to_string(),
            },
        ];

        let summary = SimulationSummary::from_records(&records, 1);
        assert_eq!(summary.evaluated, 3);
        assert_eq!(summary.approved, 2);
        assert_eq!(summary.failures, 1);
        assert!((summary.approval_rate - 66.666).abs() < 0.01);
        assert!((summary.mean_score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_simulation_summary_empty() {
        let summary = SimulationSummary::from_records(&[], 5);
        assert_eq!(summary.evaluated, 0);
        assert_eq!(summary.approval_rate, 0.0);
        assert_eq!(summary.mean_score, 0.0);
        assert_eq!(summary.failures, 5);
    }
}
