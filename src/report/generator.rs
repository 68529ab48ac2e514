//! Markdown and JSON report generation.
//!
//! Reports mirror what the terminal views show, in a form that can be
//! archived or attached to a review.

use crate::models::{
    Decision, EvaluationReport, HistogramBin, ReportMetadata, SimulationRecord, SimulationReport,
};
use crate::render::format_money;
use anyhow::Result;

/// Generate a complete Markdown evaluation report.
pub fn generate_evaluation_markdown(
    report: &EvaluationReport,
    include_recommendations: bool,
) -> String {
    let mut output = String::new();

    output.push_str("# Crediscope Evaluation Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_inputs_section(report));
    output.push_str(&generate_outcome_section(report, include_recommendations));
    output.push_str(&generate_footer());

    output
}

/// Generate a complete Markdown simulation report.
pub fn generate_simulation_markdown(report: &SimulationReport) -> String {
    let mut output = String::new();

    output.push_str("# Crediscope Simulation Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));

    output.push_str(&format!("- **Seed:** {}\n", report.seed));
    output.push_str(&format!(
        "- **Portfolio:** {} capital, {:.1}% default rate, {} monthly target\n\n",
        format_money(report.portfolio.capital),
        report.portfolio.default_rate * 100.0,
        format_money(report.portfolio.monthly_target)
    ));

    output.push_str(&generate_summary_section(report));
    output.push_str(&generate_histogram_section(&report.histogram));
    output.push_str(&generate_records_section(&report.records));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Agent Runtime:** {}\n", metadata.agent_url));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));

    section
}

/// Generate the applicant and portfolio input tables.
fn generate_inputs_section(report: &EvaluationReport) -> String {
    let mut section = String::new();

    section.push_str("\n## Inputs\n\n");

    section.push_str("| Applicant | Value |\n");
    section.push_str("|:---|---:|\n");
    section.push_str(&format!("| Age | {:.1} |\n", report.applicant.age));
    section.push_str(&format!(
        "| Annual Income | {} |\n",
        format_money(report.applicant.income)
    ));
    section.push_str(&format!(
        "| Job Stability (years) | {:.1} |\n",
        report.applicant.job_stability_years
    ));
    section.push_str(&format!(
        "| Debt-to-Income Ratio | {:.2} |\n\n",
        report.applicant.debt_to_income
    ));

    section.push_str("| Portfolio | Value |\n");
    section.push_str("|:---|---:|\n");
    section.push_str(&format!(
        "| Capital Available | {} |\n",
        format_money(report.portfolio.capital)
    ));
    section.push_str(&format!(
        "| Default Rate | {:.1}% |\n",
        report.portfolio.default_rate * 100.0
    ));
    section.push_str(&format!(
        "| Monthly Target | {} |\n\n",
        format_money(report.portfolio.monthly_target)
    ));

    section
}

/// Generate the outcome section.
fn generate_outcome_section(report: &EvaluationReport, include_recommendations: bool) -> String {
    let mut section = String::new();
    let decision = report.evaluation.decision();

    section.push_str("## Outcome\n\n");
    section.push_str(&format!("- **Score ML:** {:.3}\n", report.evaluation.score_ml));
    section.push_str(&format!("- **Decision:** {} {}\n", decision.emoji(), decision));
    section.push_str(&format!(
        "- **Final Score:** {}\n\n",
        report.evaluation.final_score_text()
    ));

    section.push_str("### Justification\n\n");
    section.push_str(&report.evaluation.verdict.justification);
    section.push_str("\n\n");

    if include_recommendations {
        if let Some(ref recommendations) = report.evaluation.verdict.recommendations {
            section.push_str("### Recommendations\n\n");
            section.push_str(recommendations);
            section.push_str("\n\n");
        }
    }

    section
}

/// Generate the simulation summary table.
fn generate_summary_section(report: &SimulationReport) -> String {
    let mut section = String::new();
    let summary = &report.summary;

    section.push_str("## Summary\n\n");
    section.push_str("| Evaluated | Approved | Approval Rate | Average Score | Failures |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {:.1}% | {:.3} | {} |\n\n",
        summary.evaluated, summary.approved, summary.approval_rate, summary.mean_score, summary.failures
    ));

    section
}

/// Generate the histogram table.
fn generate_histogram_section(histogram: &[HistogramBin]) -> String {
    if histogram.iter().all(|b| b.total() == 0) {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Score Distribution\n\n");
    section.push_str("| Bin | 🟢 Approved | 🔴 Rejected | 🟡 Other | Total |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---:|\n");

    for bin in histogram {
        section.push_str(&format!(
            "| {:.2}-{:.2} | {} | {} | {} | {} |\n",
            bin.lo,
            bin.hi,
            bin.approved,
            bin.rejected,
            bin.other,
            bin.total()
        ));
    }
    section.push('\n');

    section
}

/// Generate the per-record table.
fn generate_records_section(records: &[SimulationRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Records\n\n");
    section.push_str("| ID | Age | Income | Score | Decision |\n");
    section.push_str("|---:|---:|---:|---:|:---|\n");

    for record in records {
        let decision = Decision::from(record.decision.as_str());
        section.push_str(&format!(
            "| {} | {:.1} | {} | {:.3} | {} {} |\n",
            record.id,
            record.age,
            format_money(record.income),
            record.score_ml,
            decision.emoji(),
            record.decision
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by Crediscope*\n".to_string()
}

/// Generate a JSON evaluation report.
pub fn generate_evaluation_json(report: &EvaluationReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate a JSON simulation report.
pub fn generate_simulation_json(report: &SimulationReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AgentVerdict, Applicant, Evaluation, PortfolioHealth, SimulationSummary,
    };
    use chrono::Utc;

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            agent_url: "http://localhost:8080/invocations".to_string(),
            generated_at: Utc::now(),
            duration_seconds: 1.5,
        }
    }

    fn evaluation_report() -> EvaluationReport {
        EvaluationReport {
            metadata: metadata(),
            applicant: Applicant::new(35.0, 50_000.0, 3.0, 0.3).unwrap(),
            portfolio: PortfolioHealth::new(1_000_000.0, 0.035, 500_000.0).unwrap(),
            evaluation: Evaluation {
                score_ml: 0.823,
                verdict: AgentVerdict {
                    decision: "APROBADO".to_string(),
                    score_final: Some(serde_json::json!(0.79)),
                    justification: "Solid income and low debt ratio.".to_string(),
                    recommendations: Some("Offer the standard rate.".to_string()),
                },
            },
        }
    }

    fn simulation_report() -> SimulationReport {
        let records = vec![
            SimulationRecord {
                id: 1,
                age: 34.2,
                income: 28_450.0,
                score_ml: 0.71,
                decision: "APROBADO".to_string(),
            },
            SimulationRecord {
                id: 2,
                age: 51.0,
                income: 19_800.0,
                score_ml: 0.33,
                decision: "RECHAZADO".to_string(),
            },
        ];
        let summary = SimulationSummary::from_records(&records, 0);
        let histogram = crate::analysis::score_histogram(&records, 10);

        SimulationReport {
            metadata: metadata(),
            portfolio: PortfolioHealth::new(1_000_000.0, 0.035, 500_000.0).unwrap(),
            seed: 42,
            summary,
            histogram,
            records,
        }
    }

    #[test]
    fn test_generate_evaluation_markdown() {
        let markdown = generate_evaluation_markdown(&evaluation_report(), true);

        assert!(markdown.contains("# Crediscope Evaluation Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Inputs"));
        assert!(markdown.contains("## Outcome"));
        assert!(markdown.contains("APROBADO"));
        assert!(markdown.contains("Solid income and low debt ratio."));
        assert!(markdown.contains("### Recommendations"));
    }

    #[test]
    fn test_evaluation_markdown_without_recommendations() {
        let markdown = generate_evaluation_markdown(&evaluation_report(), false);
        assert!(!markdown.contains("### Recommendations"));
    }

    #[test]
    fn test_generate_simulation_markdown() {
        let markdown = generate_simulation_markdown(&simulation_report());

        assert!(markdown.contains("# Crediscope Simulation Report"));
        assert!(markdown.contains("**Seed:** 42"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("## Score Distribution"));
        assert!(markdown.contains("## Records"));
        assert!(markdown.contains("RECHAZADO"));
    }

    #[test]
    fn test_generate_evaluation_json() {
        let json = generate_evaluation_json(&evaluation_report()).unwrap();

        assert!(json.contains("\"agent_url\""));
        assert!(json.contains("\"score_ml\""));
        assert!(json.contains("\"justificacion\""));
    }

    #[test]
    fn test_generate_simulation_json() {
        let json = generate_simulation_json(&simulation_report()).unwrap();

        assert!(json.contains("\"seed\""));
        assert!(json.contains("\"records\""));
        assert!(json.contains("\"histogram\""));
    }
}
