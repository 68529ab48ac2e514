//! Terminal rendering for evaluation, portfolio, and simulation views.

use crate::models::{
    Applicant, Decision, Evaluation, HistogramBin, PortfolioHealth, SimulationRecord,
    SimulationSummary, MAX_DEFAULT_RATE,
};

/// Width of the delinquency gauge in characters.
const GAUGE_WIDTH: usize = 40;

/// Maximum width of a histogram bar in characters.
const BAR_WIDTH: usize = 30;

/// Format a dollar amount with thousands separators, no cents.
pub fn format_money(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Horizontal gauge over the 0-20% delinquency range.
fn gauge(default_rate: f64) -> String {
    let fraction = (default_rate / MAX_DEFAULT_RATE).clamp(0.0, 1.0);
    let filled = (fraction * GAUGE_WIDTH as f64).round() as usize;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled))
}

/// Scaled histogram bar; the widest bin spans `BAR_WIDTH` characters.
fn bar(count: usize, max: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH + max - 1) / max;
    "█".repeat(width)
}

/// Print the result of a single evaluation.
pub fn print_evaluation(evaluation: &Evaluation) {
    let decision = evaluation.decision();

    println!("\n📊 Evaluation Result:");
    println!("   Score ML:    {:.3}", evaluation.score_ml);
    println!("   Decision:    {} {}", decision.emoji(), decision);
    println!("   Final Score: {}", evaluation.final_score_text());

    println!("\n   Justification:");
    println!("   {}", evaluation.verdict.justification);

    if let Some(ref recommendations) = evaluation.verdict.recommendations {
        println!("\n   💡 Recommendations: {}", recommendations);
    }
    println!();
}

/// Print portfolio health metrics and the delinquency gauge.
pub fn print_portfolio(portfolio: &PortfolioHealth) {
    let band = portfolio.risk_band();
    let rate_pct = portfolio.default_rate * 100.0;

    println!("\n🏦 Portfolio Health:");
    println!("   Capital Available: {}", format_money(portfolio.capital));
    println!("   Default Rate:      {:.1}%", rate_pct);
    println!("   Monthly Target:    {}", format_money(portfolio.monthly_target));

    println!("\n   Delinquency Risk (0-20%):");
    println!(
        "   {} {:.1}% {} {}",
        gauge(portfolio.default_rate),
        rate_pct,
        band.emoji(),
        band.label()
    );
    println!("   bands: <3% low | 3-7% elevated | >7% critical");
    println!();
}

/// Print simulation summary metrics, the score histogram, and the records table.
pub fn print_simulation(
    records: &[SimulationRecord],
    summary: &SimulationSummary,
    histogram: &[HistogramBin],
    decision_counts: &[(String, usize)],
) {
    println!("\n📊 Simulation Summary:");
    println!("   Evaluated:     {}", summary.evaluated);
    println!(
        "   Approved:      {} ({:.1}%)",
        summary.approved, summary.approval_rate
    );
    println!("   Average Score: {:.3}", summary.mean_score);
    if summary.failures > 0 {
        println!("   Failures:      {}", summary.failures);
    }

    if !decision_counts.is_empty() {
        let breakdown: Vec<String> = decision_counts
            .iter()
            .map(|(label, count)| {
                format!("{} {} {}", Decision::from(label.as_str()).emoji(), label, count)
            })
            .collect();
        println!("\n   Decisions: {}", breakdown.join(" | "));
    }

    print_histogram(histogram);
    print_records_table(records);
}

/// Print the score histogram, one line per bin.
fn print_histogram(histogram: &[HistogramBin]) {
    if histogram.iter().all(|b| b.total() == 0) {
        return;
    }

    let max = histogram.iter().map(HistogramBin::total).max().unwrap_or(0);

    println!("\n   Score Distribution:");
    for bin in histogram {
        let mut line = format!(
            "   {:.2}-{:.2} | {:<width$} {}",
            bin.lo,
            bin.hi,
            bar(bin.total(), max),
            bin.total(),
            width = BAR_WIDTH
        );

        if bin.total() > 0 {
            let mut parts = Vec::new();
            if bin.approved > 0 {
                parts.push(format!("🟢 {}", bin.approved));
            }
            if bin.rejected > 0 {
                parts.push(format!("🔴 {}", bin.rejected));
            }
            if bin.other > 0 {
                parts.push(format!("🟡 {}", bin.other));
            }
            line.push_str(&format!("  ({})", parts.join(" ")));
        }

        println!("{}", line);
    }
}

/// Print the per-record table.
fn print_records_table(records: &[SimulationRecord]) {
    if records.is_empty() {
        return;
    }

    println!("\n   {:>3}  {:>5}  {:>12}  {:>6}  Decision", "ID", "Age", "Income", "Score");
    println!("   {}", "-".repeat(50));

    for record in records {
        let decision = Decision::from(record.decision.as_str());
        println!(
            "   {:>3}  {:>5.1}  {:>12}  {:>6.3}  {} {}",
            record.id,
            record.age,
            format_money(record.income),
            record.score_ml,
            decision.emoji(),
            record.decision
        );
    }
    println!();
}

/// Print a synthesized cohort without evaluation results (dry run).
pub fn print_cohort(applicants: &[Applicant]) {
    println!(
        "\n   {:>3}  {:>5}  {:>12}  {:>9}  {:>10}",
        "ID", "Age", "Income", "Job Yrs", "Debt Ratio"
    );
    println!("   {}", "-".repeat(50));

    for (i, applicant) in applicants.iter().enumerate() {
        println!(
            "   {:>3}  {:>5.1}  {:>12}  {:>9.1}  {:>10.2}",
            i + 1,
            applicant.age,
            format_money(applicant.income),
            applicant.job_stability_years,
            applicant.debt_to_income
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(950.0), "$950");
        assert_eq!(format_money(1_000.0), "$1,000");
        assert_eq!(format_money(1_000_000.0), "$1,000,000");
        assert_eq!(format_money(28_450.4), "$28,450");
        assert_eq!(format_money(-5_000.0), "-$5,000");
    }

    #[test]
    fn test_gauge_bounds() {
        let empty = gauge(0.0);
        assert!(!empty.contains('█'));
        assert_eq!(empty.chars().filter(|&c| c == '░').count(), GAUGE_WIDTH);

        let full = gauge(0.20);
        assert!(!full.contains('░'));
        assert_eq!(full.chars().filter(|&c| c == '█').count(), GAUGE_WIDTH);

        // Over-range rates clamp to a full gauge.
        assert_eq!(gauge(0.5), gauge(0.20));
    }

    #[test]
    fn test_gauge_midpoint() {
        let half = gauge(0.10);
        assert_eq!(half.chars().filter(|&c| c == '█').count(), GAUGE_WIDTH / 2);
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().count(), BAR_WIDTH / 2);
        // A non-empty bin always gets at least one segment.
        assert_eq!(bar(1, 1000).chars().count(), 1);
    }

    #[test]
    fn test_bar_empty_histogram() {
        assert_eq!(bar(0, 0), "");
    }
}
