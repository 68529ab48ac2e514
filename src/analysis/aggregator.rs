//! Aggregation and statistics over simulation records.

use crate::models::{Decision, HistogramBin, SimulationRecord};
use std::collections::HashMap;

/// Default number of histogram bins over the [0, 1] score range.
pub const DEFAULT_BINS: usize = 10;

/// Bin scores into a fixed-width histogram with per-decision counts.
///
/// Scores outside [0, 1] clamp into the edge bins.
pub fn score_histogram(records: &[SimulationRecord], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }

    let width = 1.0 / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lo: i as f64 * width,
            hi: (i + 1) as f64 * width,
            ..Default::default()
        })
        .collect();

    for record in records {
        let clamped = record.score_ml.clamp(0.0, 1.0);
        let idx = ((clamped / width) as usize).min(bins - 1);

        match Decision::from(record.decision.as_str()) {
            Decision::Approved => histogram[idx].approved += 1,
            Decision::Rejected => histogram[idx].rejected += 1,
            Decision::Other(_) => histogram[idx].other += 1,
        }
    }

    histogram
}

/// Count records per decision label, most frequent first.
pub fn decision_counts(records: &[SimulationRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for record in records {
        *counts.entry(record.decision.clone()).or_default() += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    counts
}
