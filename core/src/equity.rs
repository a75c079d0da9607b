//! Equity scoring — team-wide fairness across four dimensions.
//!
//! This module:
//!   1. Scores ARR, whitespace, capacity, and at-risk ARR distribution
//!   2. Drives the headline score from the coefficient of variation
//!   3. Reports the Gini coefficient as a supplementary signal
//!   4. Generates display-oriented insight strings
//!
//! The `100 − CV` formula is a fixed business rule, not a tunable.
//! With fewer than two representatives every dimension is trivially
//! fair: score 100, gap 0, ratio 1.

use crate::{
    aggregate::{Representative, SummaryMetrics},
    recommend::format_currency,
    types::safe_ratio,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquityDimension {
    Arr,
    Whitespace,
    Capacity,
    Risk,
}

impl EquityDimension {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Arr        => "ARR",
            Self::Whitespace => "Whitespace",
            Self::Capacity   => "Capacity",
            Self::Risk       => "At-Risk ARR",
        }
    }
}

/// Fairness of one metric's distribution across the team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionEquity {
    pub dimension: EquityDimension,
    /// Headline score: clamp(100 − CV, 0, 100), rounded.
    pub score: f64,
    pub cv:    f64,
    pub gini:  f64,
    pub gap:   f64,
    /// max ÷ min; 0 when the minimum is 0 (guarded division).
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityReport {
    pub arr:        DimensionEquity,
    pub whitespace: DimensionEquity,
    pub capacity:   DimensionEquity,
    pub risk:       DimensionEquity,
}

impl EquityReport {
    pub fn dimensions(&self) -> [&DimensionEquity; 4] {
        [&self.arr, &self.whitespace, &self.capacity, &self.risk]
    }
}

pub fn equity_report(reps: &[Representative]) -> EquityReport {
    EquityReport {
        arr: dimension_equity(
            EquityDimension::Arr,
            &values(reps, |r| r.total_arr),
        ),
        whitespace: dimension_equity(
            EquityDimension::Whitespace,
            &values(reps, |r| r.total_actionable_whitespace),
        ),
        capacity: dimension_equity(
            EquityDimension::Capacity,
            &values(reps, |r| r.capacity_score),
        ),
        risk: dimension_equity(
            EquityDimension::Risk,
            &values(reps, |r| r.at_risk_arr),
        ),
    }
}

fn values(reps: &[Representative], metric: impl Fn(&Representative) -> f64) -> Vec<f64> {
    reps.iter().map(metric).collect()
}

fn dimension_equity(dimension: EquityDimension, values: &[f64]) -> DimensionEquity {
    if values.len() < 2 {
        return DimensionEquity {
            dimension,
            score: 100.0,
            cv:    0.0,
            gini:  0.0,
            gap:   0.0,
            ratio: 1.0,
        };
    }

    let cv = coefficient_of_variation(values);
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);

    DimensionEquity {
        dimension,
        score: (100.0 - cv).clamp(0.0, 100.0).round(),
        cv,
        gini: gini_coefficient(values),
        gap: max - min,
        ratio: safe_ratio(max, min),
    }
}

/// Standard deviation over mean, as a percentage. Zero mean yields 0.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean * 100.0
}

/// Gini coefficient over a non-negative value set. 0 is perfect
/// equality, 1 maximal inequality. Zero total yields 0.
pub fn gini_coefficient(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, v)| (2.0 * (i as f64 + 1.0) - n as f64 - 1.0) * v)
        .sum();

    weighted / (n as f64 * total)
}

// ── Insights ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Success,
    Info,
    Warning,
}

/// A display-oriented finding about the current distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityInsight {
    pub kind: InsightKind,
    pub text: String,
}

pub fn equity_insights(
    reps: &[Representative],
    summary: &SummaryMetrics,
) -> Vec<EquityInsight> {
    let mut insights = Vec::new();
    if reps.is_empty() {
        return insights;
    }

    let mut max_arr = &reps[0];
    let mut min_arr = &reps[0];
    for rep in reps {
        if rep.total_arr > max_arr.total_arr {
            max_arr = rep;
        }
        if rep.total_arr < min_arr.total_arr {
            min_arr = rep;
        }
    }

    let arr_ratio = safe_ratio(max_arr.total_arr, min_arr.total_arr);
    if arr_ratio > 2.0 {
        insights.push(EquityInsight {
            kind: InsightKind::Warning,
            text: format!(
                "{} manages {arr_ratio:.1}x more ARR than {}. Consider rebalancing.",
                max_arr.name, min_arr.name
            ),
        });
    }

    let mut max_ws = &reps[0];
    for rep in reps {
        if rep.total_actionable_whitespace > max_ws.total_actionable_whitespace {
            max_ws = rep;
        }
    }
    let ws_share =
        safe_ratio(max_ws.total_actionable_whitespace, summary.total_actionable_whitespace)
            * 100.0;
    if ws_share > 40.0 {
        insights.push(EquityInsight {
            kind: InsightKind::Info,
            text: format!(
                "{ws_share:.0}% of actionable whitespace ({}) is concentrated with {}.",
                format_currency(max_ws.total_actionable_whitespace),
                max_ws.name
            ),
        });
    }

    let overloaded: Vec<&Representative> =
        reps.iter().filter(|r| r.capacity_score > 100.0).collect();
    if !overloaded.is_empty() {
        let names: Vec<&str> = overloaded.iter().map(|r| r.name.as_str()).collect();
        insights.push(EquityInsight {
            kind: InsightKind::Warning,
            text: format!(
                "{} team member(s) are over capacity: {}.",
                overloaded.len(),
                names.join(", ")
            ),
        });
    }

    let high_risk: Vec<&Representative> = reps
        .iter()
        .filter(|r| safe_ratio(r.at_risk_arr, r.total_arr) > 0.2)
        .collect();
    if !high_risk.is_empty() {
        let names: Vec<&str> = high_risk.iter().map(|r| r.name.as_str()).collect();
        insights.push(EquityInsight {
            kind: InsightKind::Warning,
            text: format!(
                "{} team member(s) have >20% at-risk ARR: {}.",
                high_risk.len(),
                names.join(", ")
            ),
        });
    }

    let all_balanced = reps
        .iter()
        .all(|r| r.capacity_score >= 60.0 && r.capacity_score <= 85.0);
    if all_balanced {
        insights.push(EquityInsight {
            kind: InsightKind::Success,
            text: "All team members are within healthy capacity range.".to_string(),
        });
    }

    insights
}
