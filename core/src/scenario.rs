//! Scenario comparison — before/after deltas between snapshots.
//!
//! Every simulated operation returns one of these so callers can show
//! impact without diffing state themselves. A zero original value
//! reports a 0% change, never a division blowup.

use crate::{aggregate::SummaryMetrics, types::safe_ratio};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

/// One summary metric before and after a simulated change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricImpact {
    pub original:   f64,
    pub scenario:   f64,
    pub diff:       f64,
    pub pct_change: f64,
    pub direction:  Direction,
}

fn impact(original: f64, scenario: f64) -> MetricImpact {
    let diff = scenario - original;
    MetricImpact {
        original,
        scenario,
        diff,
        pct_change: safe_ratio(diff, original) * 100.0,
        direction: if diff > 0.0 {
            Direction::Positive
        } else if diff < 0.0 {
            Direction::Negative
        } else {
            Direction::Neutral
        },
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub team_size:                  MetricImpact,
    pub total_arr:                  MetricImpact,
    pub avg_capacity:               MetricImpact,
    pub total_actionable_whitespace: MetricImpact,
    pub total_at_risk_arr:          MetricImpact,
    pub avg_health:                 MetricImpact,
}

pub fn compare(original: &SummaryMetrics, scenario: &SummaryMetrics) -> ScenarioComparison {
    ScenarioComparison {
        team_size: impact(original.team_size as f64, scenario.team_size as f64),
        total_arr: impact(original.total_arr, scenario.total_arr),
        avg_capacity: impact(original.avg_capacity, scenario.avg_capacity),
        total_actionable_whitespace: impact(
            original.total_actionable_whitespace,
            scenario.total_actionable_whitespace,
        ),
        total_at_risk_arr: impact(original.total_at_risk_arr, scenario.total_at_risk_arr),
        avg_health: impact(original.avg_health, scenario.avg_health),
    }
}
