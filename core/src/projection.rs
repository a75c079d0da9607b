//! Capacity-runway projections — growth scenarios and hiring timeline.
//!
//! Projects team ARR 90 days out under a chosen growth rate, nets out
//! expected churn from the at-risk book, and converts the result into a
//! required headcount at the target capacity threshold. All divisions
//! are zero-guarded.

use crate::{
    aggregate::SummaryMetrics,
    config::EngineConfig,
    types::safe_ratio,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthScenario {
    Conservative,
    Expected,
    Aggressive,
}

impl GrowthScenario {
    pub fn rate(&self, config: &EngineConfig) -> f64 {
        match self {
            Self::Conservative => config.growth.conservative,
            Self::Expected     => config.growth.expected,
            Self::Aggressive   => config.growth.aggressive,
        }
    }

    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "conservative" => Some(Self::Conservative),
            "expected"     => Some(Self::Expected),
            "aggressive"   => Some(Self::Aggressive),
            _              => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPosture {
    pub team_size:    usize,
    pub total_arr:    f64,
    pub avg_capacity: f64,
    /// ARR the team could absorb before hitting the capacity threshold.
    pub headroom:     f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedPosture {
    pub total_arr:          f64,
    pub projected_capacity: f64,
    pub required_headcount: f64,
    pub hiring_need:        u32,
    pub expected_churn:     f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub day:    String,
    pub action: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub scenario:  GrowthScenario,
    pub current:   CurrentPosture,
    pub projected: ProjectedPosture,
    pub timeline:  Vec<TimelineEntry>,
}

pub fn project(
    summary: &SummaryMetrics,
    scenario: GrowthScenario,
    config: &EngineConfig,
) -> Projection {
    let growth_rate = scenario.rate(config);
    let threshold = config.projection.capacity_threshold;
    let team = summary.team_size as f64;

    let projected_arr = summary.total_arr * (1.0 + growth_rate);
    let expected_churn = summary.total_at_risk_arr * config.projection.at_risk_churn_rate;
    let net_projected_arr = projected_arr - expected_churn;

    let current_arr_per_rep = safe_ratio(summary.total_arr, team);
    let target_arr_per_rep =
        current_arr_per_rep * safe_ratio(threshold, summary.avg_capacity);
    let required_headcount = safe_ratio(net_projected_arr, target_arr_per_rep);
    let projected_capacity =
        (safe_ratio(net_projected_arr, team * target_arr_per_rep) * 100.0).round();

    let hiring_need = (required_headcount - team).ceil().max(0.0) as u32;
    let headroom = (team * target_arr_per_rep - summary.total_arr).max(0.0);

    log::debug!(
        "projection: scenario={scenario:?} net_arr={net_projected_arr:.0} \
         headcount={required_headcount:.1} hires={hiring_need}"
    );

    Projection {
        scenario,
        current: CurrentPosture {
            team_size:    summary.team_size,
            total_arr:    summary.total_arr,
            avg_capacity: summary.avg_capacity,
            headroom,
        },
        projected: ProjectedPosture {
            total_arr: net_projected_arr,
            projected_capacity,
            required_headcount,
            hiring_need,
            expected_churn,
        },
        timeline: hiring_timeline(summary, growth_rate, hiring_need, config),
    }
}

/// Day-indexed hiring plan: recruiting starts 45 days before the
/// capacity threshold is projected to be hit, then one hire per 30 days.
fn hiring_timeline(
    summary: &SummaryMetrics,
    growth_rate: f64,
    hiring_need: u32,
    config: &EngineConfig,
) -> Vec<TimelineEntry> {
    let threshold = config.projection.capacity_threshold;
    let mut timeline = Vec::new();

    if hiring_need == 0 {
        timeline.push(TimelineEntry {
            day:    "Current".to_string(),
            action: "No immediate hiring needed".to_string(),
            reason: format!(
                "Team capacity at {:.0}%, below {threshold:.0}% threshold",
                summary.avg_capacity
            ),
        });
        return timeline;
    }

    let daily_capacity_growth =
        growth_rate / config.projection.horizon_days * summary.avg_capacity;
    let days_to_threshold =
        safe_ratio(threshold - summary.avg_capacity, daily_capacity_growth).round() as i64;

    timeline.push(TimelineEntry {
        day: format!(
            "Day {}",
            (days_to_threshold - config.projection.recruiting_lead_days).max(0)
        ),
        action: "Start recruiting".to_string(),
        reason: format!(
            "Allow {} days for hiring process",
            config.projection.recruiting_lead_days
        ),
    });

    for i in 0..hiring_need {
        let start_day = days_to_threshold + i as i64 * config.projection.hire_interval_days;
        timeline.push(TimelineEntry {
            day:    format!("Day {start_day}"),
            action: format!("Hire CSM #{}", summary.team_size + i as usize + 1),
            reason: if i == 0 {
                "Capacity threshold reached".to_string()
            } else {
                "Continued growth".to_string()
            },
        });
    }

    timeline
}
