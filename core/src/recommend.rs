//! Rebalancing recommendations — greedy moves plus independent rule
//! checks.
//!
//! This module:
//!   1. Finds overloaded reps (capacity > 100) and plans account moves
//!      into the most-underloaded eligible target (capacity < 70)
//!   2. Runs independent threshold checks: ARR imbalance, whitespace
//!      concentration, risk concentration, hiring trigger
//!   3. Emits each finding as a natural-language action string
//!   4. Sorts the result high → medium → low, stably
//!
//! The move planner is a greedy single pass: smallest moveable accounts
//! first, ties broken by input order, no global optimum claimed.

use crate::{
    aggregate::{Representative, SummaryMetrics},
    config::EngineConfig,
    projection::{self, GrowthScenario},
    types::{safe_ratio, AccountName, RepName, Segment},
};
use serde::{Deserialize, Serialize};

/// Sorted ascending: High before Medium before Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Rebalance,
    ArrImbalance,
    WhitespaceConcentration,
    RiskConcentration,
    Hiring,
}

/// One account the rebalancer proposes to move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMove {
    pub account: AccountName,
    pub from:    RepName,
    pub to:      RepName,
    pub arr:     f64,
    pub hours:   f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind:     RecommendationKind,
    pub priority: Priority,
    pub title:    String,
    pub action:   String,
    /// Populated only for Rebalance recommendations.
    pub moves:    Vec<PlannedMove>,
}

/// Build the full prioritized recommendation list for the current team.
pub fn recommendations(
    reps: &[Representative],
    summary: &SummaryMetrics,
    config: &EngineConfig,
) -> Vec<Recommendation> {
    let mut out = rebalance_recommendations(reps, config);

    if let Some(rec) = arr_imbalance(reps) {
        out.push(rec);
    }
    if let Some(rec) = whitespace_concentration(reps, summary) {
        out.push(rec);
    }
    if let Some(rec) = risk_concentration(reps) {
        out.push(rec);
    }
    if let Some(rec) = hiring_trigger(summary, config) {
        out.push(rec);
    }

    // Stable: generation order is preserved within a priority band.
    out.sort_by_key(|r| r.priority);

    log::info!("recommend: {} recommendations generated", out.len());
    out
}

// ── Greedy rebalancer ────────────────────────────────────────────────────────

fn rebalance_recommendations(
    reps: &[Representative],
    config: &EngineConfig,
) -> Vec<Recommendation> {
    let productive = config.capacity.productive_hours();
    let mut out = Vec::new();

    let overloaded: Vec<&Representative> = reps
        .iter()
        .filter(|r| r.capacity_score > config.capacity.critical_threshold)
        .collect();

    for source in overloaded {
        let excess_hours = source.required_hours - productive;

        // Moveable book: keep at-risk and large accounts in place.
        let mut candidates: Vec<&crate::types::Account> = source
            .accounts
            .iter()
            .filter(|a| !a.is_at_risk && a.current_arr < config.capacity.moveable_arr_ceiling)
            .collect();
        candidates.sort_by(|a, b| {
            a.current_arr
                .partial_cmp(&b.current_arr)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let Some(target) = pick_target(reps, source, config) else {
            log::debug!(
                "recommend: {} overloaded but no underloaded target available",
                source.name
            );
            continue;
        };

        let mut moves = Vec::new();
        let mut moved_hours = 0.0;
        for account in candidates {
            if moved_hours >= excess_hours {
                break;
            }
            let hours = crate::scoring::account_hours(account, config);
            moves.push(PlannedMove {
                account: account.name.clone(),
                from:    source.name.clone(),
                to:      target.name.clone(),
                arr:     account.current_arr,
                hours,
            });
            moved_hours += hours;
        }

        if moves.is_empty() {
            continue;
        }

        let moved_arr: f64 = moves.iter().map(|m| m.arr).sum();
        out.push(Recommendation {
            kind:     RecommendationKind::Rebalance,
            priority: Priority::High,
            title:    format!("Rebalance {} → {}", source.name, target.name),
            action:   format!(
                "Move {} account(s) ({}) from {} (capacity {:.0}%) to {} \
                 (capacity {:.0}%) to shed ~{:.0} hours/month.",
                moves.len(),
                format_currency(moved_arr),
                source.name,
                source.capacity_score,
                target.name,
                target.capacity_score,
                moved_hours,
            ),
            moves,
        });
    }

    out
}

/// Most-underloaded representative eligible to absorb the batch. A
/// segment match with the source is preferred; a Mid-Market book is
/// accepted as a universal target.
fn pick_target<'a>(
    reps: &'a [Representative],
    source: &Representative,
    config: &EngineConfig,
) -> Option<&'a Representative> {
    let underloaded = reps.iter().filter(|r| {
        r.name != source.name && r.capacity_score < config.capacity.underloaded_threshold
    });

    let mut best: Option<&Representative> = None;
    for rep in underloaded {
        let eligible = rep.primary_segment == source.primary_segment
            || rep.primary_segment == Segment::MidMarket;
        if !eligible {
            continue;
        }
        match best {
            Some(current) if rep.capacity_score >= current.capacity_score => {}
            _ => best = Some(rep),
        }
    }
    best
}

// ── Independent rule checks ──────────────────────────────────────────────────

fn arr_imbalance(reps: &[Representative]) -> Option<Recommendation> {
    if reps.len() < 2 {
        return None;
    }
    let max = reps.iter().max_by(|a, b| cmp_f64(a.total_arr, b.total_arr))?;
    let min = reps.iter().min_by(|a, b| cmp_f64(a.total_arr, b.total_arr))?;

    let ratio = safe_ratio(max.total_arr, min.total_arr);
    if ratio <= 2.0 {
        return None;
    }
    Some(Recommendation {
        kind:     RecommendationKind::ArrImbalance,
        priority: Priority::Medium,
        title:    "ARR imbalance".to_string(),
        action:   format!(
            "{} manages {ratio:.1}x more ARR ({}) than {} ({}). Shift mid-size \
             accounts to narrow the gap.",
            max.name,
            format_currency(max.total_arr),
            min.name,
            format_currency(min.total_arr),
        ),
        moves: Vec::new(),
    })
}

fn whitespace_concentration(
    reps: &[Representative],
    summary: &SummaryMetrics,
) -> Option<Recommendation> {
    let top = reps.iter().max_by(|a, b| {
        cmp_f64(a.total_actionable_whitespace, b.total_actionable_whitespace)
    })?;
    let share = safe_ratio(
        top.total_actionable_whitespace,
        summary.total_actionable_whitespace,
    ) * 100.0;
    if share <= 40.0 {
        return None;
    }
    Some(Recommendation {
        kind:     RecommendationKind::WhitespaceConcentration,
        priority: Priority::Low,
        title:    "Whitespace concentration".to_string(),
        action:   format!(
            "{share:.0}% of the team's actionable whitespace ({}) sits with {}. \
             Spread expansion accounts so pipeline is not single-threaded.",
            format_currency(top.total_actionable_whitespace),
            top.name,
        ),
        moves: Vec::new(),
    })
}

fn risk_concentration(reps: &[Representative]) -> Option<Recommendation> {
    let exposed: Vec<&Representative> = reps
        .iter()
        .filter(|r| safe_ratio(r.at_risk_arr, r.total_arr) > 0.20)
        .collect();
    if exposed.is_empty() {
        return None;
    }
    let names: Vec<&str> = exposed.iter().map(|r| r.name.as_str()).collect();
    Some(Recommendation {
        kind:     RecommendationKind::RiskConcentration,
        priority: Priority::High,
        title:    "Risk concentration".to_string(),
        action:   format!(
            "{} team member(s) carry >20% at-risk ARR: {}. Pair them with \
             renewal support before the risk converts to churn.",
            exposed.len(),
            names.join(", "),
        ),
        moves: Vec::new(),
    })
}

fn hiring_trigger(summary: &SummaryMetrics, config: &EngineConfig) -> Option<Recommendation> {
    let projection = projection::project(summary, GrowthScenario::Expected, config);
    let hires = projection.projected.hiring_need;
    if hires == 0 {
        return None;
    }
    Some(Recommendation {
        kind:     RecommendationKind::Hiring,
        priority: Priority::High,
        title:    "Hiring trigger".to_string(),
        action:   format!(
            "Projected capacity hits {:.0}% under expected growth. Hire {hires} \
             additional team member(s); start recruiting now to cover the \
             {}-day lead time.",
            projection.projected.projected_capacity,
            config.projection.recruiting_lead_days,
        ),
        moves: Vec::new(),
    })
}

fn cmp_f64(a: f64, b: f64) -> std::cmp::Ordering {
    a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
}

/// Compact currency for action strings: $1.2M / $450K / $900.
pub fn format_currency(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.0}K", value / 1_000.0)
    } else {
        format!("${value:.0}")
    }
}
