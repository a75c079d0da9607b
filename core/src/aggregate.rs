//! Representative aggregation — owners to derived workload rows.
//!
//! This module:
//!   1. Groups accounts by owner, preserving first-appearance order
//!   2. Sums ARR, whitespace, at-risk ARR, and required hours per rep
//!   3. Scores capacity (required hours over productive hours, as %)
//!   4. Classifies capacity status against the fixed thresholds
//!   5. Rolls team-wide summary metrics and benchmark comparisons
//!
//! `derive_representatives` is pure: callers invoke it explicitly after
//! any account-list change. Nothing here caches or mutates in place.

use crate::{
    config::EngineConfig,
    scoring,
    types::{safe_ratio, Account, RepName, Segment},
};
use serde::{Deserialize, Serialize};

/// Three-way capacity classification. Critical means overloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityStatus {
    Critical,
    Warning,
    Healthy,
}

impl CapacityStatus {
    pub fn classify(capacity_score: f64, config: &EngineConfig) -> Self {
        if capacity_score > config.capacity.critical_threshold {
            Self::Critical
        } else if capacity_score > config.capacity.warning_threshold {
            Self::Warning
        } else {
            Self::Healthy
        }
    }
}

/// Percentage deltas against the rep's segment benchmark midpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BenchmarkDelta {
    pub arr_diff_pct:      f64,
    pub accounts_diff_pct: f64,
}

/// One representative with every aggregate derived from the owned
/// accounts. Rebuilt wholesale on every data change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Representative {
    pub name:                       RepName,
    pub account_count:              usize,
    pub total_arr:                  f64,
    pub total_raw_whitespace:       f64,
    pub total_actionable_whitespace: f64,
    pub at_risk_arr:                f64,
    /// Rounded mean health of owned accounts; 100 for an empty book.
    pub avg_health:                 f64,
    pub required_hours:             f64,
    /// round(required_hours / productive_hours × 100). No ceiling —
    /// values above 100 signal overload.
    pub capacity_score:             f64,
    pub capacity_status:            CapacityStatus,
    pub territories:                Vec<String>,
    pub segments:                   Vec<Segment>,
    /// Modal segment of the owned accounts; Mid-Market when empty.
    pub primary_segment:            Segment,
    pub benchmark_delta:            BenchmarkDelta,
    pub accounts:                   Vec<Account>,
}

/// Group accounts by owner and derive every aggregate. `roster` names
/// representatives that exist without owning any accounts (scenario
/// hires); they are appended after the owners, in roster order.
pub fn derive_representatives(
    accounts: &[Account],
    roster: &[RepName],
    config: &EngineConfig,
) -> Vec<Representative> {
    let mut order: Vec<RepName> = Vec::new();
    let mut grouped: std::collections::HashMap<RepName, Vec<Account>> =
        std::collections::HashMap::new();

    for account in accounts {
        if !grouped.contains_key(&account.owner) {
            order.push(account.owner.clone());
        }
        grouped
            .entry(account.owner.clone())
            .or_default()
            .push(account.clone());
    }

    for name in roster {
        if !grouped.contains_key(name) {
            order.push(name.clone());
            grouped.insert(name.clone(), Vec::new());
        }
    }

    order
        .into_iter()
        .map(|name| {
            let owned = grouped.remove(&name).unwrap_or_default();
            build_rep(name, owned, config)
        })
        .collect()
}

fn build_rep(name: RepName, owned: Vec<Account>, config: &EngineConfig) -> Representative {
    let account_count = owned.len();
    let total_arr: f64 = owned.iter().map(|a| a.current_arr).sum();
    let total_raw_whitespace: f64 = owned.iter().map(|a| a.raw_whitespace).sum();
    let total_actionable_whitespace: f64 =
        owned.iter().map(|a| a.actionable_whitespace).sum();
    let at_risk_arr: f64 = owned
        .iter()
        .filter(|a| a.is_at_risk)
        .map(|a| a.current_arr)
        .sum();
    let avg_health = if account_count == 0 {
        100.0
    } else {
        (owned.iter().map(|a| a.health_score).sum::<f64>() / account_count as f64).round()
    };

    let required_hours: f64 = owned.iter().map(|a| scoring::account_hours(a, config)).sum();
    let capacity_score =
        (safe_ratio(required_hours, config.capacity.productive_hours()) * 100.0).round();
    let capacity_status = CapacityStatus::classify(capacity_score, config);

    let territories = dedup_preserving_order(owned.iter().map(|a| a.territory.clone()));
    let segments = dedup_preserving_order(owned.iter().map(|a| a.segment));
    let primary_segment = modal_segment(&owned);

    let benchmark = config.benchmarks.for_segment(primary_segment);
    let benchmark_delta = BenchmarkDelta {
        arr_diff_pct: (safe_ratio(total_arr, benchmark.arr_per_rep.midpoint()) - 1.0) * 100.0,
        accounts_diff_pct: (safe_ratio(
            account_count as f64,
            benchmark.accounts_per_rep.midpoint(),
        ) - 1.0)
            * 100.0,
    };

    Representative {
        name,
        account_count,
        total_arr,
        total_raw_whitespace,
        total_actionable_whitespace,
        at_risk_arr,
        avg_health,
        required_hours,
        capacity_score,
        capacity_status,
        territories,
        segments,
        primary_segment,
        benchmark_delta,
        accounts: owned,
    }
}

fn dedup_preserving_order<T: PartialEq>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// The segment owning the most accounts; ties go to the earlier segment
/// in account order. Mid-Market for an empty book.
fn modal_segment(owned: &[Account]) -> Segment {
    let mut counts: Vec<(Segment, usize)> = Vec::new();
    for account in owned {
        match counts.iter_mut().find(|(s, _)| *s == account.segment) {
            Some((_, n)) => *n += 1,
            None => counts.push((account.segment, 1)),
        }
    }
    let mut best: Option<(Segment, usize)> = None;
    for (segment, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((segment, count)),
        }
    }
    best.map(|(s, _)| s).unwrap_or(Segment::MidMarket)
}

// ── Team summary ─────────────────────────────────────────────────────────────

/// Team-wide totals and averages. Every ratio is zero-guarded so an
/// empty team reports zeros, not NaN.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryMetrics {
    pub team_size:                  usize,
    pub total_accounts:             usize,
    pub total_arr:                  f64,
    pub total_actionable_whitespace: f64,
    pub total_at_risk_arr:          f64,
    pub at_risk_pct:                f64,
    pub total_required_hours:       f64,
    pub avg_capacity:               f64,
    pub avg_health:                 f64,
    pub avg_arr_per_rep:            f64,
    pub avg_accounts_per_rep:       f64,
}

pub fn summarize(reps: &[Representative]) -> SummaryMetrics {
    let team_size = reps.len();
    let total_accounts: usize = reps.iter().map(|r| r.account_count).sum();
    let total_arr: f64 = reps.iter().map(|r| r.total_arr).sum();
    let total_actionable_whitespace: f64 =
        reps.iter().map(|r| r.total_actionable_whitespace).sum();
    let total_at_risk_arr: f64 = reps.iter().map(|r| r.at_risk_arr).sum();
    let total_required_hours: f64 = reps.iter().map(|r| r.required_hours).sum();

    let n = team_size as f64;
    SummaryMetrics {
        team_size,
        total_accounts,
        total_arr,
        total_actionable_whitespace,
        total_at_risk_arr,
        at_risk_pct: safe_ratio(total_at_risk_arr, total_arr) * 100.0,
        total_required_hours,
        avg_capacity: safe_ratio(reps.iter().map(|r| r.capacity_score).sum::<f64>(), n)
            .round(),
        avg_health: safe_ratio(reps.iter().map(|r| r.avg_health).sum::<f64>(), n).round(),
        avg_arr_per_rep: safe_ratio(total_arr, n),
        avg_accounts_per_rep: safe_ratio(total_accounts as f64, n),
    }
}

// ── Benchmark comparison ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkStatus {
    Over,
    Under,
    Good,
}

/// One comparison line: the team's value against a benchmark range or
/// target, with a 0–100 fill percentage for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkLine {
    pub your_value:      f64,
    pub benchmark_range: String,
    pub status:          BenchmarkStatus,
    pub fill_pct:        f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub accounts: BenchmarkLine,
    pub arr:      BenchmarkLine,
    pub capacity: BenchmarkLine,
    pub risk:     BenchmarkLine,
}

/// Compare team averages against one segment's reference ranges.
pub fn benchmark_comparison(
    summary: &SummaryMetrics,
    segment: Segment,
    config: &EngineConfig,
) -> BenchmarkComparison {
    let benchmark = config.benchmarks.for_segment(segment);
    let accounts_band = &benchmark.accounts_per_rep;
    let arr_band = &benchmark.arr_per_rep;

    let avg_accounts = summary.avg_accounts_per_rep;
    let avg_arr = summary.avg_arr_per_rep;

    BenchmarkComparison {
        accounts: BenchmarkLine {
            your_value: avg_accounts.round(),
            benchmark_range: format!("{:.0}-{:.0}", accounts_band.min, accounts_band.max),
            status: range_status(avg_accounts, accounts_band.min, accounts_band.max),
            fill_pct: (safe_ratio(avg_accounts, accounts_band.max) * 100.0).min(100.0),
        },
        arr: BenchmarkLine {
            your_value: avg_arr,
            benchmark_range: format!(
                "${:.0}-{:.0}M",
                arr_band.min / 1_000_000.0,
                arr_band.max / 1_000_000.0
            ),
            status: range_status(avg_arr, arr_band.min, arr_band.max),
            fill_pct: (safe_ratio(avg_arr, arr_band.max) * 100.0).min(100.0),
        },
        capacity: BenchmarkLine {
            your_value: summary.avg_capacity,
            benchmark_range: format!("<{:.0}%", benchmark.healthy_capacity),
            status: if summary.avg_capacity > benchmark.healthy_capacity {
                BenchmarkStatus::Over
            } else {
                BenchmarkStatus::Good
            },
            fill_pct: summary.avg_capacity.min(100.0),
        },
        risk: BenchmarkLine {
            your_value: summary.at_risk_pct.round(),
            benchmark_range: format!("<{:.0}%", benchmark.at_risk_arr_ceiling),
            status: if summary.at_risk_pct > benchmark.at_risk_arr_ceiling {
                BenchmarkStatus::Over
            } else {
                BenchmarkStatus::Good
            },
            fill_pct: (summary.at_risk_pct / 25.0 * 100.0).min(100.0),
        },
    }
}

fn range_status(value: f64, min: f64, max: f64) -> BenchmarkStatus {
    if value > max {
        BenchmarkStatus::Over
    } else if value < min {
        BenchmarkStatus::Under
    } else {
        BenchmarkStatus::Good
    }
}
