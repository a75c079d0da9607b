//! Engine configuration — segment benchmarks, the capacity model, and
//! scoring weights.
//!
//! The defaults are fixed business constants: the 85/100 capacity
//! thresholds, the health-factor bands, and the complexity premiums.
//! An optional JSON override file exists for the runner; tests and
//! library callers use `EngineConfig::default()`.

use crate::types::Segment;
use serde::{Deserialize, Serialize};

/// Min / max / ideal reference band for a per-rep quantity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeBenchmark {
    pub min:   f64,
    pub max:   f64,
    pub ideal: f64,
}

impl RangeBenchmark {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Industry reference ranges for one segment. Read-only: used for
/// comparison display and the hours model, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentBenchmark {
    pub accounts_per_rep:     RangeBenchmark,
    pub arr_per_rep:          RangeBenchmark,
    /// Average-capacity ceiling considered healthy for this segment.
    pub healthy_capacity:     f64,
    /// At-risk ARR ceiling, as a percentage of total ARR.
    pub at_risk_arr_ceiling:  f64,
    pub avg_health_score:     f64,
    /// Base attention hours per account per month, before the
    /// complexity multiplier.
    pub base_hours_per_month: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentBenchmarks {
    pub smb:        SegmentBenchmark,
    pub mid_market: SegmentBenchmark,
    pub enterprise: SegmentBenchmark,
}

impl SegmentBenchmarks {
    pub fn for_segment(&self, segment: Segment) -> &SegmentBenchmark {
        match segment {
            Segment::Smb        => &self.smb,
            Segment::MidMarket  => &self.mid_market,
            Segment::Enterprise => &self.enterprise,
        }
    }
}

/// The time-based capacity model. Capacity score is required hours over
/// productive hours, as a percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityModel {
    pub monthly_hours:         f64,
    pub productivity_rate:     f64,
    /// Capacity above this is `warning`.
    pub warning_threshold:     f64,
    /// Capacity above this is `critical` and the rep is overloaded.
    pub critical_threshold:    f64,
    /// Capacity below this marks a rep as underloaded for rebalancing.
    pub underloaded_threshold: f64,
    /// Accounts at or above this ARR are never moved by the greedy
    /// rebalancer.
    pub moveable_arr_ceiling:  f64,
}

impl CapacityModel {
    /// Productive hours available per rep per period.
    pub fn productive_hours(&self) -> f64 {
        self.monthly_hours * self.productivity_rate
    }
}

/// Additive complexity premiums. Order of evaluation does not matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityWeights {
    pub high_value_arr:             f64,
    pub high_value_premium:         f64,
    pub low_health_threshold:       f64,
    pub low_health_premium:         f64,
    pub churn_risk_threshold:       f64,
    pub churn_risk_premium:         f64,
    pub onboarding_premium:         f64,
    pub whitespace_ratio_threshold: f64,
    pub whitespace_premium:         f64,
    pub enterprise_premium:         f64,
    pub mid_market_premium:         f64,
}

/// The at-risk classification rule: churn risk at or above the floor, or
/// health below the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtRiskRule {
    pub churn_risk_floor: f64,
    pub health_floor:     f64,
}

/// 90-day growth multipliers for what-if projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthRates {
    pub conservative: f64,
    pub expected:     f64,
    pub aggressive:   f64,
}

/// Constants of the capacity-runway projection and hiring timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionModel {
    pub horizon_days:         f64,
    /// Share of at-risk ARR assumed to churn over the horizon.
    pub at_risk_churn_rate:   f64,
    /// Average-capacity level at which hiring is triggered.
    pub capacity_threshold:   f64,
    pub recruiting_lead_days: i64,
    pub hire_interval_days:   i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub benchmarks: SegmentBenchmarks,
    pub capacity:   CapacityModel,
    pub complexity: ComplexityWeights,
    pub at_risk:    AtRiskRule,
    pub growth:     GrowthRates,
    pub projection: ProjectionModel,
}

impl EngineConfig {
    /// Load a full-config override from a JSON file. The runner accepts
    /// `--config`; everything else uses the defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            benchmarks: SegmentBenchmarks {
                smb: SegmentBenchmark {
                    accounts_per_rep: RangeBenchmark { min: 50.0, max: 75.0, ideal: 60.0 },
                    arr_per_rep: RangeBenchmark {
                        min:   1_000_000.0,
                        max:   2_000_000.0,
                        ideal: 1_500_000.0,
                    },
                    healthy_capacity:     85.0,
                    at_risk_arr_ceiling:  15.0,
                    avg_health_score:     70.0,
                    base_hours_per_month: 2.0,
                },
                mid_market: SegmentBenchmark {
                    accounts_per_rep: RangeBenchmark { min: 25.0, max: 40.0, ideal: 32.0 },
                    arr_per_rep: RangeBenchmark {
                        min:   2_000_000.0,
                        max:   4_000_000.0,
                        ideal: 3_000_000.0,
                    },
                    healthy_capacity:     80.0,
                    at_risk_arr_ceiling:  12.0,
                    avg_health_score:     75.0,
                    base_hours_per_month: 4.0,
                },
                enterprise: SegmentBenchmark {
                    accounts_per_rep: RangeBenchmark { min: 8.0, max: 15.0, ideal: 12.0 },
                    arr_per_rep: RangeBenchmark {
                        min:   5_000_000.0,
                        max:   10_000_000.0,
                        ideal: 7_000_000.0,
                    },
                    healthy_capacity:     75.0,
                    at_risk_arr_ceiling:  10.0,
                    avg_health_score:     80.0,
                    base_hours_per_month: 10.0,
                },
            },
            capacity: CapacityModel {
                monthly_hours:         160.0,
                productivity_rate:     0.80,
                warning_threshold:     85.0,
                critical_threshold:    100.0,
                underloaded_threshold: 70.0,
                moveable_arr_ceiling:  150_000.0,
            },
            complexity: ComplexityWeights {
                high_value_arr:             100_000.0,
                high_value_premium:         0.3,
                low_health_threshold:       60.0,
                low_health_premium:         0.5,
                churn_risk_threshold:       0.30,
                churn_risk_premium:         0.4,
                onboarding_premium:         0.3,
                whitespace_ratio_threshold: 0.50,
                whitespace_premium:         0.2,
                enterprise_premium:         0.3,
                mid_market_premium:         0.1,
            },
            at_risk: AtRiskRule {
                churn_risk_floor: 0.20,
                health_floor:     60.0,
            },
            growth: GrowthRates {
                conservative: 0.10,
                expected:     0.20,
                aggressive:   0.35,
            },
            projection: ProjectionModel {
                horizon_days:         90.0,
                at_risk_churn_rate:   0.35,
                capacity_threshold:   85.0,
                recruiting_lead_days: 45,
                hire_interval_days:   30,
            },
        }
    }
}
