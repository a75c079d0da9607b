//! Per-account derived computation — pure and deterministic.
//!
//! This module:
//!   1. Maps health score to a 0–1 multiplier (four linear segments)
//!   2. Accumulates additive complexity premiums per account
//!   3. Converts complexity into monthly attention hours
//!   4. Fills every derived field on an account in one pass
//!
//! The health-factor bands at 40/60/80 are an explicit business rule and
//! are reproduced exactly as four linear segments, not approximated by a
//! single curve.

use crate::{
    config::EngineConfig,
    types::{Account, LifecycleStage, Segment},
};

/// Piecewise-linear health multiplier. Monotonically non-decreasing and
/// continuous at the band edges: f(40) = 0.4, f(60) = 0.7, f(80) = 1.0.
pub fn health_factor(health_score: f64) -> f64 {
    if health_score >= 80.0 {
        1.0
    } else if health_score >= 60.0 {
        0.7 + (health_score - 60.0) * 0.015
    } else if health_score >= 40.0 {
        0.4 + (health_score - 40.0) * 0.015
    } else {
        0.2 + health_score * 0.005
    }
}

/// Additive complexity multiplier, starting at 1.0. All terms are
/// independent premiums, so evaluation order does not matter.
///
/// Reads `raw_whitespace`, so the whitespace fields must be derived
/// before this is called.
pub fn complexity_score(account: &Account, config: &EngineConfig) -> f64 {
    let w = &config.complexity;
    let mut score = 1.0;

    if account.current_arr > w.high_value_arr {
        score += w.high_value_premium;
    }
    if account.health_score < w.low_health_threshold {
        score += w.low_health_premium;
    }
    if account.churn_risk > w.churn_risk_threshold {
        score += w.churn_risk_premium;
    }
    if account.lifecycle_stage == LifecycleStage::Onboarding {
        score += w.onboarding_premium;
    }
    if account.internal_tam > 0.0
        && account.raw_whitespace / account.internal_tam > w.whitespace_ratio_threshold
    {
        score += w.whitespace_premium;
    }
    match account.segment {
        Segment::Enterprise => score += w.enterprise_premium,
        Segment::MidMarket  => score += w.mid_market_premium,
        Segment::Smb        => {}
    }

    score
}

/// Monthly attention hours for one account: the segment's base hours
/// scaled by the complexity multiplier.
pub fn account_hours(account: &Account, config: &EngineConfig) -> f64 {
    let benchmark = config.benchmarks.for_segment(account.segment);
    benchmark.base_hours_per_month * account.complexity_score
}

/// Fill every derived field from the base fields. Invariants after this
/// pass: `actionable_whitespace <= raw_whitespace`, both non-negative.
pub fn derive_account_fields(account: &mut Account, config: &EngineConfig) {
    account.raw_whitespace = (account.internal_tam - account.current_arr).max(0.0);
    account.health_factor = health_factor(account.health_score);
    account.retention_probability = 1.0 - account.churn_risk;
    account.actionable_whitespace =
        account.raw_whitespace * account.health_factor * account.retention_probability;
    account.is_at_risk = account.churn_risk >= config.at_risk.churn_risk_floor
        || account.health_score < config.at_risk.health_floor;
    account.complexity_score = complexity_score(account, config);
}
