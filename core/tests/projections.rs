//! Projection tests: growth scenarios, expected churn, hiring need, and
//! the day-indexed timeline.

use territory_core::{
    config::EngineConfig,
    engine::TerritoryEngine,
    projection::GrowthScenario,
    types::{Account, Segment},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn config() -> EngineConfig {
    EngineConfig::default()
}

/// A comfortable team: two reps around 28% capacity each.
fn relaxed_engine() -> TerritoryEngine {
    let mut accounts = Vec::new();
    for i in 0..8 {
        accounts.push(Account::new(format!("A {i}"), "Alex", 50_000.0, 80_000.0, 90.0, 0.05));
    }
    for i in 0..8 {
        accounts.push(Account::new(format!("B {i}"), "Blair", 50_000.0, 80_000.0, 90.0, 0.05));
    }
    TerritoryEngine::from_accounts(accounts, config())
}

/// A single rep buried at 150% capacity.
fn overloaded_engine() -> TerritoryEngine {
    let accounts: Vec<Account> = (0..12)
        .map(|i| {
            Account::new(format!("Big {i}"), "Ava", 120_000.0, 150_000.0, 85.0, 0.10)
                .with_segment(Segment::Enterprise)
        })
        .collect();
    TerritoryEngine::from_accounts(accounts, config())
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The three scenario rates are the configured constants.
#[test]
fn growth_rates_match_config() {
    let config = config();
    assert_eq!(GrowthScenario::Conservative.rate(&config), 0.10);
    assert_eq!(GrowthScenario::Expected.rate(&config), 0.20);
    assert_eq!(GrowthScenario::Aggressive.rate(&config), 0.35);
}

/// Expected churn is exactly 35% of the at-risk book.
#[test]
fn expected_churn_is_thirty_five_pct_of_at_risk() {
    let mut accounts = vec![
        Account::new("Risky", "Alex", 100_000.0, 150_000.0, 50.0, 0.30),
    ];
    accounts.push(Account::new("Safe", "Alex", 100_000.0, 150_000.0, 90.0, 0.05));
    let engine = TerritoryEngine::from_accounts(accounts, config());

    let projection = engine.projection(GrowthScenario::Expected);
    assert!((projection.projected.expected_churn - 35_000.0).abs() < 1e-9);
}

/// A comfortable team needs no hires and says so in the timeline.
#[test]
fn relaxed_team_has_no_hiring_need() {
    let engine = relaxed_engine();

    let projection = engine.projection(GrowthScenario::Expected);
    assert_eq!(projection.projected.hiring_need, 0);
    assert_eq!(projection.timeline.len(), 1);
    assert_eq!(projection.timeline[0].day, "Current");
    assert_eq!(projection.timeline[0].action, "No immediate hiring needed");
    assert!(projection.current.headroom >= 0.0);
}

/// An overloaded team projects a positive hiring need, with a
/// recruiting entry followed by one entry per hire.
#[test]
fn overloaded_team_triggers_hiring() {
    let engine = overloaded_engine();

    let projection = engine.projection(GrowthScenario::Expected);
    let hires = projection.projected.hiring_need;
    assert!(hires > 0, "150% capacity must project new heads");
    assert_eq!(projection.timeline.len(), hires as usize + 1);
    assert_eq!(projection.timeline[0].action, "Start recruiting");
    assert!(projection.timeline[1].action.starts_with("Hire CSM #"));
}

/// Aggressive growth never projects less ARR than conservative growth.
#[test]
fn growth_scenarios_are_ordered() {
    let engine = relaxed_engine();

    let conservative = engine.projection(GrowthScenario::Conservative);
    let aggressive = engine.projection(GrowthScenario::Aggressive);
    assert!(aggressive.projected.total_arr > conservative.projected.total_arr);
}

/// An empty portfolio degrades to zeros instead of NaN.
#[test]
fn empty_team_projection_is_guarded() {
    let engine = TerritoryEngine::from_accounts(Vec::new(), config());

    let projection = engine.projection(GrowthScenario::Expected);
    assert_eq!(projection.projected.hiring_need, 0);
    assert!(projection.projected.total_arr == 0.0);
    assert!(projection.projected.required_headcount.is_finite());
}
