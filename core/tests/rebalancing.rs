//! Rebalancing tests: the greedy move planner, its eligibility filters,
//! and the fixed priority ordering of the recommendation list.

use territory_core::{
    config::EngineConfig,
    engine::TerritoryEngine,
    recommend::{Priority, RecommendationKind},
    types::{Account, Segment},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// An overloaded Enterprise book: 12 accounts at complexity 1.6
/// (ARR premium + segment premium) → 16 h each → 192 h → 150% capacity.
fn overloaded_rep(owner: &str) -> Vec<Account> {
    (0..12)
        .map(|i| {
            Account::new(format!("{owner} {i}"), owner, 120_000.0, 150_000.0, 85.0, 0.10)
                .with_segment(Segment::Enterprise)
        })
        .collect()
}

/// A quiet Mid-Market book well under 70% capacity.
fn underloaded_mm_rep(owner: &str, count: usize) -> Vec<Account> {
    (0..count)
        .map(|i| Account::new(format!("{owner} {i}"), owner, 50_000.0, 60_000.0, 90.0, 0.05))
        .collect()
}

fn engine_with(accounts: Vec<Account>) -> TerritoryEngine {
    TerritoryEngine::from_accounts(accounts, EngineConfig::default())
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Moves drain the overload: 64 excess hours at 16 h per account means
/// exactly four accounts head to the most-underloaded eligible rep.
#[test]
fn greedy_planner_absorbs_excess_hours() {
    let mut accounts = overloaded_rep("Ava");
    accounts.extend(underloaded_mm_rep("Ben", 2)); // 8.8 h → 7%
    accounts.extend(
        (0..1).map(|i| {
            Account::new(format!("Cam {i}"), "Cam", 80_000.0, 100_000.0, 90.0, 0.05)
                .with_segment(Segment::Enterprise)
        }), // 13 h → 10%
    );
    let engine = engine_with(accounts);

    let rebalances: Vec<_> = engine
        .recommendations()
        .into_iter()
        .filter(|r| r.kind == RecommendationKind::Rebalance)
        .collect();
    assert_eq!(rebalances.len(), 1);

    let rec = &rebalances[0];
    assert_eq!(rec.priority, Priority::High);
    assert_eq!(rec.moves.len(), 4, "64 excess hours / 16 h per account");
    for planned in &rec.moves {
        assert_eq!(planned.from, "Ava");
        // Ben (7%) is more underloaded than Cam (10%), and Mid-Market
        // is a universal target.
        assert_eq!(planned.to, "Ben");
    }
    let moved_hours: f64 = rec.moves.iter().map(|m| m.hours).sum();
    assert!(moved_hours >= 192.0 - 128.0, "moved hours must cover the excess");
}

/// At-risk accounts are never moved; with nothing moveable no
/// rebalance fires, but the risk concentration check still does.
#[test]
fn at_risk_accounts_stay_in_place() {
    let mut accounts: Vec<Account> = (0..10)
        .map(|i| {
            // churn 0.50 → at risk and +0.4 complexity → 2.0 → 20 h each.
            Account::new(format!("Ava {i}"), "Ava", 120_000.0, 150_000.0, 85.0, 0.50)
                .with_segment(Segment::Enterprise)
        })
        .collect();
    accounts.extend(underloaded_mm_rep("Ben", 2));
    let engine = engine_with(accounts);

    let recs = engine.recommendations();
    assert!(
        !recs.iter().any(|r| r.kind == RecommendationKind::Rebalance),
        "an all-at-risk book has nothing moveable"
    );
    assert!(
        recs.iter().any(|r| r.kind == RecommendationKind::RiskConcentration),
        "the risk concentration check is independent"
    );
}

/// Accounts at or above the moveable-ARR ceiling are kept in place.
#[test]
fn large_accounts_are_not_moved() {
    let mut accounts: Vec<Account> = (0..8)
        .map(|i| {
            // 300k ARR is above the 150k ceiling. Complexity 1.6 → 16 h.
            Account::new(format!("Ava {i}"), "Ava", 300_000.0, 400_000.0, 85.0, 0.10)
                .with_segment(Segment::Enterprise)
        })
        .collect();
    // Two small moveable accounts alongside the whales.
    accounts.push(
        Account::new("Ava small 1", "Ava", 40_000.0, 50_000.0, 85.0, 0.10)
            .with_segment(Segment::Enterprise),
    );
    accounts.push(
        Account::new("Ava small 2", "Ava", 30_000.0, 40_000.0, 85.0, 0.10)
            .with_segment(Segment::Enterprise),
    );
    accounts.extend(underloaded_mm_rep("Ben", 2));
    let engine = engine_with(accounts);

    let rebalances: Vec<_> = engine
        .recommendations()
        .into_iter()
        .filter(|r| r.kind == RecommendationKind::Rebalance)
        .collect();
    assert_eq!(rebalances.len(), 1);

    let moves = &rebalances[0].moves;
    assert_eq!(moves.len(), 2, "only the two small accounts are moveable");
    // Ascending by ARR: the 30k account moves first.
    assert_eq!(moves[0].account, "Ava small 2");
    assert_eq!(moves[1].account, "Ava small 1");
}

/// No underloaded eligible target means no move recommendation at all.
#[test]
fn overload_without_target_produces_no_move() {
    // One overloaded rep, one healthy-but-not-underloaded peer (81%).
    let mut accounts = overloaded_rep("Ava");
    accounts.extend((0..8).map(|i| {
        Account::new(format!("Ben {i}"), "Ben", 80_000.0, 100_000.0, 90.0, 0.05)
            .with_segment(Segment::Enterprise)
    }));
    let engine = engine_with(accounts);

    assert!(
        !engine
            .recommendations()
            .iter()
            .any(|r| r.kind == RecommendationKind::Rebalance),
        "no rep sits under 70% capacity, so there is nowhere to move"
    );
}

/// The final list is ordered high → medium → low, stably.
#[test]
fn recommendations_sort_by_priority() {
    let mut accounts = overloaded_rep("Ava");
    accounts.extend(underloaded_mm_rep("Ben", 2));
    accounts.push(
        Account::new("Cam 0", "Cam", 80_000.0, 100_000.0, 90.0, 0.05)
            .with_segment(Segment::Enterprise),
    );
    let engine = engine_with(accounts);

    let recs = engine.recommendations();
    assert!(!recs.is_empty());
    for pair in recs.windows(2) {
        assert!(
            pair[0].priority <= pair[1].priority,
            "priorities must be non-decreasing: {:?} then {:?}",
            pair[0].priority,
            pair[1].priority
        );
    }
    // The fixture produces at least one of each band.
    assert!(recs.iter().any(|r| r.priority == Priority::High));
    assert!(recs.iter().any(|r| r.priority == Priority::Medium));
    assert!(recs.iter().any(|r| r.priority == Priority::Low));
}
