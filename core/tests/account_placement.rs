//! Placement tests: scoring pending accounts against the team and
//! materializing the recommended assignments.

use territory_core::{
    assignment::PendingAccount,
    config::EngineConfig,
    engine::TerritoryEngine,
    types::{Account, LifecycleStage, Segment},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Ben: quiet Mid-Market book in the West. Ava: overloaded Enterprise
/// book in the Northeast.
fn team_engine() -> TerritoryEngine {
    let mut accounts: Vec<Account> = (0..12)
        .map(|i| {
            Account::new(format!("Ava {i}"), "Ava", 120_000.0, 150_000.0, 85.0, 0.10)
                .with_segment(Segment::Enterprise)
                .with_territory("Northeast")
        })
        .collect();
    accounts.extend((0..3).map(|i| {
        Account::new(format!("Ben {i}"), "Ben", 50_000.0, 60_000.0, 90.0, 0.05)
            .with_territory("West")
    }));
    TerritoryEngine::from_accounts(accounts, EngineConfig::default())
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Territory and segment matches steer the account to the matching rep
/// with headroom, and the reasons say why.
#[test]
fn matching_rep_wins_the_placement() {
    let mut engine = team_engine();
    engine.add_pending(PendingAccount::new(
        "Newco",
        60_000.0,
        120_000.0,
        "West",
        Segment::MidMarket,
    ));

    let recommendations = engine.placement_recommendations();
    assert_eq!(recommendations.len(), 1);

    let rec = &recommendations[0];
    assert_eq!(rec.recommended_rep, "Ben");
    assert!(rec.reasons.iter().any(|r| r == "Territory match"));
    assert!(rec.reasons.iter().any(|r| r == "Segment expertise"));
    assert!(rec.reasons.iter().any(|r| r == "Has capacity headroom"));
    assert_eq!(rec.alternatives.len(), 1, "two reps leave one alternative");
    assert_eq!(rec.alternatives[0].rep, "Ava");
}

/// Applying placements materializes Onboarding accounts on the working
/// copy and clears the queue. The baseline is untouched.
#[test]
fn apply_placements_materializes_accounts() {
    let mut engine = team_engine();
    let baseline_accounts = engine.baseline_summary().total_accounts;
    engine.add_pending(PendingAccount::new(
        "Newco",
        60_000.0,
        120_000.0,
        "West",
        Segment::MidMarket,
    ));

    let comparison = engine.apply_placements();

    assert!(engine.pending().is_empty());
    assert_eq!(comparison.total_arr.diff, 60_000.0);

    let newco = engine
        .accounts()
        .iter()
        .find(|a| a.name == "Newco")
        .expect("placed account exists on the working copy");
    assert_eq!(newco.owner, "Ben");
    assert_eq!(newco.health_score, 80.0);
    assert_eq!(newco.churn_risk, 0.05);
    assert_eq!(newco.lifecycle_stage, LifecycleStage::Onboarding);
    assert!(!newco.is_at_risk, "new accounts start healthy");

    assert_eq!(engine.baseline_summary().total_accounts, baseline_accounts);
}

/// Pending accounts carry distinct generated ids and can be withdrawn.
#[test]
fn pending_queue_is_managed_by_id() {
    let mut engine = team_engine();
    engine.add_pending(PendingAccount::new("One", 10_000.0, 20_000.0, "West", Segment::Smb));
    engine.add_pending(PendingAccount::new("Two", 10_000.0, 20_000.0, "West", Segment::Smb));

    let ids: Vec<String> = engine.pending().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);

    engine.remove_pending(&ids[0]);
    assert_eq!(engine.pending().len(), 1);
    assert_eq!(engine.pending()[0].name, "Two");
}

/// With no team there is nothing to recommend.
#[test]
fn empty_team_recommends_nothing() {
    let mut engine = TerritoryEngine::from_accounts(Vec::new(), EngineConfig::default());
    engine.add_pending(PendingAccount::new("Newco", 10_000.0, 20_000.0, "West", Segment::Smb));

    assert!(engine.placement_recommendations().is_empty());
}
