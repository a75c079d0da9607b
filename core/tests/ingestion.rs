//! Ingestion tests: required columns, quote handling, defaults, and the
//! derived-field invariants every parsed account must satisfy.

use territory_core::{
    config::EngineConfig,
    error::EngineError,
    ingest::parse_portfolio,
    types::{LifecycleStage, Segment},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

const FULL_HEADER: &str =
    "account_name,owner,current_arr,internal_tam,health_score,churn_risk,territory,segment,products_owned,lifecycle_stage";

fn config() -> EngineConfig {
    EngineConfig::default()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// A missing required column fails with MalformedInput naming it.
#[test]
fn missing_owner_column_is_rejected() {
    let csv = "account_name,current_arr,internal_tam,health_score,churn_risk\n\
               Acme,100000,200000,80,0.1";

    let err = parse_portfolio(csv, &config()).unwrap_err();
    match err {
        EngineError::MalformedInput { reason } => {
            assert!(reason.contains("owner"), "reason should name the column: {reason}");
        }
        other => panic!("Expected MalformedInput, got {other:?}"),
    }
}

/// All required columns present but zero data rows is also malformed.
#[test]
fn header_without_rows_is_rejected() {
    let csv = "account_name,owner,current_arr,internal_tam,health_score,churn_risk";

    let err = parse_portfolio(csv, &config()).unwrap_err();
    assert!(matches!(err, EngineError::MalformedInput { .. }));
}

/// Empty input is rejected rather than panicking.
#[test]
fn empty_input_is_rejected() {
    let err = parse_portfolio("", &config()).unwrap_err();
    assert!(matches!(err, EngineError::MalformedInput { .. }));
}

/// Quoted fields containing the delimiter survive the split.
#[test]
fn quoted_comma_in_account_name_parses() {
    let csv = "account_name,owner,current_arr,internal_tam,health_score,churn_risk\n\
               \"Acme, Inc\",Alex Chen,100000,200000,80,0.1";

    let accounts = parse_portfolio(csv, &config()).unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Acme, Inc");
    assert_eq!(accounts[0].owner, "Alex Chen");
}

/// Optional columns fall back to the documented defaults.
#[test]
fn optional_columns_use_documented_defaults() {
    let csv = "account_name,owner,current_arr,internal_tam,health_score,churn_risk\n\
               Acme,Alex,100000,200000,80,0.1";

    let accounts = parse_portfolio(csv, &config()).unwrap();
    let account = &accounts[0];
    assert_eq!(account.territory, "Unassigned");
    assert_eq!(account.segment, Segment::MidMarket);
    assert_eq!(account.lifecycle_stage, LifecycleStage::Adopting);
    assert_eq!(account.products_owned, "");
}

/// An unparsable health score falls back to 50; other numerics to 0.
#[test]
fn unparsable_numerics_fall_back() {
    let csv = "account_name,owner,current_arr,internal_tam,health_score,churn_risk\n\
               Acme,Alex,not-a-number,200000,n/a,0.1";

    let accounts = parse_portfolio(csv, &config()).unwrap();
    assert_eq!(accounts[0].current_arr, 0.0);
    assert_eq!(accounts[0].health_score, 50.0);
}

/// Rows whose field count differs from the header are skipped, not fatal.
#[test]
fn mismatched_rows_are_skipped() {
    let csv = format!(
        "{FULL_HEADER}\n\
         Acme,Alex,100000,200000,80,0.1,West,Enterprise,Platform,Mature\n\
         Broken,Alex,100000\n\
         Globex,Alex,50000,90000,70,0.2,West,SMB,,Adopting"
    );

    let accounts = parse_portfolio(&csv, &config()).unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].name, "Globex");
    assert_eq!(accounts[1].segment, Segment::Smb);
}

/// If every row is skipped, the parse fails like an empty file.
#[test]
fn all_rows_skipped_is_rejected() {
    let csv = "account_name,owner,current_arr,internal_tam,health_score,churn_risk\n\
               Broken,Alex,100000";

    let err = parse_portfolio(csv, &config()).unwrap_err();
    assert!(matches!(err, EngineError::MalformedInput { .. }));
}

/// Whitespace invariants hold for every parsed account: both values
/// non-negative, actionable never exceeds raw.
#[test]
fn whitespace_invariants_hold() {
    let csv = "account_name,owner,current_arr,internal_tam,health_score,churn_risk\n\
               Underwater,Alex,300000,200000,80,0.1\n\
               Healthy,Alex,50000,400000,90,0.05\n\
               Risky,Alex,50000,400000,20,0.45";

    let accounts = parse_portfolio(csv, &config()).unwrap();
    for account in &accounts {
        assert!(account.raw_whitespace >= 0.0);
        assert!(account.actionable_whitespace >= 0.0);
        assert!(
            account.actionable_whitespace <= account.raw_whitespace,
            "actionable {} must not exceed raw {}",
            account.actionable_whitespace,
            account.raw_whitespace
        );
    }
    // TAM below current ARR floors at zero, it never goes negative.
    assert_eq!(accounts[0].raw_whitespace, 0.0);
}

/// The at-risk rule: churn risk >= 0.20 or health < 60.
#[test]
fn at_risk_classification_boundaries() {
    let csv = "account_name,owner,current_arr,internal_tam,health_score,churn_risk\n\
               ChurnEdge,Alex,10000,20000,80,0.20\n\
               HealthEdge,Alex,10000,20000,59,0.05\n\
               Safe,Alex,10000,20000,60,0.19";

    let accounts = parse_portfolio(csv, &config()).unwrap();
    assert!(accounts[0].is_at_risk, "churn 0.20 is at risk");
    assert!(accounts[1].is_at_risk, "health 59 is at risk");
    assert!(!accounts[2].is_at_risk, "churn 0.19 / health 60 is safe");
}
