//! Deterministic demo portfolio generation using curated name lists.
//!
//! Builds a plausible book of business for the runner and tests: reps
//! cycle through the three segments, each owning accounts with
//! segment-appropriate ARR bands, a TAM above current ARR, and a spread
//! of health and churn risk. Same seed = same portfolio.

use crate::{
    rng::DemoRng,
    types::{Account, LifecycleStage, Segment},
};

const REP_FIRST_NAMES: &[&str] = &[
    "Alex", "Sam", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Quinn",
    "Avery", "Dana", "Jamie", "Cameron", "Drew", "Reese", "Skyler", "Harper",
];

const REP_LAST_NAMES: &[&str] = &[
    "Chen", "Martinez", "Lee", "Wong", "Davis", "Okafor", "Patel", "Nguyen",
    "Garcia", "Kim", "Johnson", "Silva", "Haddad", "Novak", "Ibrahim", "Ross",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Apex", "Vertex", "Summit", "Pinnacle", "Nexus", "Quantum", "Stellar",
    "Velocity", "Horizon", "Cascade", "Meridian", "Atlas", "Beacon", "Crestline",
    "Northwind", "Bluepeak", "Ironwood", "Silverline", "Brightpath", "Clearwater",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Systems", "Technologies", "Solutions", "Dynamics", "Industries", "Labs",
    "Partners", "Group", "Digital", "Analytics", "Logistics", "Networks",
];

const TERRITORIES: &[&str] = &["Northeast", "Southeast", "Central", "West", "Northwest"];

/// Generate `rep_count` reps owning `accounts_per_rep` accounts each.
/// Accounts come back bare — the engine's scoring pass derives the rest.
pub fn generate_portfolio(seed: u64, rep_count: usize, accounts_per_rep: usize) -> Vec<Account> {
    let mut rng = DemoRng::new(seed);
    let mut accounts = Vec::with_capacity(rep_count * accounts_per_rep);
    let mut taken_names: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut taken_reps: std::collections::HashSet<String> = std::collections::HashSet::new();

    for rep_index in 0..rep_count {
        let rep_name = unique_rep_name(&mut rng, &mut taken_reps);
        let segment = match rep_index % 3 {
            0 => Segment::Enterprise,
            1 => Segment::MidMarket,
            _ => Segment::Smb,
        };
        let territory = TERRITORIES[rep_index % TERRITORIES.len()];

        for _ in 0..accounts_per_rep {
            let name = unique_company_name(&mut rng, &mut taken_names);
            let (arr_lo, arr_hi) = arr_band(segment);
            let current_arr = rng.in_range(arr_lo, arr_hi).round();
            let internal_tam = (current_arr * rng.in_range(1.2, 3.0)).round();
            let health_score = rng.in_range(30.0, 95.0).round();
            let churn_risk = (rng.in_range(0.02, 0.50) * 100.0).round() / 100.0;

            let lifecycle = if rng.chance(0.10) {
                LifecycleStage::Onboarding
            } else if rng.chance(0.40) {
                LifecycleStage::Adopting
            } else if rng.chance(0.50) {
                LifecycleStage::Expanding
            } else {
                LifecycleStage::Mature
            };

            accounts.push(
                Account::new(name, rep_name.clone(), current_arr, internal_tam, health_score, churn_risk)
                    .with_territory(territory)
                    .with_segment(segment)
                    .with_lifecycle(lifecycle),
            );
        }
    }

    log::info!(
        "demo: generated {} accounts for {rep_count} reps (seed={seed})",
        accounts.len()
    );
    accounts
}

fn unique_rep_name(
    rng: &mut DemoRng,
    taken: &mut std::collections::HashSet<String>,
) -> String {
    loop {
        let first = REP_FIRST_NAMES[rng.next_u64_below(REP_FIRST_NAMES.len() as u64) as usize];
        let last = REP_LAST_NAMES[rng.next_u64_below(REP_LAST_NAMES.len() as u64) as usize];
        let candidate = if taken.len() >= REP_FIRST_NAMES.len() * REP_LAST_NAMES.len() {
            format!("{first} {last} {}", taken.len() + 1)
        } else {
            format!("{first} {last}")
        };
        if taken.insert(candidate.clone()) {
            return candidate;
        }
    }
}

fn unique_company_name(
    rng: &mut DemoRng,
    taken: &mut std::collections::HashSet<String>,
) -> String {
    loop {
        let prefix = COMPANY_PREFIXES[rng.next_u64_below(COMPANY_PREFIXES.len() as u64) as usize];
        let suffix = COMPANY_SUFFIXES[rng.next_u64_below(COMPANY_SUFFIXES.len() as u64) as usize];
        let candidate = format!("{prefix} {suffix}");
        let name = if taken.contains(&candidate) {
            format!("{candidate} {}", taken.len() + 1)
        } else {
            candidate
        };
        if taken.insert(name.clone()) {
            return name;
        }
    }
}

fn arr_band(segment: Segment) -> (f64, f64) {
    match segment {
        Segment::Smb        => (10_000.0, 60_000.0),
        Segment::MidMarket  => (50_000.0, 250_000.0),
        Segment::Enterprise => (150_000.0, 900_000.0),
    }
}
