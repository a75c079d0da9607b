//! New-account placement — scoring pending accounts against the team.
//!
//! Pending accounts are not yet part of the portfolio. Each is scored
//! against every representative: capacity headroom weighted 0.4 per
//! point, +20 for a territory match, +15 for segment expertise, +10 when
//! the rep is below the team's average whitespace. The best match and up
//! to two alternatives are reported with the reasons that earned them.

use crate::{
    aggregate::Representative,
    types::{safe_ratio, RepName, Segment},
};
use serde::{Deserialize, Serialize};

/// An account awaiting allocation, entered by hand rather than parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAccount {
    pub id:           String,
    pub name:         String,
    pub current_arr:  f64,
    pub internal_tam: f64,
    pub territory:    String,
    pub segment:      Segment,
}

impl PendingAccount {
    pub fn new(
        name: impl Into<String>,
        current_arr: f64,
        internal_tam: f64,
        territory: impl Into<String>,
        segment: Segment,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            current_arr,
            internal_tam,
            territory: territory.into(),
            segment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementAlternative {
    pub rep:   RepName,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRecommendation {
    pub pending:         PendingAccount,
    pub recommended_rep: RepName,
    pub score:           f64,
    pub reasons:         Vec<String>,
    pub alternatives:    Vec<PlacementAlternative>,
}

/// Score every pending account against every rep and pick the best
/// match. Returns nothing when the team is empty.
pub fn recommend_placements(
    pending: &[PendingAccount],
    reps: &[Representative],
) -> Vec<PlacementRecommendation> {
    if reps.is_empty() {
        return Vec::new();
    }

    let avg_whitespace = safe_ratio(
        reps.iter().map(|r| r.total_actionable_whitespace).sum::<f64>(),
        reps.len() as f64,
    );

    pending
        .iter()
        .map(|account| {
            let mut scored: Vec<(usize, f64, Vec<String>)> = reps
                .iter()
                .enumerate()
                .map(|(i, rep)| {
                    let (score, reasons) = score_rep(rep, account, avg_whitespace);
                    (i, score, reasons)
                })
                .collect();
            scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

            let (best_idx, best_score, reasons) = scored[0].clone();
            PlacementRecommendation {
                pending:         account.clone(),
                recommended_rep: reps[best_idx].name.clone(),
                score:           best_score,
                reasons,
                alternatives: scored
                    .iter()
                    .skip(1)
                    .take(2)
                    .map(|(i, score, _)| PlacementAlternative {
                        rep:   reps[*i].name.clone(),
                        score: *score,
                    })
                    .collect(),
            }
        })
        .collect()
}

fn score_rep(
    rep: &Representative,
    account: &PendingAccount,
    avg_whitespace: f64,
) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    let capacity_room = 100.0 - rep.capacity_score;
    score += capacity_room * 0.4;
    if capacity_room > 20.0 {
        reasons.push("Has capacity headroom".to_string());
    }

    if rep.territories.iter().any(|t| t == &account.territory) {
        score += 20.0;
        reasons.push("Territory match".to_string());
    }

    if rep.segments.contains(&account.segment) {
        score += 15.0;
        reasons.push("Segment expertise".to_string());
    }

    if rep.total_actionable_whitespace < avg_whitespace {
        score += 10.0;
        reasons.push("Balances whitespace".to_string());
    }

    (score, reasons)
}
