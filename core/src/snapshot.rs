//! Portfolio snapshots — the unit of scenario simulation.
//!
//! A snapshot is a structural value copy (plain `Clone`), not a
//! serialization round-trip. The engine holds a baseline/working pair;
//! what-if operations mutate only the working copy and call `rebuild`
//! to re-derive representatives and summary from scratch.

use crate::{
    aggregate::{self, Representative, SummaryMetrics},
    config::EngineConfig,
    types::{Account, RepName},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub accounts: Vec<Account>,
    /// Representatives added in a scenario before owning any accounts.
    /// Kept on the roster so they survive re-derivation.
    pub added_reps: Vec<RepName>,
    pub reps:     Vec<Representative>,
    pub summary:  SummaryMetrics,
}

impl PortfolioSnapshot {
    pub fn build(accounts: Vec<Account>, added_reps: Vec<RepName>, config: &EngineConfig) -> Self {
        let reps = aggregate::derive_representatives(&accounts, &added_reps, config);
        let summary = aggregate::summarize(&reps);
        Self {
            accounts,
            added_reps,
            reps,
            summary,
        }
    }

    /// Re-derive representatives and summary after any change to the
    /// account list or roster. The only way aggregates get updated.
    pub fn rebuild(&mut self, config: &EngineConfig) {
        self.reps = aggregate::derive_representatives(&self.accounts, &self.added_reps, config);
        self.summary = aggregate::summarize(&self.reps);
    }

    pub fn has_rep(&self, name: &str) -> bool {
        self.reps.iter().any(|r| r.name == name)
    }
}
