//! The analysis engine — an explicit, constructible value type.
//!
//! Holds the one snapshot pair: a baseline (what was loaded, or last
//! applied) and a working copy (what scenarios mutate). Every operation
//! runs to completion synchronously; there is no shared state beyond
//! the pair and no recomputation trigger other than an explicit
//! `rebuild` after each mutation.
//!
//! RULES:
//!   - Simulation never mutates the baseline. Only `apply_scenario` and
//!     `reset_to_baseline` touch it.
//!   - Every mutation re-derives all aggregates from the account list.

use crate::{
    aggregate::{self, BenchmarkComparison, Representative, SummaryMetrics},
    assignment::{self, PendingAccount, PlacementRecommendation},
    config::EngineConfig,
    equity::{self, EquityInsight, EquityReport},
    error::{EngineError, EngineResult},
    ingest,
    projection::{self, GrowthScenario, Projection},
    recommend::{self, Recommendation},
    scenario::{self, ScenarioComparison},
    scoring,
    snapshot::PortfolioSnapshot,
    types::{Account, LifecycleStage, Segment, UNASSIGNED_OWNER},
};

pub struct TerritoryEngine {
    config:   EngineConfig,
    baseline: PortfolioSnapshot,
    working:  PortfolioSnapshot,
    pending:  Vec<PendingAccount>,
}

impl TerritoryEngine {
    /// Parse delimited text and build the baseline. The only fallible
    /// constructor path.
    pub fn from_csv(csv_text: &str, config: EngineConfig) -> EngineResult<Self> {
        let accounts = ingest::parse_portfolio(csv_text, &config)?;
        Ok(Self::from_accounts(accounts, config))
    }

    /// Build from accounts whose base fields are set. The scoring pass
    /// runs here, so callers may pass bare accounts.
    pub fn from_accounts(mut accounts: Vec<Account>, config: EngineConfig) -> Self {
        for account in &mut accounts {
            scoring::derive_account_fields(account, &config);
        }
        let baseline = PortfolioSnapshot::build(accounts, Vec::new(), &config);
        let working = baseline.clone();
        log::info!(
            "engine: loaded {} accounts across {} reps",
            baseline.accounts.len(),
            baseline.reps.len()
        );
        Self {
            config,
            baseline,
            working,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Working-state reads ────────────────────────────────────────────

    pub fn accounts(&self) -> &[Account] {
        &self.working.accounts
    }

    pub fn reps(&self) -> &[Representative] {
        &self.working.reps
    }

    pub fn summary(&self) -> &SummaryMetrics {
        &self.working.summary
    }

    pub fn baseline_summary(&self) -> &SummaryMetrics {
        &self.baseline.summary
    }

    pub fn working_snapshot(&self) -> &PortfolioSnapshot {
        &self.working
    }

    pub fn baseline_snapshot(&self) -> &PortfolioSnapshot {
        &self.baseline
    }

    pub fn territories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for account in &self.working.accounts {
            if !seen.contains(&account.territory) {
                seen.push(account.territory.clone());
            }
        }
        seen
    }

    // ── Analysis ───────────────────────────────────────────────────────

    pub fn equity(&self) -> EquityReport {
        equity::equity_report(&self.working.reps)
    }

    pub fn insights(&self) -> Vec<EquityInsight> {
        equity::equity_insights(&self.working.reps, &self.working.summary)
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommend::recommendations(&self.working.reps, &self.working.summary, &self.config)
    }

    pub fn projection(&self, scenario: GrowthScenario) -> Projection {
        projection::project(&self.working.summary, scenario, &self.config)
    }

    pub fn benchmark_comparison(&self, segment: Segment) -> BenchmarkComparison {
        aggregate::benchmark_comparison(&self.working.summary, segment, &self.config)
    }

    // ── Scenario simulation ────────────────────────────────────────────

    /// Add a representative with an empty book. A no-op when the name
    /// already exists.
    pub fn add_rep(&mut self, name: &str) -> ScenarioComparison {
        if self.working.has_rep(name) {
            log::debug!("scenario: rep '{name}' already exists, nothing to add");
        } else {
            self.working.added_reps.push(name.to_string());
            self.working.rebuild(&self.config);
            log::info!("scenario: added rep '{name}'");
        }
        self.comparison()
    }

    /// Remove a representative, orphaning their accounts to the
    /// "Unassigned" owner (which then shows up as its own row).
    pub fn remove_rep(&mut self, name: &str) -> EngineResult<ScenarioComparison> {
        if !self.working.has_rep(name) {
            return Err(EngineError::UnknownRep { name: name.to_string() });
        }

        let mut orphaned = 0usize;
        for account in &mut self.working.accounts {
            if account.owner == name {
                account.owner = UNASSIGNED_OWNER.to_string();
                orphaned += 1;
            }
        }
        self.working.added_reps.retain(|r| r != name);
        self.working.rebuild(&self.config);

        log::info!("scenario: removed rep '{name}', {orphaned} accounts unassigned");
        Ok(self.comparison())
    }

    /// Reassign named accounts to a target representative. Unknown
    /// account names are skipped; an unknown target is an error.
    pub fn reassign(
        &mut self,
        account_names: &[&str],
        to_rep: &str,
    ) -> EngineResult<ScenarioComparison> {
        if !self.working.has_rep(to_rep) {
            return Err(EngineError::UnknownRep { name: to_rep.to_string() });
        }

        let mut moved = 0usize;
        for name in account_names {
            match self
                .working
                .accounts
                .iter_mut()
                .find(|a| a.name == *name)
            {
                Some(account) => {
                    account.owner = to_rep.to_string();
                    moved += 1;
                }
                None => log::debug!("scenario: account '{name}' not found, skipping"),
            }
        }
        self.working.rebuild(&self.config);

        log::info!("scenario: reassigned {moved} accounts to '{to_rep}'");
        Ok(self.comparison())
    }

    /// Remove a share of the at-risk book, in input order.
    pub fn simulate_churn(&mut self, percentage: f64) -> ScenarioComparison {
        let at_risk: Vec<String> = self
            .working
            .accounts
            .iter()
            .filter(|a| a.is_at_risk)
            .map(|a| a.name.clone())
            .collect();
        let churn_count = (at_risk.len() as f64 * percentage).round() as usize;
        let churned: std::collections::HashSet<&String> =
            at_risk.iter().take(churn_count).collect();

        self.working.accounts.retain(|a| !churned.contains(&a.name));
        self.working.rebuild(&self.config);

        log::info!(
            "scenario: churned {churn_count} of {} at-risk accounts ({:.0}%)",
            at_risk.len(),
            percentage * 100.0
        );
        self.comparison()
    }

    /// Discard the working copy and restore the baseline.
    pub fn reset_to_baseline(&mut self) {
        self.working = self.baseline.clone();
        log::info!("scenario: reset to baseline");
    }

    /// Promote the working copy to the new baseline.
    pub fn apply_scenario(&mut self) {
        self.baseline = self.working.clone();
        log::info!("scenario: applied as new baseline");
    }

    fn comparison(&self) -> ScenarioComparison {
        scenario::compare(&self.baseline.summary, &self.working.summary)
    }

    // ── Pending-account allocation ─────────────────────────────────────

    pub fn pending(&self) -> &[PendingAccount] {
        &self.pending
    }

    pub fn add_pending(&mut self, account: PendingAccount) -> &[PendingAccount] {
        self.pending.push(account);
        &self.pending
    }

    pub fn remove_pending(&mut self, id: &str) -> &[PendingAccount] {
        self.pending.retain(|a| a.id != id);
        &self.pending
    }

    pub fn placement_recommendations(&self) -> Vec<PlacementRecommendation> {
        assignment::recommend_placements(&self.pending, &self.working.reps)
    }

    /// Materialize every placement recommendation as a fresh Onboarding
    /// account on the working copy and clear the pending queue.
    pub fn apply_placements(&mut self) -> ScenarioComparison {
        let placements = self.placement_recommendations();
        for placement in placements {
            let pending = placement.pending;
            let mut account = Account::new(
                pending.name,
                placement.recommended_rep,
                pending.current_arr,
                pending.internal_tam,
                80.0, // new accounts start healthy
                0.05,
            )
            .with_territory(pending.territory)
            .with_segment(pending.segment)
            .with_lifecycle(LifecycleStage::Onboarding);
            scoring::derive_account_fields(&mut account, &self.config);
            self.working.accounts.push(account);
        }
        self.pending.clear();
        self.working.rebuild(&self.config);
        self.comparison()
    }
}
