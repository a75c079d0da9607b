//! SQLite persistence layer for analysis runs and snapshots.
//!
//! RULE: Only store.rs talks to the database. The engine never touches
//! it — the runner records runs and labelled snapshots here so an
//! analysis can be reloaded or compared later.

use crate::{error::EngineResult, snapshot::PortfolioSnapshot};
use rusqlite::{params, Connection, OptionalExtension};

pub struct PlannerStore {
    conn: Connection,
}

impl PlannerStore {
    /// Open (or create) the planner database at `path`.
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Runs ───────────────────────────────────────────────────────────

    pub fn insert_run(
        &self,
        run_id: &str,
        source: &str,
        account_count: usize,
        rep_count: usize,
        version: &str,
    ) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO analysis_run (run_id, source, account_count, rep_count, version, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                run_id,
                source,
                account_count as i64,
                rep_count as i64,
                version,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn run_count(&self) -> EngineResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM analysis_run", [], |row| row.get(0))?;
        Ok(count)
    }

    // ── Snapshots ──────────────────────────────────────────────────────

    /// Persist a snapshot as JSON under (run, label, kind). Kind is
    /// "baseline" or "scenario".
    pub fn save_snapshot(
        &self,
        run_id: &str,
        label: &str,
        kind: &str,
        snapshot: &PortfolioSnapshot,
    ) -> EngineResult<()> {
        let state_json = serde_json::to_string(snapshot)?;
        self.conn.execute(
            "INSERT INTO portfolio_snapshot (run_id, label, kind, state_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![run_id, label, kind, state_json, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn load_snapshot(
        &self,
        run_id: &str,
        label: &str,
    ) -> EngineResult<Option<PortfolioSnapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT state_json FROM portfolio_snapshot
             WHERE run_id = ?1 AND label = ?2
             ORDER BY id DESC LIMIT 1",
        )?;
        let state_json: Option<String> = stmt
            .query_row(params![run_id, label], |row| row.get(0))
            .optional()?;
        match state_json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
