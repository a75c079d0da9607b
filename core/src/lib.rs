//! territory-core — capacity and equity analytics for account portfolios.
//!
//! The engine turns a flat (account, owner) list into per-representative
//! workload estimates, team-wide fairness scores, and prioritized
//! rebalancing recommendations.
//!
//! RULES:
//!   - All derived state is recomputed from scratch after every mutation.
//!     There are no incremental caches to invalidate.
//!   - Ratio math never produces NaN or Infinity: a zero denominator
//!     yields 0, and callers depend on that.
//!   - The engine is an explicit value type. No globals, no ambient state.
//!   - Only store.rs talks to the database, and only the runner talks to
//!     the store. The engine performs no I/O once given text.

pub mod aggregate;
pub mod assignment;
pub mod config;
pub mod demo;
pub mod engine;
pub mod equity;
pub mod error;
pub mod ingest;
pub mod projection;
pub mod recommend;
pub mod rng;
pub mod scenario;
pub mod scoring;
pub mod snapshot;
pub mod store;
pub mod types;
