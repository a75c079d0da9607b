//! Portfolio ingestion — delimited text to derived accounts.
//!
//! This module:
//!   1. Validates the header row against the required columns
//!   2. Splits data rows with a minimal quote-aware state machine
//!   3. Applies the documented defaults for optional columns
//!   4. Runs the scoring pass so every returned account is fully derived
//!
//! Rows whose field count differs from the header are skipped, not
//! rejected. Missing required columns and zero surviving data rows are
//! the only failure modes.

use crate::{
    config::EngineConfig,
    error::{EngineError, EngineResult},
    scoring,
    types::{Account, LifecycleStage, Segment, UNASSIGNED_OWNER},
};
use std::collections::HashMap;

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "account_name",
    "owner",
    "current_arr",
    "internal_tam",
    "health_score",
    "churn_risk",
];

/// Parse delimited text into fully derived accounts.
pub fn parse_portfolio(csv_text: &str, config: &EngineConfig) -> EngineResult<Vec<Account>> {
    let text = csv_text.trim();
    let mut lines = text.lines();

    let header_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(EngineError::no_data_rows()),
    };

    let headers: Vec<String> = split_quoted_line(header_line)
        .iter()
        .map(|h| normalize(h))
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|required| !headers.iter().any(|h| h.as_str() == *required))
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::missing_columns(&missing));
    }

    let mut accounts = Vec::new();
    let mut skipped = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let values = split_quoted_line(line);
        if values.len() != headers.len() {
            skipped += 1;
            continue;
        }

        let row: HashMap<&str, String> = headers
            .iter()
            .map(String::as_str)
            .zip(values.iter().map(|v| strip_quotes(v.trim())))
            .collect();

        let mut account = Account {
            name:            row["account_name"].clone(),
            owner:           row["owner"].clone(),
            current_arr:     parse_number(&row["current_arr"], 0.0),
            internal_tam:    parse_number(&row["internal_tam"], 0.0),
            health_score:    parse_number(&row["health_score"], 50.0),
            churn_risk:      parse_number(&row["churn_risk"], 0.0),
            territory:       optional(&row, "territory", UNASSIGNED_OWNER),
            segment:         row
                .get("segment")
                .and_then(|s| Segment::parse_label(s))
                .unwrap_or(Segment::MidMarket),
            products_owned:  optional(&row, "products_owned", ""),
            lifecycle_stage: row
                .get("lifecycle_stage")
                .and_then(|s| LifecycleStage::parse_label(s))
                .unwrap_or(LifecycleStage::Adopting),
            raw_whitespace:        0.0,
            health_factor:         0.0,
            retention_probability: 0.0,
            actionable_whitespace: 0.0,
            is_at_risk:            false,
            complexity_score:      0.0,
        };
        scoring::derive_account_fields(&mut account, config);
        accounts.push(account);
    }

    if accounts.is_empty() {
        return Err(EngineError::no_data_rows());
    }

    if skipped > 0 {
        log::warn!("ingest: skipped {skipped} rows with mismatched field counts");
    }
    log::info!("ingest: parsed {} accounts", accounts.len());

    Ok(accounts)
}

/// Split one line on commas, honoring double quotes. A `"` toggles the
/// in-quotes state; commas inside quotes are literal.
fn split_quoted_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

fn normalize(raw: &str) -> String {
    strip_quotes(raw.trim()).to_lowercase()
}

fn strip_quotes(raw: &str) -> String {
    raw.chars().filter(|c| *c != '"' && *c != '\'').collect()
}

fn parse_number(raw: &str, fallback: f64) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(fallback)
}

fn optional(row: &HashMap<&str, String>, column: &str, fallback: &str) -> String {
    match row.get(column) {
        Some(value) if !value.trim().is_empty() => value.clone(),
        _ => fallback.to_string(),
    }
}
