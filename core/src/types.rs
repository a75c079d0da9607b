//! Shared primitive types used across the entire engine.

use serde::{Deserialize, Serialize};

/// The display name of a representative. Owner identifiers in the input
/// are used verbatim as representative names.
pub type RepName = String;

/// The unique name of an account within a portfolio.
pub type AccountName = String;

/// The owner assigned to accounts whose representative has been removed.
pub const UNASSIGNED_OWNER: &str = "Unassigned";

/// Guarded division. A zero denominator yields 0 instead of NaN or
/// Infinity — score and ratio calculations depend on this degradation.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Customer segment tier. Unknown labels in input data fall back to
/// Mid-Market, the documented default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "SMB")]
    Smb,
    #[serde(rename = "Mid-Market")]
    MidMarket,
    #[serde(rename = "Enterprise")]
    Enterprise,
}

impl Segment {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Smb        => "SMB",
            Self::MidMarket  => "Mid-Market",
            Self::Enterprise => "Enterprise",
        }
    }

    /// Case-insensitive parse of the labels seen in uploaded data.
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "smb" | "small business"                  => Some(Self::Smb),
            "mid-market" | "midmarket" | "mid market" => Some(Self::MidMarket),
            "enterprise" | "ent"                      => Some(Self::Enterprise),
            _                                         => None,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Account lifecycle stage. Unknown labels fall back to Adopting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStage {
    Onboarding,
    Adopting,
    Expanding,
    Mature,
}

impl LifecycleStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Onboarding => "Onboarding",
            Self::Adopting   => "Adopting",
            Self::Expanding  => "Expanding",
            Self::Mature     => "Mature",
        }
    }

    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "onboarding" => Some(Self::Onboarding),
            "adopting"   => Some(Self::Adopting),
            "expanding"  => Some(Self::Expanding),
            "mature"     => Some(Self::Mature),
            _            => None,
        }
    }
}

impl std::fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the portfolio, with every derived field filled in at load
/// time. Derived fields are never patched in place — any change to the
/// base fields goes through a full re-derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name:            AccountName,
    pub owner:           RepName,
    pub current_arr:     f64,
    pub internal_tam:    f64,
    pub health_score:    f64,
    pub churn_risk:      f64,
    pub territory:       String,
    pub segment:         Segment,
    pub products_owned:  String,
    pub lifecycle_stage: LifecycleStage,

    // Derived once per load — see scoring.rs.
    pub raw_whitespace:        f64,
    pub health_factor:         f64,
    pub retention_probability: f64,
    pub actionable_whitespace: f64,
    pub is_at_risk:            bool,
    pub complexity_score:      f64,
}

impl Account {
    /// A bare account with the documented defaults for the optional
    /// columns and zeroed derived fields. Callers run the scoring pass
    /// before using it.
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        current_arr: f64,
        internal_tam: f64,
        health_score: f64,
        churn_risk: f64,
    ) -> Self {
        Self {
            name:            name.into(),
            owner:           owner.into(),
            current_arr,
            internal_tam,
            health_score,
            churn_risk,
            territory:       UNASSIGNED_OWNER.to_string(),
            segment:         Segment::MidMarket,
            products_owned:  String::new(),
            lifecycle_stage: LifecycleStage::Adopting,
            raw_whitespace:        0.0,
            health_factor:         0.0,
            retention_probability: 0.0,
            actionable_whitespace: 0.0,
            is_at_risk:            false,
            complexity_score:      0.0,
        }
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segment = segment;
        self
    }

    pub fn with_territory(mut self, territory: impl Into<String>) -> Self {
        self.territory = territory.into();
        self
    }

    pub fn with_lifecycle(mut self, stage: LifecycleStage) -> Self {
        self.lifecycle_stage = stage;
        self
    }
}
