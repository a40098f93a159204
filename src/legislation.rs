//! Static table of active consent legislation by state.
//!
//! The two lookups are independent: nothing checks that every citation key is
//! also in [`PASSED`], and Louisiana's citation carries no year. Both are kept
//! exactly as recorded.

use serde::Serialize;

/// States that have passed active consent legislation.
pub const PASSED: &[&str] = &[
    "Florida",
    "Idaho",
    "Iowa",
    "Kentucky",
    "Louisiana",
    "Nevada",
    "New Hampshire",
    "North Carolina",
    "Ohio",
    "Tennessee",
    "Texas",
];

/// Bill name and year per state.
pub const CITATIONS: &[(&str, &str)] = &[
    ("Ohio", "House Bill 8 (2025)"),
    ("Idaho", "Title 32 (2024)"),
    ("North Carolina", "Senate Bill 49 (2023)"),
    ("Florida", "House Bill 241 (2021)"),
    ("Texas", "Senate Bill 9 (2021)"),
    ("Tennessee", "Senate Bill 1443 (2023)"),
    ("Kentucky", "Senate Bill 150.132 (2023)"),
    ("Iowa", "Senate File 496 (2023)"),
    ("Nevada", "NRS 389 (2024)"),
    ("New Hampshire", "RSA 186:11 (2023)"),
    ("Louisiana", "Act 837"),
];

/// Sentinel label for states without a passed law.
pub const NOT_PASSED_LABEL: &str = "—";

/// Whether a state has passed active consent legislation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConsentLaw {
    #[serde(rename = "Passed")]
    Passed,
    #[serde(rename = "—")]
    NotPassed,
}

impl ConsentLaw {
    /// Display label, also used as the color-scale category.
    pub fn label(self) -> &'static str {
        match self {
            ConsentLaw::Passed => "Passed",
            ConsentLaw::NotPassed => NOT_PASSED_LABEL,
        }
    }

    /// Both categories, in legend order.
    pub fn all() -> [ConsentLaw; 2] {
        [ConsentLaw::Passed, ConsentLaw::NotPassed]
    }
}

impl std::fmt::Display for ConsentLaw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Legislation status for a single state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    pub name: String,
    pub consent_law: ConsentLaw,
    pub citation: Option<&'static str>,
}

/// Read-only view over the passed set and citation map.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegislationTable;

impl LegislationTable {
    /// Status for a state name. Unknown names are simply not passed.
    pub fn consent_law(&self, state: &str) -> ConsentLaw {
        if PASSED.contains(&state) {
            ConsentLaw::Passed
        } else {
            ConsentLaw::NotPassed
        }
    }

    /// Citation for a state, if one is recorded.
    pub fn citation(&self, state: &str) -> Option<&'static str> {
        CITATIONS
            .iter()
            .find(|(name, _)| *name == state)
            .map(|(_, citation)| *citation)
    }

    /// Combined record for a state name.
    pub fn record(&self, state: &str) -> StateRecord {
        StateRecord {
            name: state.to_string(),
            consent_law: self.consent_law(state),
            citation: self.citation(state),
        }
    }
}
