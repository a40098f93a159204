//! Join boundary names against the legislation table.

use serde::Serialize;

use crate::legislation::{ConsentLaw, LegislationTable};

/// Separator between the state name and its citation in hover text.
pub const HOVER_BREAK: &str = "<br>";

/// One joined row per boundary feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateRow {
    pub state: String,
    pub consent_law: ConsentLaw,
    pub hover_text: String,
}

/// Build one row per name, preserving order and duplicates.
pub fn join_rows<'a, I>(names: I, table: &LegislationTable) -> Vec<StateRow>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(|name| StateRow {
            state: name.to_string(),
            consent_law: table.consent_law(name),
            hover_text: hover_text(name, table.citation(name)),
        })
        .collect()
}

fn hover_text(state: &str, citation: Option<&str>) -> String {
    match citation {
        Some(citation) => format!("{}{}{}", state, HOVER_BREAK, citation),
        None => state.to_string(),
    }
}
