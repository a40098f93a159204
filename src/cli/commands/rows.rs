//! Rows command.

use console::style;

use crate::config::Settings;
use crate::legislation::ConsentLaw;

use crate::cli::helpers::load_map;

/// Print the joined rows as a table or JSON.
pub async fn cmd_rows(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let map = load_map(settings).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&map.rows)?);
        return Ok(());
    }

    println!("{:<22} {:<12} Hover Text", "State", "Consent Law");
    println!("{}", "-".repeat(70));
    for row in &map.rows {
        let law = format!("{:<12}", row.consent_law.label());
        let law = match row.consent_law {
            ConsentLaw::Passed => style(law).green(),
            ConsentLaw::NotPassed => style(law).dim(),
        };
        println!("{:<22} {} {}", row.state, law, row.hover_text);
    }

    Ok(())
}
