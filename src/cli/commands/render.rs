//! Render command.

use anyhow::Context;
use console::style;

use crate::config::Settings;
use crate::legislation::ConsentLaw;
use crate::viewer;

use crate::cli::helpers::load_map;

/// Fetch boundaries, join, write the HTML map, and open it.
pub async fn cmd_render(settings: &Settings) -> anyhow::Result<()> {
    let map = load_map(settings).await?;

    let passed = map
        .rows
        .iter()
        .filter(|row| row.consent_law == ConsentLaw::Passed)
        .count();
    println!(
        "{} Joined {} states ({} passed)",
        style("✓").green(),
        map.rows.len(),
        passed
    );

    let output = &settings.output_path;
    map.choropleth()
        .write_html(output)
        .with_context(|| format!("Failed to export map to {}", output.display()))?;
    println!("{} Wrote {}", style("✓").green(), output.display());

    if settings.open_viewer {
        println!("{} Opening map in default viewer", style("→").cyan());
        if let Err(e) = viewer::open_in_viewer(output) {
            tracing::warn!("{}", e);
            eprintln!("  {} {}", style("!").yellow(), e);
        }
    }

    Ok(())
}
