//! Shared helper functions for CLI commands.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::boundary::BoundarySource;
use crate::config::Settings;
use crate::pipeline::{JoinedMap, MapPipeline};

/// Fetch and join boundaries behind a spinner.
pub async fn load_map(settings: &Settings) -> anyhow::Result<JoinedMap> {
    let pipeline = MapPipeline::new(settings)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Loading boundaries from {}...", source_label(&settings.boundary)));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = pipeline.load(&settings.boundary).await;
    pb.finish_and_clear();

    Ok(result?)
}

/// Short label for a boundary source: the host for URLs, the path otherwise.
pub fn source_label(source: &BoundarySource) -> String {
    match source {
        BoundarySource::Url(url) => url.host_str().unwrap_or("remote").to_string(),
        BoundarySource::Path(path) => path.display().to_string(),
    }
}
