//! The load, join, render pipeline.

use crate::boundary::{BoundaryLoader, BoundarySet, BoundarySource};
use crate::config::Settings;
use crate::error::MapResult;
use crate::http_client::HttpClient;
use crate::join::{join_rows, StateRow};
use crate::legislation::LegislationTable;
use crate::render::Choropleth;

/// Boundaries together with their joined rows.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedMap {
    pub boundaries: BoundarySet,
    pub rows: Vec<StateRow>,
}

impl JoinedMap {
    /// Join a boundary set against the legislation table.
    pub fn new(boundaries: BoundarySet, table: &LegislationTable) -> Self {
        let rows = join_rows(boundaries.names(), table);
        Self { boundaries, rows }
    }

    /// Chart over this map's rows and boundaries.
    pub fn choropleth(&self) -> Choropleth<'_> {
        Choropleth::new(&self.rows, &self.boundaries)
    }
}

/// Runs each step once, in order.
pub struct MapPipeline {
    loader: BoundaryLoader,
    table: LegislationTable,
}

impl MapPipeline {
    pub fn new(settings: &Settings) -> MapResult<Self> {
        let client = HttpClient::new(settings.user_agent.as_deref(), settings.timeout())?;
        Ok(Self {
            loader: BoundaryLoader::new(client),
            table: LegislationTable,
        })
    }

    /// Load boundaries and join them.
    pub async fn load(&self, source: &BoundarySource) -> MapResult<JoinedMap> {
        let boundaries = self.loader.load(source).await?;
        let map = JoinedMap::new(boundaries, &self.table);
        tracing::debug!("Joined {} rows", map.rows.len());
        Ok(map)
    }
}
