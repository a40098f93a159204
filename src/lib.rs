//! consentmap - choropleth of U.S. states with active consent legislation.
//!
//! Fetches state boundaries as GeoJSON, joins them against a fixed table of
//! passed laws and bill citations, and exports the result as a standalone
//! HTML map.

pub mod boundary;
pub mod cli;
pub mod config;
pub mod error;
pub mod http_client;
pub mod join;
pub mod legislation;
pub mod pipeline;
pub mod render;
pub mod viewer;

pub use error::{MapError, MapResult};
