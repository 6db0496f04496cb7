use anyhow::{Context, Result};

use super::ingest::read_catalog;
use super::types::PlanetInput;

const DEMO_CSV: &str = include_str!("../../data/exoplanets_demo.csv");

/// The bundled four-planet demo dataset
pub fn demo_catalog() -> Result<Vec<PlanetInput>> {
    read_catalog(DEMO_CSV.as_bytes()).context("Failed to parse bundled demo catalog")
}
