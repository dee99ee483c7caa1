//! Catalog and scenario configuration, built in or read from disk.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use skirmish_core::{Scenario, TypeCatalog};

const DEFAULT_CATALOG: &str = include_str!("../data/catalog.json");
const DEFAULT_SCENARIO: &str = include_str!("../data/scenario.json");

/// Reads the object catalog from `path`, or the built-in one.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<TypeCatalog> {
    match path {
        Some(path) => read_json(path).context("invalid catalog file"),
        None => serde_json::from_str(DEFAULT_CATALOG).context("built-in catalog is invalid"),
    }
}

/// Reads the scenario from `path`, or the built-in one, applying a seed override.
pub(crate) fn load_scenario(path: Option<&Path>, seed: Option<u64>) -> Result<Scenario> {
    let mut scenario: Scenario = match path {
        Some(path) => read_json(path).context("invalid scenario file")?,
        None => serde_json::from_str(DEFAULT_SCENARIO).context("built-in scenario is invalid")?,
    };
    if let Some(seed) = seed {
        scenario.seed = seed;
    }
    scenario.validate().context("scenario failed validation")?;
    Ok(scenario)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}
