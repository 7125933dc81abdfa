use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data_structures::LiteralSelection;
use crate::error::SolverError;

/*
Solver configuration: loaded from an optional JSON file
via serde, falling back to `Default` for any field the file omits (`#[serde(default)]`), using
typed derives rather than manual `serde_json::Value` field walks.
*/
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub vsids_decay_factor: f64,
    pub clause_decay_factor: f64,
    pub restart_base: i64,
    pub reduce_threshold: usize,
    pub keep_fraction: f64,
    pub keep_floor: usize,
    pub dpll_literal_selection: LiteralSelection,
    pub dpll_pure_literal_elimination: bool,
    pub seed: u64,
    pub deadline_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vsids_decay_factor: 0.95,
            clause_decay_factor: 0.999,
            restart_base: 100,
            reduce_threshold: 2000,
            keep_fraction: 0.5,
            keep_floor: 200,
            dpll_literal_selection: LiteralSelection::default(),
            dpll_pure_literal_elimination: true,
            seed: 0,
            deadline_seconds: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, SolverError> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }
}

#[cfg(test)]
mod config_tests;
