use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use log::info;

use crate::cdcl::{self, CdclConfig, Outcome as CdclOutcome};
use crate::config::Config;
use crate::data_structures::{Clause, LiteralSelection, SolverType};
use crate::dimacs;
use crate::dpll::{self, DpllConfig, Outcome as DpllOutcome};
use crate::error::SolverError;

/// One row of the batch harness's CSV output: filename, clause count,
/// outcome, wall-clock solving time, an approximate memory footprint, and the heuristic used.
pub struct InstanceResult {
    pub filename: String,
    pub clauses: usize,
    pub result: String,
    pub solving_time_seconds: f64,
    pub memory_mb: f64,
    pub heuristic: String,
}

fn heuristic_label(engine: SolverType, config: &Config) -> String {
    match engine {
        SolverType::Cdcl => "vsids".to_string(),
        SolverType::Dpll => match config.dpll_literal_selection {
            LiteralSelection::JeroslowWang => "jeroslow-wang".to_string(),
            LiteralSelection::Moms(m) => format!("moms({m})"),
            LiteralSelection::VsidsLite => "vsids-lite".to_string(),
        },
    }
}

/// Rough approximation of the solver's working-set size: the clause store's literal storage plus
/// a fixed per-variable overhead for the trail/activity arrays. Not a measurement of actual
/// process RSS -- the corpus has no crate for that -- just enough to give the CSV column a
/// comparable number across instances.
fn approximate_memory_mb(clauses: &[Clause], num_vars: usize) -> f64 {
    let literal_bytes: usize = clauses.iter().map(|c| c.len() * std::mem::size_of::<i32>()).sum();
    let per_var_overhead = num_vars * (std::mem::size_of::<f64>() * 2 + std::mem::size_of::<bool>());
    (literal_bytes + per_var_overhead) as f64 / (1024.0 * 1024.0)
}

pub fn solve_file(
    path: &Path,
    engine: SolverType,
    config: &Config,
) -> Result<InstanceResult, SolverError> {
    let file = File::open(path)?;
    let cnf = dimacs::parse(BufReader::new(file))?;
    let deadline = config.deadline_seconds.map(Duration::from_secs);

    let start = Instant::now();
    let result = run_engine(engine, cnf.num_vars, cnf.clauses.clone(), config, deadline);
    let elapsed = start.elapsed().as_secs_f64();

    Ok(InstanceResult {
        filename: path.display().to_string(),
        clauses: cnf.clauses.len(),
        result,
        solving_time_seconds: elapsed,
        memory_mb: approximate_memory_mb(&cnf.clauses, cnf.num_vars),
        heuristic: heuristic_label(engine, config),
    })
}

fn run_engine(
    engine: SolverType,
    num_vars: usize,
    clauses: Vec<Clause>,
    config: &Config,
    deadline: Option<Duration>,
) -> String {
    match engine {
        SolverType::Cdcl => {
            let cdcl_config = CdclConfig {
                decay_factor: config.vsids_decay_factor,
                restart_base: config.restart_base,
                reduce_threshold: config.reduce_threshold,
                keep_fraction: config.keep_fraction,
                keep_floor: config.keep_floor,
                seed: config.seed,
                deadline,
            };
            match cdcl::solve(num_vars, clauses, cdcl_config) {
                CdclOutcome::Satisfiable(_) => "SAT".to_string(),
                CdclOutcome::Unsatisfiable => "UNSAT".to_string(),
                CdclOutcome::Timeout => "TIMEOUT".to_string(),
            }
        }
        SolverType::Dpll => {
            let dpll_config = DpllConfig {
                selection: config.dpll_literal_selection,
                pure_literal_elimination: config.dpll_pure_literal_elimination,
                deadline,
                ..DpllConfig::default()
            };
            match dpll::solve(num_vars, clauses, dpll_config) {
                DpllOutcome::Satisfiable(_) => "SAT".to_string(),
                DpllOutcome::Unsatisfiable => "UNSAT".to_string(),
                DpllOutcome::Timeout => "TIMEOUT".to_string(),
            }
        }
    }
}

/// Runs every `.cnf`/`.dimacs` file in `directory` and writes a CSV report to `output_path`.
pub fn run_directory(
    directory: &Path,
    engine: SolverType,
    config: &Config,
    output_path: &Path,
) -> Result<(), SolverError> {
    let mut rows = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        info!("solving {}", path.display());
        match solve_file(&path, engine, config) {
            Ok(row) => rows.push(row),
            Err(err) => {
                log::warn!("skipping {}: {err}", path.display());
            }
        }
    }

    let mut output = File::create(output_path)?;
    writeln!(output, "filename,clauses,result,solving_time_seconds,memory_mb,heuristic")?;
    for row in rows {
        writeln!(
            output,
            "{},{},{},{:.6},{:.4},{}",
            row.filename, row.clauses, row.result, row.solving_time_seconds, row.memory_mb, row.heuristic
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod harness_tests;
