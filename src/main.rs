use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use clap::Parser;
use log::info;

use cdcl_sat::cli::{Cli, Command};
use cdcl_sat::config::Config;
use cdcl_sat::data_structures::SolverType;
use cdcl_sat::error::SolverError;
use cdcl_sat::{cdcl, dimacs, dpll, harness};

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<Config, SolverError> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}

fn run() -> Result<(), SolverError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Solve {
            file,
            engine,
            config,
            seed,
        } => {
            let config = load_config(config.as_deref(), seed)?;
            let engine: SolverType = engine.into();
            let reader = BufReader::new(File::open(&file)?);
            let cnf = dimacs::parse(reader)?;
            info!("loaded {} ({} clauses)", file.display(), cnf.clauses.len());

            let deadline = config.deadline_seconds.map(std::time::Duration::from_secs);
            let outcome = match engine {
                SolverType::Cdcl => {
                    let cdcl_config = cdcl::CdclConfig {
                        decay_factor: config.vsids_decay_factor,
                        restart_base: config.restart_base,
                        reduce_threshold: config.reduce_threshold,
                        keep_fraction: config.keep_fraction,
                        keep_floor: config.keep_floor,
                        seed: config.seed,
                        deadline,
                    };
                    match cdcl::solve(cnf.num_vars, cnf.clauses, cdcl_config) {
                        cdcl::Outcome::Satisfiable(_) => "Satisfiable",
                        cdcl::Outcome::Unsatisfiable => "Unsatisfiable",
                        cdcl::Outcome::Timeout => "Runtime has timed out",
                    }
                }
                SolverType::Dpll => {
                    let dpll_config = dpll::DpllConfig {
                        selection: config.dpll_literal_selection,
                        pure_literal_elimination: config.dpll_pure_literal_elimination,
                        deadline,
                        ..dpll::DpllConfig::default()
                    };
                    match dpll::solve(cnf.num_vars, cnf.clauses, dpll_config) {
                        dpll::Outcome::Satisfiable(_) => "Satisfiable",
                        dpll::Outcome::Unsatisfiable => "Unsatisfiable",
                        dpll::Outcome::Timeout => "Runtime has timed out",
                    }
                }
            };
            println!("{outcome}");
        }
        Command::Bench {
            directory,
            engine,
            config,
            seed,
            output,
        } => {
            let config = load_config(config.as_deref(), seed)?;
            harness::run_directory(&directory, engine.into(), &config, &output)?;
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
