use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::data_structures::SolverType;

/// A Boolean satisfiability decision engine: CDCL with a DPLL fallback, DIMACS CNF in, SAT/UNSAT
/// (or timeout) out. Mirrors the corpus's clap-derive CLI shape (`varisat-cli`, `drcp-debugger`).
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve a single DIMACS CNF instance.
    Solve {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Engine::Cdcl)]
        engine: Engine,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Solve every instance in a directory and write a CSV report.
    Bench {
        directory: PathBuf,
        #[arg(long, value_enum, default_value_t = Engine::Cdcl)]
        engine: Engine,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "results.csv")]
        output: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    Cdcl,
    Dpll,
}

impl From<Engine> for SolverType {
    fn from(engine: Engine) -> Self {
        match engine {
            Engine::Cdcl => SolverType::Cdcl,
            Engine::Dpll => SolverType::Dpll,
        }
    }
}
