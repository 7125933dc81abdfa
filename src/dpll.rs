use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::data_structures::{negate, var_of, Clause, LiteralSelection, Statistics};
use crate::heuristic::VsidsLiteCounters;
use crate::literal_selection::select_literal;
use crate::pure_literal::find_pure_literals;

/// Mirrors `cdcl::Outcome` but DPLL has no notion of a model beyond a flat assignment list -- the
/// search never builds a trail, so there's nothing richer to report on `Satisfiable`.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Satisfiable(Vec<i32>),
    Unsatisfiable,
    Timeout,
}

#[derive(Clone, Debug)]
pub struct DpllConfig {
    pub selection: LiteralSelection,
    pub pure_literal_elimination: bool,
    pub deadline: Option<Duration>,
    /// Size in bytes of the dedicated stack the recursive search runs on, to avoid blowing the
    /// default thread stack on deep instances. Plain `std::thread::Builder::stack_size`, not an
    /// iterative rewrite, since the recursive shape is otherwise a direct, readable mirror of the
    /// backtracking search it implements.
    pub stack_size: usize,
}

impl Default for DpllConfig {
    fn default() -> Self {
        DpllConfig {
            selection: LiteralSelection::default(),
            pure_literal_elimination: true,
            deadline: None,
            stack_size: 64 * 1024 * 1024,
        }
    }
}

#[derive(Clone, Debug)]
struct DpllState {
    clauses: Vec<Clause>,
    assignment: std::collections::HashMap<i32, bool>,
}

impl DpllState {
    fn assign(&mut self, lit: i32) -> bool {
        self.assignment.insert(var_of(lit), lit > 0);
        let mut next = Vec::with_capacity(self.clauses.len());
        for clause in self.clauses.drain(..) {
            if clause.literals.contains(&lit) {
                continue;
            }
            let remaining: Vec<i32> = clause
                .literals
                .iter()
                .copied()
                .filter(|&l| l != negate(lit))
                .collect();
            if remaining.is_empty() {
                self.clauses = vec![Clause { literals: vec![] }];
                return false;
            }
            next.push(Clause { literals: remaining });
        }
        self.clauses = next;
        true
    }
}

/*
Unit propagation for the DPLL search: repeatedly assigns any unit clause's
literal and simplifies, until a fixed point, a conflict (an empty clause appears), or every clause
is satisfied. Bumps `VsidsLiteCounters` for each propagated literal so the VSIDS-lite selection
heuristic has data to rank on.
*/
fn unit_propagate(state: &mut DpllState, seed: i32, statistics: &mut Statistics, counters: &mut VsidsLiteCounters) -> bool {
    let mut queue = VecDeque::new();
    queue.push_back(seed);
    while let Some(lit) = queue.pop_front() {
        statistics.increment_propagation_count();
        counters.bump(lit);
        if !state.assign(lit) {
            return false;
        }
        let units: Vec<i32> = state
            .clauses
            .iter()
            .filter(|c| c.len() == 1)
            .map(|c| c.literals[0])
            .collect();
        for unit in units {
            if !state.assignment.contains_key(&var_of(unit)) {
                queue.push_back(unit);
            }
        }
    }
    true
}

/// Recursive backtracking search, run from `solve` on a dedicated
/// large-stack thread. Clones the live clause set on each branch, mirroring how a recursive DPLL
/// naturally isolates one branch's simplifications from its sibling's.
fn search(
    state: &DpllState,
    decision: Option<i32>,
    config: &DpllConfig,
    statistics: &mut Statistics,
    counters: &mut VsidsLiteCounters,
    start: Instant,
) -> Outcome {
    if let Some(deadline) = config.deadline {
        if start.elapsed() > deadline {
            return Outcome::Timeout;
        }
    }

    let mut state = state.clone();
    if let Some(lit) = decision {
        if !unit_propagate(&mut state, lit, statistics, counters) {
            return Outcome::Unsatisfiable;
        }
    }

    if state.clauses.is_empty() {
        return Outcome::Satisfiable(state.assignment.iter().map(|(&v, &p)| if p { v } else { negate(v) }).collect());
    }
    if state.clauses.iter().any(Clause::is_empty) {
        return Outcome::Unsatisfiable;
    }

    if config.pure_literal_elimination {
        let pure = find_pure_literals(&state.clauses);
        for lit in pure {
            if state.assignment.contains_key(&var_of(lit)) {
                continue;
            }
            if !unit_propagate(&mut state, lit, statistics, counters) {
                return Outcome::Unsatisfiable;
            }
        }
        if state.clauses.is_empty() {
            return Outcome::Satisfiable(state.assignment.iter().map(|(&v, &p)| if p { v } else { negate(v) }).collect());
        }
        if state.clauses.iter().any(Clause::is_empty) {
            return Outcome::Unsatisfiable;
        }
    }

    let literal = select_literal(&state.clauses, config.selection, counters);

    let first = search(&state, Some(literal), config, statistics, counters, start);
    match first {
        Outcome::Satisfiable(_) | Outcome::Timeout => first,
        Outcome::Unsatisfiable => {
            statistics.increment_backtrack_count();
            search(&state, Some(negate(literal)), config, statistics, counters, start)
        }
    }
}

/// Entry point used by the CLI's `solve --engine dpll`. Runs the recursive search on a dedicated
/// thread with an enlarged stack, joining it before returning.
pub fn solve(num_vars: usize, clauses: Vec<Clause>, config: DpllConfig) -> Outcome {
    let _ = num_vars;
    let builder = std::thread::Builder::new().stack_size(config.stack_size);
    let handle = builder
        .spawn(move || {
            let mut statistics = Statistics::new();
            let mut counters = VsidsLiteCounters::new();
            let state = DpllState {
                clauses,
                assignment: std::collections::HashMap::new(),
            };
            if state.clauses.iter().any(Clause::is_empty) {
                return Outcome::Unsatisfiable;
            }
            search(&state, None, &config, &mut statistics, &mut counters, Instant::now())
        })
        .expect("spawning the DPLL search thread");
    handle.join().expect("DPLL search thread panicked")
}

#[cfg(test)]
mod dpll_tests;
