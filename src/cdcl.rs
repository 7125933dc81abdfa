use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::debug;

use crate::clause_manager::ClauseManager;
use crate::clause_store::ClauseStore;
use crate::conflict_analysis;
use crate::data_structures::{negate, var_of, Antecedent, Clause, RestartData, Statistics, Value, Var};
use crate::heuristic::Vsids;
use crate::propagate::{enqueue_from, propagate};
use crate::trail::Trail;

/// Final verdict of a solving run. Timeout is a normal, successful return,
/// not an error -- `error::SolverError` never represents it.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Satisfiable(Vec<i32>),
    Unsatisfiable,
    Timeout,
}

#[derive(Clone, Debug)]
pub struct CdclConfig {
    pub decay_factor: f64,
    pub restart_base: i64,
    pub reduce_threshold: usize,
    pub keep_fraction: f64,
    pub keep_floor: usize,
    pub seed: u64,
    pub deadline: Option<Duration>,
}

impl Default for CdclConfig {
    fn default() -> Self {
        CdclConfig {
            decay_factor: 0.95,
            restart_base: 100,
            reduce_threshold: 2000,
            keep_fraction: 0.5,
            keep_floor: 200,
            seed: 0,
            deadline: None,
        }
    }
}

/*
The CDCL driver loop: propagate to a fixed point, analyze any conflict found,
backjump, and repeat; decide a new literal whenever propagation reaches a fixed point without
conflict and variables remain unassigned. An explicit iterative loop over the trail: plain
CDCL backjumps directly via `Trail::backtrack_to`, so there is no decision tree to cache and
restore (see DESIGN.md "driver loop").

`degenerate_backjump` reproduces a known-bad reference variant: when set, every conflict
backjumps all the way to level 0 regardless of the computed backjump
level. This throws away search progress and is kept only as a documented regression for tests that
exercise the difference against the real solver, never used by `solve`.
*/
pub struct Cdcl {
    store: ClauseStore,
    trail: Trail,
    vsids: Vsids,
    clause_manager: ClauseManager,
    restart: RestartData,
    statistics: Statistics,
    num_vars: usize,
    degenerate_backjump: bool,
}

impl Cdcl {
    pub fn new(num_vars: usize, clauses: Vec<Clause>, config: CdclConfig) -> Result<Self, Outcome> {
        Self::build(num_vars, clauses, config, false)
    }

    /// Builds the degenerate reference variant described above.
    pub fn new_degenerate(num_vars: usize, clauses: Vec<Clause>, config: CdclConfig) -> Result<Self, Outcome> {
        Self::build(num_vars, clauses, config, true)
    }

    fn build(
        num_vars: usize,
        clauses: Vec<Clause>,
        config: CdclConfig,
        degenerate_backjump: bool,
    ) -> Result<Self, Outcome> {
        let mut store = ClauseStore::new();
        let mut trail = Trail::new();
        let mut units = Vec::new();
        for clause in clauses {
            if clause.is_empty() {
                return Err(Outcome::Unsatisfiable);
            }
            if clause.len() == 1 {
                units.push(clause.literals[0]);
            }
            store.add_original(clause);
        }
        for lit in units {
            if trail.is_assigned(var_of(lit)) {
                if trail.value(lit) == Value::False {
                    return Err(Outcome::Unsatisfiable);
                }
                continue;
            }
            trail
                .assign(lit, 0, Antecedent::Decision)
                .expect("just checked var is unassigned");
        }
        Ok(Cdcl {
            store,
            trail,
            vsids: Vsids::new(num_vars, config.decay_factor, config.seed),
            clause_manager: ClauseManager::new(
                config.decay_factor,
                config.reduce_threshold,
                config.keep_fraction,
                config.keep_floor,
            ),
            restart: RestartData::new(config.restart_base),
            statistics: Statistics::new(),
            num_vars,
            degenerate_backjump,
        })
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Exposes the trail's final state, for tests checking assignment-structure invariants.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Exposes the clause store (originals plus everything learned so far), for tests checking
    /// that learned clauses are genuine logical consequences of the input.
    pub fn store(&self) -> &ClauseStore {
        &self.store
    }

    pub fn solve(&mut self, deadline: Option<Duration>) -> Outcome {
        let start = Instant::now();
        let mut queue: VecDeque<i32> = self.trail.entries().iter().map(|e| e.lit).collect();

        loop {
            if let Some(d) = deadline {
                if start.elapsed() > d {
                    return Outcome::Timeout;
                }
            }

            match propagate(&self.store, &mut self.trail, &mut self.vsids, &mut self.statistics, &mut queue) {
                Some(conflict) => {
                    self.statistics.increment_conflict_count();
                    if self.trail.current_level() == 0 {
                        return Outcome::Unsatisfiable;
                    }

                    let (learned, computed_level) =
                        conflict_analysis::analyze(conflict, &mut self.store, &self.trail, &mut self.vsids, &mut self.clause_manager);
                    let target_level = if self.degenerate_backjump { 0 } else { computed_level };

                    let asserting_lit = *learned
                        .literals
                        .iter()
                        .find(|&&lit| self.trail.entry_for(var_of(lit)).map(|e| e.level) == Some(self.trail.current_level()))
                        .unwrap_or(&learned.literals[0]);

                    self.trail.backtrack_to(target_level);
                    self.statistics.increment_backtrack_count();

                    let id = self.store.add_learned(learned);
                    self.statistics.increment_learned_clause_count();

                    queue.clear();
                    if !self.trail.is_assigned(var_of(asserting_lit)) {
                        self.trail
                            .assign(asserting_lit, self.trail.current_level(), Antecedent::Propagated(id))
                            .expect("just checked the variable is unassigned");
                        queue.push_back(asserting_lit);
                    }

                    self.restart.increment_current_conflicts();
                    if self.clause_manager.should_reduce(&self.store) {
                        let protected: Vec<usize> = self
                            .trail
                            .entries()
                            .iter()
                            .filter_map(|e| match e.antecedent.clause_id() {
                                Some(crate::data_structures::ClauseId::Learned(i)) => Some(i),
                                _ => None,
                            })
                            .collect();
                        let remap = self.clause_manager.reduce(&mut self.store, &protected);
                        self.trail.remap_learned_antecedents(&remap);
                        self.statistics.increment_reduction_count();
                    }
                    if self.restart.should_restart() {
                        debug!("restarting after {} conflicts", self.restart.current_conflicts);
                        self.trail.backtrack_to(0);
                        self.restart.on_restart();
                        self.statistics.increment_restart_count();
                        queue = self.trail.entries().iter().map(|e| e.lit).collect();
                    }
                }
                None => {
                    if let Some(var) = self.vsids.decide(&self.trail, self.num_vars) {
                        let polarity = self.vsids.polarity(&self.trail, var);
                        let lit: i32 = if polarity { var } else { negate(var) };
                        self.trail.push_decision_level();
                        self.statistics.increment_decision_count();
                        let from = self.trail.len();
                        self.trail
                            .assign(lit, self.trail.current_level(), Antecedent::Decision)
                            .expect("decided variable must be unassigned");
                        queue.clear();
                        enqueue_from(&self.trail, from, &mut queue);
                    } else {
                        return Outcome::Satisfiable(self.model());
                    }
                }
            }
        }
    }

    fn model(&self) -> Vec<i32> {
        (1..=self.num_vars as Var)
            .map(|var| match self.trail.value(var) {
                Value::True => var,
                _ => negate(var),
            })
            .collect()
    }
}

/// Convenience entry point used by the CLI's `solve --engine cdcl`.
pub fn solve(num_vars: usize, clauses: Vec<Clause>, config: CdclConfig) -> Outcome {
    match Cdcl::new(num_vars, clauses, config.clone()) {
        Ok(mut engine) => engine.solve(config.deadline),
        Err(outcome) => outcome,
    }
}

/// The degenerate reference variant: always backjumps to level 0. See the module-level doc
/// comment. Exposed for tests comparing against the real solver, never wired into the CLI.
pub fn solve_degenerate(num_vars: usize, clauses: Vec<Clause>, config: CdclConfig) -> Outcome {
    match Cdcl::new_degenerate(num_vars, clauses, config.clone()) {
        Ok(mut engine) => engine.solve(config.deadline),
        Err(outcome) => outcome,
    }
}

#[cfg(test)]
mod cdcl_tests;
