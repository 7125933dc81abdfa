use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A propositional variable, always a positive index into `[1, N]`.
pub type Var = i32;

/// A signed literal; positive asserts the variable true, negative asserts it false.
pub type Lit = i32;

/// Returns the variable underlying a literal.
pub fn var_of(lit: Lit) -> Var {
    lit.abs()
}

/// Returns the complementary literal.
pub fn negate(lit: Lit) -> Lit {
    -lit
}

/*
An enum to store which solving procedure to run.
*/
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolverType {
    Dpll,
    Cdcl,
}

/*
An enum for the three DPLL branching heuristics. MOMs carries its `m` parameter; heuristics are
a tagged variant rather than a trait object hierarchy.
*/
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum LiteralSelection {
    JeroslowWang,
    Moms(u32),
    VsidsLite,
}

impl Default for LiteralSelection {
    fn default() -> Self {
        LiteralSelection::JeroslowWang
    }
}

/*
A three-valued read of a variable's current assignment.
*/
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Value {
    True,
    False,
    Unknown,
}

/*
A non-empty ordered collection of distinct literals. Tautologies (a variable and its negation
both present) are removed on construction.
*/
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Clause {
    pub literals: Vec<Lit>,
}

impl Clause {
    /// Builds a clause from raw literals, deduplicating and dropping tautologies.
    ///
    /// Returns `None` if the clause is a tautology (a variable and its negation both present).
    pub fn new(literals: Vec<Lit>) -> Option<Self> {
        let mut seen = HashMap::new();
        let mut deduped = Vec::new();
        for lit in literals {
            let v = var_of(lit);
            match seen.get(&v) {
                Some(&existing) if existing != lit => return None,
                Some(_) => continue,
                None => {
                    seen.insert(v, lit);
                    deduped.push(lit);
                }
            }
        }
        Some(Clause { literals: deduped })
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }
}

/*
Tags a clause reference by where it lives, so trail entries never own a `Clause` and the clause
manager is free to compact the learned vector without invalidating outstanding references (see
DESIGN.md "clause identity").
*/
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ClauseId {
    Original(usize),
    Learned(usize),
}

/*
Either a decision (the chosen literal opening a new level) or the clause that became unit and
forced the assignment.
*/
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Antecedent {
    Decision,
    Propagated(ClauseId),
}

impl Antecedent {
    pub fn is_decision(&self) -> bool {
        matches!(self, Antecedent::Decision)
    }

    pub fn clause_id(&self) -> Option<ClauseId> {
        match self {
            Antecedent::Decision => None,
            Antecedent::Propagated(id) => Some(*id),
        }
    }
}

/*
A single entry on the trail: the literal asserted, the decision level it was asserted at, and
why.
*/
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TrailEntry {
    pub lit: Lit,
    pub level: u32,
    pub antecedent: Antecedent,
}

/*
Counters surfaced to the CLI harness and to `log::debug!` progress lines: propagation/decision
counts plus the conflict/restart counts the CDCL driver needs.
*/
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    pub propagation_count: u64,
    pub decision_count: u64,
    pub backtrack_count: u64,
    pub conflict_count: u64,
    pub learned_clause_count: u64,
    pub restart_count: u64,
    pub reduction_count: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    pub fn increment_propagation_count(&mut self) {
        self.propagation_count += 1;
    }

    pub fn increment_decision_count(&mut self) {
        self.decision_count += 1;
    }

    pub fn increment_backtrack_count(&mut self) {
        self.backtrack_count += 1;
    }

    pub fn increment_conflict_count(&mut self) {
        self.conflict_count += 1;
    }

    pub fn increment_learned_clause_count(&mut self) {
        self.learned_clause_count += 1;
    }

    pub fn increment_restart_count(&mut self) {
        self.restart_count += 1;
    }

    pub fn increment_reduction_count(&mut self) {
        self.reduction_count += 1;
    }
}

/*
Luby-sequence restart scheduler. `update_conflicts_until_restart` is a direct recursive
implementation of the Luby recurrence `t_k`.
*/
#[derive(Clone, Debug)]
pub struct RestartData {
    pub restart_counter: i64,
    pub conflicts_until_restart: i64,
    pub base: i64,
    pub current_conflicts: i64,
}

impl RestartData {
    pub fn new(base: i64) -> Self {
        RestartData {
            restart_counter: 1,
            conflicts_until_restart: base,
            base,
            current_conflicts: 0,
        }
    }

    /// Advances to the Luby value for `restart_count`, recursing per the Luby recurrence:
    /// `t_k = 2^(i-1)` when `k = 2^i - 1`, else `t_k = t_(k - 2^(i-1) + 1)`.
    pub fn update_conflicts_until_restart(&mut self, restart_count: i64) {
        let fractional_k = (1.0 + restart_count as f64).log2();
        let k = fractional_k.ceil() as u32;
        if fractional_k.fract() == 0.0 {
            self.conflicts_until_restart = self.base * 2i64.pow(k - 1);
        } else {
            let index = restart_count - (2i64.pow(k) / 2) + 1;
            self.update_conflicts_until_restart(index);
        }
    }

    pub fn increment_restart_counter(&mut self) {
        self.restart_counter += 1;
    }

    pub fn increment_current_conflicts(&mut self) {
        self.current_conflicts += 1;
    }

    pub fn reset_current_conflicts(&mut self) {
        self.current_conflicts = 0;
    }

    pub fn should_restart(&self) -> bool {
        self.current_conflicts >= self.conflicts_until_restart
    }

    pub fn on_restart(&mut self) {
        self.increment_restart_counter();
        let counter = self.restart_counter;
        self.update_conflicts_until_restart(counter);
        self.reset_current_conflicts();
    }
}

#[cfg(test)]
mod data_structures_tests;
