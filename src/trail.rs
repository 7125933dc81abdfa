use std::collections::HashMap;

use crate::data_structures::{var_of, Antecedent, ClauseId, Lit, TrailEntry, Value, Var};

/*
The trail-based assignment. `assignment` gives O(1) access
to a variable's current value and the trail entry that put it there; `trail` is the chronological
record the conflict analyzer and clause manager walk.

Phase saving lives here too: `backtrack_to` records each popped variable's last value before
clearing it, so the heuristic engine can offer it back as the preferred polarity.
*/
#[derive(Clone, Debug, Default)]
pub struct Trail {
    trail: Vec<TrailEntry>,
    assignment: HashMap<Var, TrailEntry>,
    saved_phase: HashMap<Var, bool>,
    decision_level: u32,
}

/// Raised when `assign` is called for a variable that already has a value. A bug in the
/// propagator or driver, never a legitimate runtime outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyAssigned(pub Var);

impl Trail {
    pub fn new() -> Self {
        Trail::default()
    }

    pub fn current_level(&self) -> u32 {
        self.decision_level
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    pub fn entries(&self) -> &[TrailEntry] {
        &self.trail
    }

    /// Position of `var`'s assignment on the trail, used by the conflict analyzer to find the
    /// literal asserted latest among a set of candidates.
    pub fn position_of(&self, var: Var) -> Option<usize> {
        self.trail.iter().position(|e| var_of(e.lit) == var)
    }

    pub fn value(&self, lit: Lit) -> Value {
        match self.assignment.get(&var_of(lit)) {
            None => Value::Unknown,
            Some(entry) if entry.lit == lit => Value::True,
            Some(_) => Value::False,
        }
    }

    pub fn is_assigned(&self, var: Var) -> bool {
        self.assignment.contains_key(&var)
    }

    pub fn entry_for(&self, var: Var) -> Option<&TrailEntry> {
        self.assignment.get(&var)
    }

    pub fn saved_phase(&self, var: Var) -> Option<bool> {
        self.saved_phase.get(&var).copied()
    }

    pub fn push_decision_level(&mut self) {
        self.decision_level += 1;
    }

    /// Assigns `lit` true at `level` with the given antecedent. Precondition: `var_of(lit)` is
    /// currently unassigned.
    pub fn assign(
        &mut self,
        lit: Lit,
        level: u32,
        antecedent: Antecedent,
    ) -> Result<(), AlreadyAssigned> {
        let var = var_of(lit);
        if self.assignment.contains_key(&var) {
            return Err(AlreadyAssigned(var));
        }
        let entry = TrailEntry {
            lit,
            level,
            antecedent,
        };
        self.trail.push(entry);
        self.assignment.insert(var, entry);
        Ok(())
    }

    /// Rewrites every trail entry's `Antecedent::Propagated(ClauseId::Learned(old))` through
    /// `remap` (as produced by `ClauseStore::reduce`/`ClauseManager::reduce`). A learned clause
    /// that survives compaction can still move to a new index; every trail entry (and decision,
    /// which has no antecedent to rewrite) must track that move or a later lookup resolves
    /// through the wrong clause or panics on an out-of-bounds index. A clause that was dropped
    /// (`remap[old] == None`) can only happen for a clause the caller already protected from
    /// deletion, so it never appears as an antecedent still on the trail.
    pub fn remap_learned_antecedents(&mut self, remap: &[Option<usize>]) {
        for entry in self.trail.iter_mut() {
            if let Antecedent::Propagated(ClauseId::Learned(old)) = entry.antecedent {
                let new = remap[old].expect("a reduced clause must not be a live antecedent");
                entry.antecedent = Antecedent::Propagated(ClauseId::Learned(new));
            }
        }
        for entry in self.assignment.values_mut() {
            if let Antecedent::Propagated(ClauseId::Learned(old)) = entry.antecedent {
                let new = remap[old].expect("a reduced clause must not be a live antecedent");
                entry.antecedent = Antecedent::Propagated(ClauseId::Learned(new));
            }
        }
    }

    /// Pops every trail entry with `level > target`, clearing the assignment and recording the
    /// saved phase for each popped variable.
    pub fn backtrack_to(&mut self, target: u32) {
        while let Some(last) = self.trail.last() {
            if last.level <= target {
                break;
            }
            let entry = self.trail.pop().unwrap();
            let var = var_of(entry.lit);
            self.saved_phase.insert(var, entry.lit > 0);
            self.assignment.remove(&var);
        }
        self.decision_level = target;
    }
}

#[cfg(test)]
mod trail_tests;
