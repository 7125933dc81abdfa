use std::collections::VecDeque;

use crate::clause_store::ClauseStore;
use crate::data_structures::{negate, var_of, Antecedent, Clause, ClauseId, Lit, Statistics, Value};
use crate::heuristic::Vsids;
use crate::trail::Trail;

/// Classification of a clause under the current assignment.
enum ClauseState {
    Satisfied,
    Conflicting,
    Unit(Lit),
    Pending,
}

fn classify(clause: &Clause, trail: &Trail) -> ClauseState {
    let mut unassigned = None;
    let mut unassigned_count = 0;
    for &lit in &clause.literals {
        match trail.value(lit) {
            Value::True => return ClauseState::Satisfied,
            Value::False => continue,
            Value::Unknown => {
                unassigned_count += 1;
                unassigned = Some(lit);
            }
        }
    }
    match unassigned_count {
        0 => ClauseState::Conflicting,
        1 => ClauseState::Unit(unassigned.unwrap()),
        _ => ClauseState::Pending,
    }
}

/*
Unit propagation. Repeatedly sweeps the clauses touched by the most recently
assigned literals until a fixed point or a conflict. A clause is "touched" by an assignment to
`lit` when it contains `-lit` (the assignment can only turn such a clause unit or conflicting, or
leave it pending/satisfied); clauses containing `lit` itself are already satisfied and need no
further attention, which is exactly what the occurrence-list lookup short-circuits on.

Returns the first conflicting clause discovered, if any. On encountering it, bumps VSIDS activity
for every variable in the clause before returning, per 4.3's "on encountering a conflict: bump
activity of every variable in the clause".
*/
pub fn propagate(
    clauses: &ClauseStore,
    trail: &mut Trail,
    vsids: &mut Vsids,
    statistics: &mut Statistics,
    queue: &mut VecDeque<Lit>,
) -> Option<ClauseId> {
    while let Some(lit) = queue.pop_front() {
        let touched = clauses.containing(negate(lit)).to_vec();
        for id in touched {
            let clause = clauses.get(id);
            match classify(clause, trail) {
                ClauseState::Satisfied | ClauseState::Pending => continue,
                ClauseState::Conflicting => {
                    for &l in &clause.literals {
                        vsids.bump(var_of(l));
                    }
                    return Some(id);
                }
                ClauseState::Unit(unit_lit) => {
                    statistics.increment_propagation_count();
                    trail
                        .assign(unit_lit, trail.current_level(), Antecedent::Propagated(id))
                        .expect("propagator derived a literal for an already-assigned variable");
                    vsids.bump(var_of(unit_lit));
                    queue.push_back(unit_lit);
                }
            }
        }
    }
    None
}

/// Seeds the propagation queue with every literal already on the trail at `from_index` and
/// beyond (used after a decision, where the queue starts with just the decided literal).
pub fn enqueue_from(trail: &Trail, from_index: usize, queue: &mut VecDeque<Lit>) {
    for entry in trail.entries()[from_index..].iter() {
        queue.push_back(entry.lit);
    }
}

#[cfg(test)]
mod propagate_tests;
