use std::collections::HashSet;

use crate::clause_manager::ClauseManager;
use crate::clause_store::ClauseStore;
use crate::data_structures::{var_of, Clause, ClauseId, Lit, Var};
use crate::heuristic::Vsids;
use crate::trail::Trail;

/// A classified literal during resolution: which side of the current decision level it falls on.
enum Bucket {
    CurrentLevel,
    Lower,
}

fn classify_level(trail: &Trail, lit: Lit, decision_level: u32) -> (Bucket, u32) {
    let level = trail
        .entry_for(var_of(lit))
        .expect("conflict analysis literal must be assigned")
        .level;
    if level == decision_level {
        (Bucket::CurrentLevel, level)
    } else {
        (Bucket::Lower, level)
    }
}

/*
First-UIP conflict analysis. Resolves the conflicting clause back through
antecedents, walking the trail from most to least recent, until exactly one literal from the
current decision level remains -- the First Unique Implication Point.

Bumps VSIDS activity for every literal touched during resolution and clause activity for every
learned antecedent consulted, then decays both once, matching "activities are decayed once after
each complete analysis" and the clause manager's "bumped when they participate as an antecedent".
*/
pub fn analyze(
    conflict: ClauseId,
    store: &mut ClauseStore,
    trail: &Trail,
    vsids: &mut Vsids,
    clause_manager: &mut ClauseManager,
) -> (Clause, u32) {
    let decision_level = trail.current_level();
    let mut seen: HashSet<Var> = HashSet::new();
    let mut current: Vec<Lit> = Vec::new();
    let mut learned: Vec<Lit> = Vec::new();

    for &lit in &store.get(conflict).literals {
        let var = var_of(lit);
        if !seen.insert(var) {
            continue;
        }
        vsids.bump(var);
        match classify_level(trail, lit, decision_level) {
            (Bucket::CurrentLevel, _) => current.push(lit),
            (Bucket::Lower, _) => learned.push(lit),
        }
    }

    while current.len() > 1 {
        // 3a: the literal of `current` whose variable appears latest on the trail.
        let (pick_index, _) = current
            .iter()
            .enumerate()
            .map(|(i, &lit)| (i, trail.position_of(var_of(lit)).unwrap()))
            .max_by_key(|&(_, pos)| pos)
            .expect("current is non-empty by loop guard");
        let lit = current.remove(pick_index);
        let var = var_of(lit);

        let antecedent = trail
            .entry_for(var)
            .expect("resolved literal must be assigned")
            .antecedent;
        let reason_id = match antecedent.clause_id() {
            Some(id) => id,
            None => {
                // It was a decision; nothing further to resolve through. Put it back as the UIP.
                current.push(lit);
                break;
            }
        };
        clause_manager.bump(store, reason_id);
        let reason_literals = store.get(reason_id).literals.clone();

        for &reason_lit in &reason_literals {
            let reason_var = var_of(reason_lit);
            if reason_var == var || !seen.insert(reason_var) {
                continue;
            }
            vsids.bump(reason_var);
            match classify_level(trail, reason_lit, decision_level) {
                (Bucket::CurrentLevel, _) => current.push(reason_lit),
                (Bucket::Lower, _) => learned.push(reason_lit),
            }
        }
    }

    // `current` now holds exactly the First UIP literal.
    learned.extend(current);

    let mut dedup_seen = HashSet::new();
    learned.retain(|&lit| dedup_seen.insert(lit));

    vsids.decay();
    clause_manager.decay();

    let clause = Clause::new(learned).expect("resolution never reintroduces a tautology");
    let clause = minimize_if_large(clause, store, trail, &seen);

    let backjump_level = clause
        .literals
        .iter()
        .map(|&lit| trail.entry_for(var_of(lit)).unwrap().level)
        .filter(|&level| level < decision_level)
        .max()
        .unwrap_or(0);

    (clause, backjump_level)
}

/// Optional minimization for large learned clauses: drops a literal when its
/// negation is already implied by literals whose antecedents were consulted during analysis (i.e.
/// its variable and every variable of its antecedent are in `seen`). Only attempted above ~20
/// literals since the saving rarely matters below that and the check costs a clause-store lookup
/// per candidate literal.
pub fn minimize_if_large(clause: Clause, store: &ClauseStore, trail: &Trail, seen: &HashSet<Var>) -> Clause {
    const MINIMIZE_THRESHOLD: usize = 20;
    if clause.literals.len() <= MINIMIZE_THRESHOLD {
        return clause;
    }
    let mut kept = Vec::with_capacity(clause.literals.len());
    for &lit in &clause.literals {
        let var = var_of(lit);
        let redundant = match trail.entry_for(var).and_then(|e| e.antecedent.clause_id()) {
            Some(reason_id) => store
                .get(reason_id)
                .literals
                .iter()
                .all(|&l| var_of(l) == var || seen.contains(&var_of(l))),
            None => false,
        };
        if !redundant {
            kept.push(lit);
        }
    }
    if kept.is_empty() {
        clause
    } else {
        Clause::new(kept).unwrap_or(clause)
    }
}

#[cfg(test)]
mod conflict_analysis_tests;
