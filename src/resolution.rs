use std::collections::HashSet;

use crate::data_structures::Clause;

/*
Resolves two clauses' literal lists over `pivot`: unions them, drops the pivot and its complement,
and rejects the result if it would be a tautology (a variable and its negation both survive).
Plain propositional resolution, with no quantifier prefix to respect.
*/
pub fn resolve(literals_1: &[i32], literals_2: &[i32], pivot: i32) -> Option<Vec<i32>> {
    let mut resolved: HashSet<i32> = literals_1.iter().copied().collect();
    resolved.extend(literals_2.iter().copied());
    resolved.remove(&pivot);
    resolved.remove(&-pivot);

    let mut checked = HashSet::new();
    for &lit in &resolved {
        if checked.contains(&-lit) {
            return None;
        }
        checked.insert(lit);
    }
    Some(resolved.into_iter().collect())
}

/*
A naive all-pairs resolution prover used as a test oracle: this exists to cross-check the
CDCL/DPLL result on small instances, not as a production solving path. Saturates the clause
set with all pairwise resolvents, one pivot variable at a time, until
either the empty clause is derived (the formula is unsatisfiable) or a fixed point is reached with
no empty clause (the formula is satisfiable by resolution's completeness) or `clause_cap` is
exceeded, in which case the result is inconclusive rather than looping unboundedly on large inputs.
*/
pub fn naive_resolution_refutation(clauses: &[Clause], num_vars: i32, clause_cap: usize) -> Option<bool> {
    let mut set: HashSet<Vec<i32>> = clauses
        .iter()
        .map(|c| {
            let mut literals = c.literals.clone();
            literals.sort_unstable();
            literals
        })
        .collect();

    loop {
        if set.iter().any(|c| c.is_empty()) {
            return Some(true);
        }
        if set.len() > clause_cap {
            return None;
        }

        let current: Vec<Vec<i32>> = set.iter().cloned().collect();
        let mut derived_any = false;

        for var in 1..=num_vars {
            let positive: Vec<&Vec<i32>> = current.iter().filter(|c| c.contains(&var)).collect();
            let negative: Vec<&Vec<i32>> = current.iter().filter(|c| c.contains(&-var)).collect();
            for p in &positive {
                for n in &negative {
                    if let Some(resolvent) = resolve(p, n, var) {
                        let mut sorted = resolvent;
                        sorted.sort_unstable();
                        if set.insert(sorted) {
                            derived_any = true;
                        }
                    }
                    if set.len() > clause_cap {
                        return None;
                    }
                }
            }
        }

        if !derived_any {
            return Some(false);
        }
    }
}

#[cfg(test)]
mod resolution_tests;
