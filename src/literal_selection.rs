use crate::data_structures::{negate, var_of, Clause, LiteralSelection};
use crate::heuristic::VsidsLiteCounters;

/// Picks the next branching literal for DPLL according to the configured
/// heuristic. `clauses` holds only the currently live (non-satisfied) clauses.
pub fn select_literal(clauses: &[Clause], selection: LiteralSelection, counters: &VsidsLiteCounters) -> i32 {
    match selection {
        LiteralSelection::JeroslowWang => jeroslow_wang(clauses),
        LiteralSelection::Moms(m) => moms(clauses, m),
        LiteralSelection::VsidsLite => vsids_lite(clauses, counters),
    }
}

/// Jeroslow-Wang: scores each literal by `sum(2^-|clause|)` over clauses containing it, favoring
/// literals that appear in short clauses. Returns the literal, not the variable, with the highest
/// score.
fn jeroslow_wang(clauses: &[Clause]) -> i32 {
    let mut scores: std::collections::HashMap<i32, f64> = std::collections::HashMap::new();
    for clause in clauses {
        let weight = 2f64.powi(-(clause.len() as i32));
        for &lit in &clause.literals {
            *scores.entry(lit).or_insert(0.0) += weight;
        }
    }
    scores
        .into_iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(lit, _)| lit)
        .expect("caller only invokes selection when clauses remain")
}

/// MOMs(m): among the clauses of minimum size, scores each variable by
/// `(f(l) + f(-l)) * 2^m + f(l) * f(-l)`, where `f` counts occurrences restricted to the
/// minimum-size clauses. Returns the more frequent polarity.
fn moms(clauses: &[Clause], m: u32) -> i32 {
    let min_len = clauses
        .iter()
        .map(Clause::len)
        .min()
        .expect("caller only invokes selection when clauses remain");
    let smallest: Vec<&Clause> = clauses.iter().filter(|c| c.len() == min_len).collect();

    let mut pos_counts: std::collections::HashMap<i32, u64> = std::collections::HashMap::new();
    let mut neg_counts: std::collections::HashMap<i32, u64> = std::collections::HashMap::new();
    for clause in smallest {
        for &lit in &clause.literals {
            let var = var_of(lit);
            if lit > 0 {
                *pos_counts.entry(var).or_insert(0) += 1;
            } else {
                *neg_counts.entry(var).or_insert(0) += 1;
            }
        }
    }

    let mut all_vars: std::collections::HashSet<i32> = std::collections::HashSet::new();
    all_vars.extend(pos_counts.keys());
    all_vars.extend(neg_counts.keys());

    let (best_var, prefer_positive) = all_vars
        .into_iter()
        .map(|var| {
            let f_pos = *pos_counts.get(&var).unwrap_or(&0);
            let f_neg = *neg_counts.get(&var).unwrap_or(&0);
            let score = (f_pos + f_neg) * 2u64.pow(m) + f_pos * f_neg;
            (var, score, f_pos >= f_neg)
        })
        .max_by_key(|&(_, score, _)| score)
        .map(|(var, _, prefer_positive)| (var, prefer_positive))
        .expect("caller only invokes selection when clauses remain");

    if prefer_positive {
        best_var
    } else {
        negate(best_var)
    }
}

/// VSIDS-lite: the literal with the highest running bump count from unit propagations so far.
fn vsids_lite(clauses: &[Clause], counters: &VsidsLiteCounters) -> i32 {
    clauses
        .iter()
        .flat_map(|c| c.literals.iter().copied())
        .max_by_key(|&lit| counters.count(lit))
        .expect("caller only invokes selection when clauses remain")
}

#[cfg(test)]
mod literal_selection_tests;
