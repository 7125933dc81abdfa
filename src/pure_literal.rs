use crate::data_structures::{negate, var_of, Clause};

/*
Pure-literal elimination for the DPLL search: a literal is pure when its complement occurs in
zero of the *currently live* clauses. Tracked with two occurrence sets (seen-positive,
seen-negative) rather than a single occurrence count, since a count can be nonzero for a
complement that has already been satisfied away and no longer constrains anything.
*/
pub fn find_pure_literals(clauses: &[Clause]) -> Vec<i32> {
    let mut seen_positive = std::collections::HashSet::new();
    let mut seen_negative = std::collections::HashSet::new();
    for clause in clauses {
        for &lit in &clause.literals {
            if lit > 0 {
                seen_positive.insert(var_of(lit));
            } else {
                seen_negative.insert(var_of(lit));
            }
        }
    }
    let mut pure = Vec::new();
    for &var in seen_positive.iter() {
        if !seen_negative.contains(&var) {
            pure.push(var);
        }
    }
    for &var in seen_negative.iter() {
        if !seen_positive.contains(&var) {
            pure.push(negate(var));
        }
    }
    pure
}

#[cfg(test)]
mod pure_literal_tests;
