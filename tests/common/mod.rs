use cdcl_sat::data_structures::Clause;

/// Generates the pigeonhole formula PHP(pigeons, holes): every pigeon goes in some hole, and no
/// hole holds two pigeons. Unsatisfiable whenever `pigeons > holes`, a standard CDCL/DPLL
/// stress instance (grounded on the pigeonhole generator under the original source's
/// `PigeonHole_Problem` directory, reshaped here as a Rust test fixture rather than ported
/// line-for-line: variables are encoded `(pigeon - 1) * holes + hole`, 1-indexed).
pub fn pigeonhole(pigeons: usize, holes: usize) -> (usize, Vec<Clause>) {
    let var = |pigeon: usize, hole: usize| -> i32 { ((pigeon - 1) * holes + hole) as i32 };
    let mut clauses = Vec::new();

    for pigeon in 1..=pigeons {
        let literals: Vec<i32> = (1..=holes).map(|hole| var(pigeon, hole)).collect();
        clauses.push(Clause::new(literals).expect("pigeon-in-some-hole clause is never a tautology"));
    }

    for p1 in 1..=pigeons {
        for p2 in (p1 + 1)..=pigeons {
            for hole in 1..=holes {
                clauses.push(
                    Clause::new(vec![-var(p1, hole), -var(p2, hole)])
                        .expect("no-two-pigeons-share-a-hole clause is never a tautology"),
                );
            }
        }
    }

    (pigeons * holes, clauses)
}

/// Brute-force satisfiability check for small instances (used to validate the solvers' answers
/// against ground truth in property tests, never itself under test).
pub fn brute_force_sat(num_vars: usize, clauses: &[Clause]) -> bool {
    if num_vars > 20 {
        panic!("brute_force_sat is for small property-test instances only");
    }
    for assignment in 0..(1u32 << num_vars) {
        let satisfies_all = clauses.iter().all(|clause| {
            clause.literals.iter().any(|&lit| {
                let var = lit.unsigned_abs() as usize - 1;
                let value = (assignment >> var) & 1 == 1;
                if lit > 0 {
                    value
                } else {
                    !value
                }
            })
        });
        if satisfies_all {
            return true;
        }
    }
    false
}

/// Deterministic pseudo-random 3-SAT instance generator (xorshift, no external RNG dependency so
/// every run with the same seed sees the exact same formula).
pub fn random_3sat(num_vars: usize, num_clauses: usize, seed: u64) -> (usize, Vec<Clause>) {
    let mut state = seed.max(1);
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut clauses = Vec::with_capacity(num_clauses);
    while clauses.len() < num_clauses {
        let literals: Vec<i32> = (0..3)
            .map(|_| {
                let var = (next() as usize % num_vars) as i32 + 1;
                if next() % 2 == 0 {
                    var
                } else {
                    -var
                }
            })
            .collect();
        if let Some(clause) = Clause::new(literals) {
            clauses.push(clause);
        }
    }
    (num_vars, clauses)
}

/// Renders clauses as a DIMACS CNF string, for tests that exercise the parser end to end.
pub fn to_dimacs(num_vars: usize, clauses: &[Clause]) -> String {
    let mut out = format!("p cnf {} {}\n", num_vars, clauses.len());
    for clause in clauses {
        let rendered = clause
            .literals
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&rendered);
        out.push_str(" 0\n");
    }
    out
}
