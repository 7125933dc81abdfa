use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::data_structures::Var;
use crate::trail::Trail;

const RESCALE_THRESHOLD: f64 = 1e100;

/*
VSIDS (Variable State Independent Decaying Sum) branching heuristic plus phase saving.
Activities live in a dense `Vec` indexed by `var - 1` rather than a HashMap:
the variable range `[1, N]` is known up front from the DIMACS header/clause scan, so this avoids
hashing on every bump, which happens once per literal on every conflict.

Tie-breaking uses a caller-seeded `SmallRng`, never a global RNG, so repeated solves of the same
instance with the same seed make the same tie-break decisions.
*/
#[derive(Clone, Debug)]
pub struct Vsids {
    activity: Vec<f64>,
    bump_value: f64,
    decay_factor: f64,
    rng: SmallRng,
}

impl Vsids {
    pub fn new(num_vars: usize, decay_factor: f64, seed: u64) -> Self {
        Vsids {
            activity: vec![0.0; num_vars + 1],
            bump_value: 1.0,
            decay_factor,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn activity_of(&self, var: Var) -> f64 {
        self.activity[var as usize]
    }

    /// Bumps `var`'s activity by the current bump value, rescaling every activity (and the bump
    /// value itself) if the threshold is exceeded.
    pub fn bump(&mut self, var: Var) {
        self.activity[var as usize] += self.bump_value;
        if self.activity[var as usize] > RESCALE_THRESHOLD {
            for a in self.activity.iter_mut() {
                *a /= RESCALE_THRESHOLD;
            }
            self.bump_value /= RESCALE_THRESHOLD;
        }
    }

    /// Multiplies every activity by `decay_factor`. Applied once per completed conflict
    /// analysis, not per bump.
    pub fn decay(&mut self) {
        self.bump_value /= self.decay_factor;
    }

    /// Returns the unassigned variable with maximum activity, breaking ties uniformly at random
    /// via the seeded RNG. `None` if every variable is assigned.
    pub fn decide(&mut self, trail: &Trail, num_vars: usize) -> Option<Var> {
        let mut best: Vec<Var> = Vec::new();
        let mut best_activity = f64::NEG_INFINITY;
        for var in 1..=num_vars as Var {
            if trail.is_assigned(var) {
                continue;
            }
            let a = self.activity[var as usize];
            if a > best_activity {
                best_activity = a;
                best.clear();
                best.push(var);
            } else if a == best_activity {
                best.push(var);
            }
        }
        if best.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..best.len());
        Some(best[index])
    }

    /// Preferred polarity for `var`: its saved phase if one exists, else the default (false).
    pub fn polarity(&self, trail: &Trail, var: Var) -> bool {
        trail.saved_phase(var).unwrap_or(false)
    }
}

/*
VSIDS-lite for the DPLL branching path: a plain bump counter per literal,
incremented each time the literal appears in a unit propagation, no decay. Kept separate from
`Vsids` above since DPLL has no trail/decision-level machinery to hang true VSIDS off of.
*/
#[derive(Clone, Debug, Default)]
pub struct VsidsLiteCounters {
    counts: HashMap<i32, u64>,
}

impl VsidsLiteCounters {
    pub fn new() -> Self {
        VsidsLiteCounters::default()
    }

    pub fn bump(&mut self, lit: i32) {
        *self.counts.entry(lit).or_insert(0) += 1;
    }

    pub fn count(&self, lit: i32) -> u64 {
        self.counts.get(&lit).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod heuristic_tests;
