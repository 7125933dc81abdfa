use multimap::MultiMap;

use crate::data_structures::{Clause, ClauseId, Lit};

/*
Owns the original clause vector (read-only after ingest) and the learned-clause vector, plus a
literal-occurrence index (`MultiMap<i32, i32>` from literal to owning clause ids) rather than
two-watched-literals; simpler to reason about, at the cost of rescanning more clauses per
propagation step.
*/
#[derive(Clone, Debug, Default)]
pub struct ClauseStore {
    original: Vec<Clause>,
    learned: Vec<Clause>,
    pub learned_activity: Vec<f64>,
    occurrences: MultiMap<Lit, ClauseId>,
}

impl ClauseStore {
    pub fn new() -> Self {
        ClauseStore::default()
    }

    /// Registers an original clause. A clause that reduces to empty (after tautology removal
    /// upstream, this only happens for a literally empty input clause) signals the formula is
    /// trivially unsatisfiable; the caller checks `clause.is_empty()` on the returned id.
    pub fn add_original(&mut self, clause: Clause) -> ClauseId {
        let id = ClauseId::Original(self.original.len());
        for &lit in &clause.literals {
            self.occurrences.insert(lit, id);
        }
        self.original.push(clause);
        id
    }

    pub fn add_learned(&mut self, clause: Clause) -> ClauseId {
        let id = ClauseId::Learned(self.learned.len());
        for &lit in &clause.literals {
            self.occurrences.insert(lit, id);
        }
        self.learned.push(clause);
        self.learned_activity.push(1.0);
        id
    }

    pub fn get(&self, id: ClauseId) -> &Clause {
        match id {
            ClauseId::Original(i) => &self.original[i],
            ClauseId::Learned(i) => &self.learned[i],
        }
    }

    pub fn original_clauses(&self) -> &[Clause] {
        &self.original
    }

    pub fn learned_clauses(&self) -> &[Clause] {
        &self.learned
    }

    pub fn learned_count(&self) -> usize {
        self.learned.len()
    }

    /// Clause ids (original and learned) containing `lit`.
    pub fn containing(&self, lit: Lit) -> &[ClauseId] {
        self.occurrences
            .get_vec(&lit)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Yields originals then learneds, in that order.
    pub fn iter_all(&self) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.original
            .iter()
            .enumerate()
            .map(|(i, c)| (ClauseId::Original(i), c))
            .chain(
                self.learned
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (ClauseId::Learned(i), c)),
            )
    }

    /// Compacts the learned vector, keeping only clauses for which `keep(index, activity)` is
    /// true, except that indices in `protect` (clauses currently serving as an antecedent on the
    /// trail) are never dropped. Returns the remapping from old learned index to new learned
    /// index, so the caller can rewrite trail antecedents.
    pub fn reduce(
        &mut self,
        protect: &[usize],
        mut keep: impl FnMut(usize, f64) -> bool,
    ) -> Vec<Option<usize>> {
        let mut remap = vec![None; self.learned.len()];
        let mut new_learned = Vec::new();
        let mut new_activity = Vec::new();
        let mut new_occurrences = MultiMap::new();

        for (i, clause) in self.learned.iter().enumerate() {
            let protected = protect.contains(&i);
            if protected || keep(i, self.learned_activity[i]) {
                let new_index = new_learned.len();
                remap[i] = Some(new_index);
                for &lit in &clause.literals {
                    new_occurrences.insert(lit, ClauseId::Learned(new_index));
                }
                new_learned.push(clause.clone());
                new_activity.push(self.learned_activity[i]);
            }
        }

        for (i, clause) in self.original.iter().enumerate() {
            for &lit in &clause.literals {
                new_occurrences.insert(lit, ClauseId::Original(i));
            }
        }

        self.learned = new_learned;
        self.learned_activity = new_activity;
        self.occurrences = new_occurrences;
        remap
    }
}

#[cfg(test)]
mod clause_store_tests;
