use crate::clause_store::ClauseStore;
use crate::data_structures::ClauseId;

const RESCALE_THRESHOLD: f64 = 1e100;

/*
Learned-clause activity and periodic reduction. Mirrors the VSIDS rescale
trick in `heuristic::Vsids` but applied to clause activities instead of variable activities.
*/
#[derive(Clone, Debug)]
pub struct ClauseManager {
    bump_value: f64,
    decay_factor: f64,
    reduce_threshold: usize,
    keep_fraction: f64,
    keep_floor: usize,
}

impl ClauseManager {
    pub fn new(decay_factor: f64, reduce_threshold: usize, keep_fraction: f64, keep_floor: usize) -> Self {
        ClauseManager {
            bump_value: 1.0,
            decay_factor,
            reduce_threshold,
            keep_fraction,
            keep_floor,
        }
    }

    /// Bumps the activity of `id` if it is a learned clause; bumping an original clause's
    /// activity is a no-op since originals are never candidates for deletion.
    pub fn bump(&mut self, store: &mut ClauseStore, id: ClauseId) {
        if let ClauseId::Learned(i) = id {
            store.learned_activity[i] += self.bump_value;
            if store.learned_activity[i] > RESCALE_THRESHOLD {
                for a in store.learned_activity.iter_mut() {
                    *a /= RESCALE_THRESHOLD;
                }
                self.bump_value /= RESCALE_THRESHOLD;
            }
        }
    }

    /// Decays every learned clause's activity. Applied once per completed conflict analysis.
    pub fn decay(&mut self) {
        self.bump_value /= self.decay_factor;
    }

    pub fn should_reduce(&self, store: &ClauseStore) -> bool {
        store.learned_count() > self.reduce_threshold
    }

    /// Retains the top `keep_fraction` of learned clauses by descending activity (minimum
    /// `keep_floor`), never dropping a clause currently serving as an antecedent on the trail.
    /// Returns the remap from old learned index to new learned index so the caller can rewrite
    /// trail antecedents rather than leave them dangling after compaction.
    pub fn reduce(&mut self, store: &mut ClauseStore, protected: &[usize]) -> Vec<Option<usize>> {
        let count = store.learned_count();
        let keep_count = ((count as f64 * self.keep_fraction).ceil() as usize).max(self.keep_floor);

        let mut order: Vec<usize> = (0..count).collect();
        order.sort_by(|&a, &b| {
            store.learned_activity[b]
                .partial_cmp(&store.learned_activity[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let keep_rank: std::collections::HashSet<usize> =
            order.into_iter().take(keep_count).collect();

        store.reduce(protected, |i, _activity| keep_rank.contains(&i))
    }
}

#[cfg(test)]
mod clause_manager_tests;
