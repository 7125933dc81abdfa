use super::*;
use crate::data_structures::Clause;

fn clause(literals: &[i32]) -> Clause {
    Clause::new(literals.to_vec()).unwrap()
}

#[test]
fn add_original_and_get_round_trip() {
    let mut store = ClauseStore::new();
    let id = store.add_original(clause(&[1, 2, -3]));
    assert_eq!(store.get(id).literals, vec![1, 2, -3]);
}

#[test]
fn containing_indexes_by_literal_across_both_vectors() {
    let mut store = ClauseStore::new();
    let original = store.add_original(clause(&[1, 2]));
    let learned = store.add_learned(clause(&[1, -3]));
    let ids = store.containing(1);
    assert!(ids.contains(&original));
    assert!(ids.contains(&learned));
    assert!(store.containing(-3).contains(&learned));
    assert!(store.containing(99).is_empty());
}

#[test]
fn iter_all_yields_originals_before_learned() {
    let mut store = ClauseStore::new();
    store.add_original(clause(&[1]));
    store.add_learned(clause(&[2]));
    let ids: Vec<ClauseId> = store.iter_all().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![ClauseId::Original(0), ClauseId::Learned(0)]);
}

#[test]
fn reduce_keeps_protected_and_drops_the_rest() {
    let mut store = ClauseStore::new();
    store.add_original(clause(&[1, 2]));
    store.add_learned(clause(&[3, 4])); // index 0, low activity
    store.add_learned(clause(&[5, 6])); // index 1, protected despite low activity

    let remap = store.reduce(&[1], |i, _activity| i == 99); // keep predicate never true on its own
    assert_eq!(store.learned_count(), 1);
    assert_eq!(remap[0], None);
    assert_eq!(remap[1], Some(0));
    assert_eq!(store.get(ClauseId::Learned(0)).literals, vec![5, 6]);
}

#[test]
fn reduce_rebuilds_occurrence_index_for_original_clauses() {
    let mut store = ClauseStore::new();
    store.add_original(clause(&[1, 2]));
    store.add_learned(clause(&[2, 3]));
    store.reduce(&[], |_, _| false);
    assert_eq!(store.learned_count(), 0);
    assert!(store.containing(1).iter().any(|&id| id == ClauseId::Original(0)));
}
