//! Behavioural properties of `ConsistentHash`.
//!
//! Covers empty and single-node rings, remapping bounds under membership
//! changes, distinctness of failover lists, load balance, determinism under
//! concurrency and idempotence.

use corelib::topology::relative_std_dev;
use corelib::{ConsistentHash, HashAlgorithm, Ownership};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

fn nodes(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("10.0.{}.{}:11211", i / 256, i % 256)).collect()
}

fn keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key-{}", i)).collect()
}

fn ring_of(members: &[String]) -> ConsistentHash<String> {
    let ring = ConsistentHash::new();
    ring.add_nodes(members.iter().cloned());
    ring
}

fn assignment(ring: &ConsistentHash<String>, keys: &[String]) -> HashMap<String, String> {
    keys.iter()
        .map(|k| (k.clone(), ring.get_node_for_key(k).unwrap()))
        .collect()
}

// ============================================================================
// Empty and single-node rings
// ============================================================================

#[test]
fn test_empty_ring_returns_nothing() {
    let ring: ConsistentHash<String> = ConsistentHash::new();
    for key in keys(20) {
        assert_eq!(ring.get_node_for_key(&key), None);
        for n in [0, 1, 5, 1000] {
            assert!(ring.get_nodes_for_key(&key, n).is_empty());
        }
    }
}

#[test]
fn test_single_node_owns_everything() {
    let ring = ConsistentHash::new();
    ring.add_node("A".to_string());
    for key in keys(200) {
        assert_eq!(ring.get_node_for_key(&key).as_deref(), Some("A"));
        assert_eq!(ring.get_nodes_for_key(&key, 100), vec!["A".to_string()]);
    }
}

#[test]
fn test_removal_restores_empty_behaviour() {
    let ring = ConsistentHash::new();
    ring.add_node("A".to_string());
    assert!(ring.remove_node(&"A".to_string()));

    assert!(ring.is_empty());
    assert_eq!(ring.get_node_for_key("key"), None);
    assert!(ring.get_nodes_for_key("key", 3).is_empty());
    assert_eq!(ring.snapshot().position_count(), 0);
}

// ============================================================================
// Stability under membership changes
// ============================================================================

#[test]
fn test_removing_unrelated_node_keeps_assignment() {
    let members = nodes(10);
    let keys = keys(2000);
    let ring = ring_of(&members);
    let before = assignment(&ring, &keys);

    let removed = &members[3];
    ring.remove_node(removed);
    let after = assignment(&ring, &keys);

    for key in &keys {
        if &before[key] != removed {
            assert_eq!(before[key], after[key], "{} moved without cause", key);
        } else {
            assert_ne!(&after[key], removed);
        }
    }
}

#[test]
fn test_adding_node_only_moves_keys_onto_it() {
    let members = nodes(10);
    let keys = keys(2000);
    let ring = ring_of(&members);
    let before = assignment(&ring, &keys);

    let joined = "10.1.0.1:11211".to_string();
    ring.add_node(joined.clone());
    let after = assignment(&ring, &keys);

    let moved: Vec<_> = keys.iter().filter(|k| before[*k] != after[*k]).collect();
    assert!(!moved.is_empty());
    for key in &moved {
        assert_eq!(after[*key], joined);
    }
    // Roughly 1/11 of the keys should move; allow a generous margin.
    assert!(moved.len() < keys.len() / 5, "{} keys moved", moved.len());
}

#[test]
fn test_failover_list_is_stable_for_unaffected_keys() {
    let members = nodes(6);
    let ring = ring_of(&members);
    let key = "session:1234";

    let list = ring.get_nodes_for_key(key, 3);
    let outsider = members.iter().find(|m| !list.contains(m)).unwrap().clone();
    ring.remove_node(&outsider);

    assert_eq!(ring.get_nodes_for_key(key, 3), list);
}

#[test]
fn test_failover_promotes_next_node() {
    let ring = ring_of(&nodes(5));
    let key = "order:77";
    let list = ring.get_nodes_for_key(key, 5);

    ring.remove_node(&list[0]);
    assert_eq!(ring.get_node_for_key(key), Some(list[1].clone()));
    assert_eq!(ring.get_nodes_for_key(key, 4), list[1..].to_vec());
}

// ============================================================================
// Distinctness
// ============================================================================

#[test]
fn test_nodes_for_key_are_distinct_prefix() {
    let ring = ring_of(&nodes(7));
    for key in keys(300) {
        let all = ring.get_nodes_for_key(&key, 7);
        assert_eq!(all.len(), 7);
        assert_eq!(all.iter().collect::<HashSet<_>>().len(), 7);
        assert_eq!(Some(&all[0]), ring.get_node_for_key(&key).as_ref());

        for n in 0..=9 {
            let prefix = ring.get_nodes_for_key(&key, n);
            assert_eq!(prefix.len(), n.min(7));
            assert_eq!(prefix[..], all[..n.min(7)]);
        }
    }
}

// ============================================================================
// Distribution balance
// ============================================================================

fn key_share_rsd(node_count: usize, keys_per_node: usize) -> f64 {
    let ring = ring_of(&nodes(node_count));
    let mut counts: HashMap<String, usize> = nodes(node_count).into_iter().map(|n| (n, 0)).collect();
    for key in keys(node_count * keys_per_node) {
        *counts.get_mut(&ring.get_node_for_key(&key).unwrap()).unwrap() += 1;
    }
    relative_std_dev(counts.values().map(|&c| c as f64))
}

#[test]
fn test_balance_small_cluster() {
    let rsd = key_share_rsd(3, 10_000);
    assert!(rsd <= 0.5, "relative std dev {} too high", rsd);
}

#[test]
fn test_balance_medium_cluster() {
    let rsd = key_share_rsd(50, 1_000);
    assert!(rsd <= 0.5, "relative std dev {} too high", rsd);
}

#[test]
fn test_balance_large_cluster() {
    let rsd = key_share_rsd(1000, 100);
    assert!(rsd <= 0.5, "relative std dev {} too high", rsd);
}

#[test]
fn test_ownership_balance_with_sip13() {
    let ring = ConsistentHash::builder()
        .with_algorithm(HashAlgorithm::Sip13)
        .build()
        .unwrap();
    ring.add_nodes(nodes(100));
    let ownership = Ownership::of(&ring.snapshot());
    assert_eq!(ownership.shares().len(), 100);
    assert!(ownership.relative_std_dev() <= 0.5);
}

// ============================================================================
// Determinism and concurrency
// ============================================================================

#[test]
fn test_independent_rings_agree() {
    let members = nodes(20);
    let a = ring_of(&members);

    let mut reversed = members.clone();
    reversed.reverse();
    let b = ConsistentHash::new();
    for m in reversed {
        b.add_node(m);
    }

    let keys = keys(500);
    assert_eq!(assignment(&a, &keys), assignment(&b, &keys));
}

#[test]
fn test_concurrent_readers_see_stable_answers() {
    let ring = ring_of(&nodes(8));
    let keys = keys(200);
    let expected = assignment(&ring, &keys);

    crossbeam::scope(|s| {
        for _ in 0..8 {
            s.spawn(|_| {
                for _ in 0..20 {
                    for key in &keys {
                        assert_eq!(ring.get_node_for_key(key).as_ref(), Some(&expected[key]));
                    }
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn test_readers_never_observe_partial_updates() {
    let members = nodes(4);
    let ring = ring_of(&members);
    let extra = "10.9.9.9:11211".to_string();
    let done = AtomicBool::new(false);

    crossbeam::scope(|s| {
        for _ in 0..4 {
            s.spawn(|_| {
                while !done.load(Ordering::Relaxed) {
                    let snapshot = ring.snapshot();
                    let count = snapshot.node_count();
                    assert!(count == 4 || count == 5);
                    assert_eq!(snapshot.point_count(), count * 160);
                    let list = snapshot.locate_n(b"probe", 10);
                    assert_eq!(list.len(), count);
                }
            });
        }

        s.spawn(|_| {
            for _ in 0..50 {
                ring.add_node(extra.clone());
                ring.remove_node(&extra);
            }
            done.store(true, Ordering::Relaxed);
        });
    })
    .unwrap();

    assert_eq!(ring.node_count(), 4);
}

#[test]
fn test_rings_are_independent() {
    let a = ring_of(&nodes(3));
    let b: ConsistentHash<String> = ConsistentHash::new();
    assert_eq!(a.node_count(), 3);
    assert!(b.is_empty());
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_double_add_matches_single_add() {
    let members = nodes(5);
    let keys = keys(500);

    let once = ring_of(&members);
    let twice = ring_of(&members);
    twice.add_node(members[0].clone());
    twice.add_nodes(members.iter().cloned());

    assert_eq!(assignment(&once, &keys), assignment(&twice, &keys));
    assert_eq!(once.snapshot().point_count(), twice.snapshot().point_count());
}

#[test]
fn test_removing_unknown_node_is_noop() {
    let members = nodes(5);
    let keys = keys(500);
    let ring = ring_of(&members);
    let before = assignment(&ring, &keys);

    assert!(!ring.remove_node(&"never-added".to_string()));
    assert_eq!(assignment(&ring, &keys), before);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: lookups return distinct nodes, as many as exist up to `count`
    #[test]
    fn prop_nodes_for_key_distinct(
        node_count in 0usize..12,
        key in ".*",
        count in 0usize..20,
    ) {
        let ring = ConsistentHash::builder().with_vnodes(16).build().unwrap();
        ring.add_nodes(nodes(node_count));

        let found = ring.get_nodes_for_key(&key, count);
        prop_assert_eq!(found.len(), count.min(node_count));
        prop_assert_eq!(found.iter().collect::<HashSet<_>>().len(), found.len());
        if count > 0 {
            prop_assert_eq!(found.first().cloned(), ring.get_node_for_key(&key));
        }
    }

    /// Property: same key always returns same node
    #[test]
    fn prop_deterministic_mapping(
        node_count in 1usize..12,
        key in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let ring = ConsistentHash::builder().with_vnodes(16).build().unwrap();
        ring.add_nodes(nodes(node_count));

        let first = ring.get_node_for_key(&key);
        prop_assert!(first.is_some());
        prop_assert_eq!(ring.get_node_for_key(&key), first.clone());
        prop_assert_eq!(ring.get_nodes_for_key(&key, 1).first().cloned(), first);
    }

    /// Property: membership order does not affect placement
    #[test]
    fn prop_insertion_order_irrelevant(
        members in prop::collection::hash_set("[a-z]{1,8}", 1..10),
        key in "[a-z0-9]{0,16}",
    ) {
        let forward: Vec<String> = members.into_iter().collect();
        let mut backward = forward.clone();
        backward.reverse();

        let a = ConsistentHash::builder().with_vnodes(16).build().unwrap();
        a.add_nodes(forward);
        let b = ConsistentHash::builder().with_vnodes(16).build().unwrap();
        b.add_nodes(backward);

        prop_assert_eq!(a.get_nodes_for_key(&key, 10), b.get_nodes_for_key(&key, 10));
    }
}
