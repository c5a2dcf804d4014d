mod common;

use common::graphs;
use common::virtual_network::{self as vnet, build, OneRoundBudget, VirtualNet};
use hopcast::feedback::SimError;
use hopcast::simulator::Network;
use hopcast::topology::TopologyProvider;
use hopcast::verifier;
use std::collections::BTreeMap;

#[test]
fn removing_the_middle_link_prunes_the_far_side() {
    let (mut network, mut topo) = graphs::vnet_line();
    network.simulate(&topo).expect("initial convergence");

    assert!(topo.remove_link(&"b".to_string(), &"c".to_string()));
    network.simulate(&topo).expect("re-convergence after the cut");

    // a keeps exactly its direct neighbour; c and d are gone, not stale
    assert_eq!(vnet::table_len(&network, "a"), 1);
    assert_eq!(vnet::next_hop(&network, "a", "b"), "b");
    assert_eq!(vnet::hops(&network, "a", "b"), 1);
    assert_eq!(vnet::table_len(&network, "b"), 1);
    assert_eq!(vnet::table_len(&network, "c"), 1);
    assert_eq!(vnet::next_hop(&network, "c", "d"), "d");
    assert_eq!(vnet::table_len(&network, "d"), 1);

    // the oracle agrees there is no path at all from a to c
    let from_a = verifier::hop_distances(&topo, &"a".to_string());
    assert!(from_a.get(&"c".to_string()).is_none());

    assert!(verifier::verify(&network, &topo).passed());
}

#[test]
fn ring_heals_around_a_removed_link() {
    let (mut network, mut topo) = graphs::vnet_ring();
    network.simulate(&topo).expect("initial convergence");

    assert!(topo.remove_link(&"c".to_string(), &"d".to_string()));
    network.simulate(&topo).expect("re-convergence after the cut");

    // traffic now goes the long way round
    assert_eq!(vnet::hops(&network, "d", "c"), 3);
    assert_eq!(vnet::next_hop(&network, "d", "c"), "a");
    assert_eq!(vnet::hops(&network, "d", "b"), 2);
    assert_eq!(vnet::hops(&network, "a", "c"), 2);
    assert_eq!(vnet::next_hop(&network, "a", "c"), "b");

    assert!(verifier::verify(&network, &topo).passed());
}

#[test]
fn adding_a_link_only_improves_distances() {
    let (mut network, mut topo) = graphs::vnet_line();
    network.simulate(&topo).expect("initial convergence");

    let nodes = ["a", "b", "c", "d"];
    let mut before: BTreeMap<(String, String), u32> = BTreeMap::new();
    for node in nodes {
        let router = network.router(&node.to_string()).unwrap();
        for (destination, route) in &router.routes {
            before.insert((node.to_string(), destination.clone()), route.hops);
        }
    }

    topo.add_link("a".to_string(), "d".to_string());
    network.simulate(&topo).expect("re-convergence after the join");

    // both endpoints see each other directly
    assert_eq!(vnet::hops(&network, "a", "d"), 1);
    assert_eq!(vnet::next_hop(&network, "a", "d"), "d");
    assert_eq!(vnet::hops(&network, "d", "a"), 1);

    // nothing got further away
    for ((node, destination), old_hops) in before {
        let new_hops = vnet::hops(&network, &node, &destination);
        assert!(
            new_hops <= old_hops,
            "{node} -> {destination} worsened from {old_hops} to {new_hops}"
        );
    }

    assert!(verifier::verify(&network, &topo).passed());
}

#[test]
fn splitting_off_a_leaf_empties_its_table() {
    let (mut network, mut topo) = graphs::vnet_triangle_tail();
    network.simulate(&topo).expect("initial convergence");

    assert!(topo.remove_link(&"c".to_string(), &"d".to_string()));
    network.simulate(&topo).expect("re-convergence after the cut");

    assert_eq!(vnet::table_len(&network, "d"), 0);
    for node in ["a", "b", "c"] {
        let router = network.router(&node.to_string()).unwrap();
        assert!(
            !router.routes.contains_key(&"d".to_string()),
            "{node} kept a stale route to d"
        );
    }
    assert!(verifier::verify(&network, &topo).passed());
}

#[test]
fn an_extra_round_after_quiescence_changes_nothing() {
    let (mut network, topo) = graphs::vnet_line();
    network.simulate(&topo).expect("initial convergence");

    let frozen = network.freeze().unwrap();
    let report = network.tick(&topo);
    assert!(report.is_quiescent());
    assert_eq!(network.freeze().unwrap(), frozen);

    let restored: Network<VirtualNet> = Network::restore(&frozen).unwrap();
    assert_eq!(restored.freeze().unwrap(), frozen);
}

#[test]
fn round_budget_surfaces_non_convergence() {
    let (mut network, topo) = build::<OneRoundBudget>(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("c", "d")],
    );
    let err = network.simulate(&topo).unwrap_err();
    assert!(matches!(err, SimError::DidNotConverge { rounds: 1 }));
}
