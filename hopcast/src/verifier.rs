use crate::concepts::route::Route;
use crate::feedback::{RouteViolation, ViolationKind};
use crate::framework::RoutingDomain;
use crate::simulator::Network;
use crate::topology::TopologyProvider;
use educe::Educe;
use std::collections::{BTreeMap, VecDeque};

/// Everything the oracle disagreed with, across all nodes.
#[derive(Educe)]
#[educe(Debug(bound()))]
pub struct VerifyReport<T: RoutingDomain + ?Sized> {
    pub violations: Vec<RouteViolation<T>>,
}

impl<T: RoutingDomain> VerifyReport<T> {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Hop distances from `from` to every reachable node, by breadth-first
/// search; the shortest-path oracle for unit-cost links. Unreachable
/// nodes are absent from the result.
pub fn hop_distances<T: RoutingDomain, P: TopologyProvider<T>>(
    topo: &P,
    from: &T::NodeAddress,
) -> BTreeMap<T::NodeAddress, u32> {
    let mut distances = BTreeMap::new();
    distances.insert(from.clone(), 0);
    let mut frontier = VecDeque::new();
    frontier.push_back(from.clone());

    while let Some(node) = frontier.pop_front() {
        let next = distances[&node] + 1;
        for neighbour in topo.neighbours(&node) {
            if !distances.contains_key(&neighbour) {
                distances.insert(neighbour.clone(), next);
                frontier.push_back(neighbour);
            }
        }
    }
    distances
}

/// Checks every routing-table entry of a (presumably converged) network
/// against shortest paths recomputed from the true topology. Independent
/// of the protocol: it trusts nothing the routers learned.
pub fn verify<T: RoutingDomain, P: TopologyProvider<T>>(
    network: &Network<T>,
    topo: &P,
) -> VerifyReport<T> {
    let oracle: BTreeMap<T::NodeAddress, BTreeMap<T::NodeAddress, u32>> = topo
        .nodes()
        .into_iter()
        .map(|node| {
            let distances = hop_distances(topo, &node);
            (node, distances)
        })
        .collect();

    let mut violations = Vec::new();
    for (address, state) in &network.nodes {
        if let Some(from_here) = oracle.get(address) {
            for (destination, route) in &state.router.routes {
                if let Some(kind) = check_entry(route, destination, from_here, &oracle) {
                    violations.push(RouteViolation {
                        node: address.clone(),
                        destination: destination.clone(),
                        kind,
                    });
                }
            }
        }
    }
    VerifyReport { violations }
}

fn check_entry<T: RoutingDomain>(
    route: &Route<T>,
    destination: &T::NodeAddress,
    from_here: &BTreeMap<T::NodeAddress, u32>,
    oracle: &BTreeMap<T::NodeAddress, BTreeMap<T::NodeAddress, u32>>,
) -> Option<ViolationKind> {
    let true_hops = match from_here.get(destination) {
        None => return Some(ViolationKind::Unreachable),
        Some(distance) => *distance,
    };
    if true_hops == 0 {
        return Some(ViolationKind::SelfRoute);
    }

    // the next hop must be adjacent and one hop closer along some
    // shortest path, not necessarily the same path every time
    let from_next_hop = oracle
        .get(&route.next_hop)
        .and_then(|distances| distances.get(destination));
    let on_shortest_path =
        from_here.get(&route.next_hop) == Some(&1) && from_next_hop == Some(&(true_hops - 1));
    if !on_shortest_path {
        return Some(ViolationKind::NextHopOffPath);
    }

    if route.hops != true_hops {
        return Some(ViolationKind::WrongHopCount {
            expected: true_hops,
            actual: route.hops,
        });
    }
    None
}
