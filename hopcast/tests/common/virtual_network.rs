use hopcast::framework::{RoutingDomain, SimParams};
use hopcast::simulator::Network;
use hopcast::topology::AdjacencyGraph;

pub struct VirtualNet;

impl RoutingDomain for VirtualNet {
    type NodeAddress = String;
}

/// same wiring, but keeps the first of two equal-hop routes
pub struct FirstWins;

impl RoutingDomain for FirstWins {
    type NodeAddress = String;
    fn params() -> SimParams {
        SimParams {
            accept_equal_hops: false,
            ..Default::default()
        }
    }
}

/// a domain that gives up after a single round
pub struct OneRoundBudget;

impl RoutingDomain for OneRoundBudget {
    type NodeAddress = String;
    fn params() -> SimParams {
        SimParams {
            max_rounds: 1,
            ..Default::default()
        }
    }
}

pub fn build<T: RoutingDomain<NodeAddress = String>>(
    nodes: &[&str],
    links: &[(&str, &str)],
) -> (Network<T>, AdjacencyGraph<T>) {
    let mut topo = AdjacencyGraph::new();
    for node in nodes {
        topo.add_node(node.to_string());
    }
    for (a, b) in links {
        topo.add_link(a.to_string(), b.to_string());
    }
    let network = Network::from_topology(&topo);
    (network, topo)
}

pub fn next_hop<T: RoutingDomain<NodeAddress = String>>(
    network: &Network<T>,
    node: &str,
    destination: &str,
) -> String {
    network
        .next_hop(&node.to_string(), &destination.to_string())
        .unwrap_or_else(|| panic!("no route from {node} to {destination}"))
        .clone()
}

pub fn hops<T: RoutingDomain<NodeAddress = String>>(
    network: &Network<T>,
    node: &str,
    destination: &str,
) -> u32 {
    network
        .hops_to(&node.to_string(), &destination.to_string())
        .unwrap_or_else(|| panic!("no route from {node} to {destination}"))
}

pub fn table_len<T: RoutingDomain<NodeAddress = String>>(network: &Network<T>, node: &str) -> usize {
    network
        .router(&node.to_string())
        .unwrap_or_else(|| panic!("no node {node}"))
        .routes
        .len()
}
