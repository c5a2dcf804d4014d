//! Churn experiment: grow a random connected topology, converge, verify,
//! knock out a random link, repeat.

use anyhow::Result;
use hopcast::framework::RoutingDomain;
use hopcast::simulator::Network;
use hopcast::topology::{AdjacencyGraph, TopologyProvider};
use hopcast::verifier;
use log::info;
use rand::Rng;
use std::collections::BTreeSet;

struct LabNet;

impl RoutingDomain for LabNet {
    type NodeAddress = u32;
}

const NODES: u32 = 10;
const LINK_PROBABILITY: f64 = 0.3;
const TRIALS: usize = 10;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let mut topo = random_connected_topology(NODES, LINK_PROBABILITY);
    let mut network: Network<LabNet> = Network::from_topology(&topo);

    for trial in 0..TRIALS {
        println!("=== trial {trial} ===");
        match network.simulate(&topo) {
            Ok(convergence) => info!("converged in {} rounds", convergence.rounds),
            Err(err) => {
                println!("{err}");
                break;
            }
        }

        print_tables(&network, &topo);
        let report = verifier::verify(&network, &topo);
        if report.passed() {
            println!("verifier: all routes consistent");
        } else {
            println!("verifier: {} bad routes", report.violations.len());
            for violation in &report.violations {
                println!("  {violation}");
            }
        }
        println!("{}", render_dot(&topo));

        let links = topo.links();
        if links.is_empty() {
            break;
        }
        let (a, b) = &links[rand::thread_rng().gen_range(0..links.len())];
        println!("removing link {a} -- {b}");
        topo.remove_link(a, b);
    }
    Ok(())
}

/// G(n, p) reduced to its largest connected component, so the first
/// trial starts from a verifiable network.
fn random_connected_topology(nodes: u32, p: f64) -> AdjacencyGraph<LabNet> {
    let mut rng = rand::thread_rng();
    let mut graph: AdjacencyGraph<LabNet> = AdjacencyGraph::new();
    for node in 0..nodes {
        graph.add_node(node);
    }
    for a in 0..nodes {
        for b in (a + 1)..nodes {
            if rng.gen_bool(p) {
                graph.add_link(a, b);
            }
        }
    }
    largest_component(&graph)
}

fn largest_component(graph: &AdjacencyGraph<LabNet>) -> AdjacencyGraph<LabNet> {
    let mut best: BTreeSet<u32> = BTreeSet::new();
    let mut seen: BTreeSet<u32> = BTreeSet::new();
    for node in graph.nodes() {
        if seen.contains(&node) {
            continue;
        }
        let component: BTreeSet<u32> = verifier::hop_distances(graph, &node)
            .into_keys()
            .collect();
        seen.extend(component.iter().copied());
        if component.len() > best.len() {
            best = component;
        }
    }

    let mut kept = AdjacencyGraph::new();
    for node in &best {
        kept.add_node(*node);
    }
    for (a, b) in graph.links() {
        if best.contains(&a) && best.contains(&b) {
            kept.add_link(a, b);
        }
    }
    kept
}

fn print_tables(network: &Network<LabNet>, topo: &AdjacencyGraph<LabNet>) {
    for node in topo.nodes() {
        if let Some(router) = network.router(&node) {
            let entries: Vec<String> = router
                .routes
                .iter()
                .map(|(destination, route)| {
                    format!("{destination}: via {} at {}", route.next_hop, route.hops)
                })
                .collect();
            println!("{node} | {}", entries.join(", "));
        }
    }
}

fn render_dot(topo: &AdjacencyGraph<LabNet>) -> String {
    let mut dot = String::from("graph topology {\n");
    for (a, b) in topo.links() {
        dot.push_str(&format!("  {a} -- {b};\n"));
    }
    dot.push('}');
    dot
}
