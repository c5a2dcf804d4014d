use crate::common::virtual_network::{build, VirtualNet};
use hopcast::simulator::Network;
use hopcast::topology::AdjacencyGraph;

/// a - b - c - d
pub fn vnet_line() -> (Network<VirtualNet>, AdjacencyGraph<VirtualNet>) {
    build(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("c", "d")],
    )
}

/// four-node cycle; the far corner is reachable two equal ways
pub fn vnet_ring() -> (Network<VirtualNet>, AdjacencyGraph<VirtualNet>) {
    build(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")],
    )
}

/// triangle a-b-c with a tail d hanging off c
pub fn vnet_triangle_tail() -> (Network<VirtualNet>, AdjacencyGraph<VirtualNet>) {
    build(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("a", "c"), ("c", "d")],
    )
}

/// 3x3 grid, row-major n0..n8
pub fn vnet_grid() -> (Network<VirtualNet>, AdjacencyGraph<VirtualNet>) {
    build(
        &["n0", "n1", "n2", "n3", "n4", "n5", "n6", "n7", "n8"],
        &[
            ("n0", "n1"),
            ("n1", "n2"),
            ("n3", "n4"),
            ("n4", "n5"),
            ("n6", "n7"),
            ("n7", "n8"),
            ("n0", "n3"),
            ("n3", "n6"),
            ("n1", "n4"),
            ("n4", "n7"),
            ("n2", "n5"),
            ("n5", "n8"),
        ],
    )
}
