use crate::framework::RoutingDomain;
use educe::Educe;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The consumed side of the simulation: something that owns the set of
/// nodes and undirected unit-cost links. Links exist here and nowhere
/// else; the protocol only ever infers them.
pub trait TopologyProvider<T: RoutingDomain + ?Sized> {
    /// every node in the network
    fn nodes(&self) -> BTreeSet<T::NodeAddress>;
    /// the current neighbour set of `node`
    fn neighbours(&self, node: &T::NodeAddress) -> BTreeSet<T::NodeAddress>;
    fn has_link(&self, a: &T::NodeAddress, b: &T::NodeAddress) -> bool;
    /// severs an undirected link; returns whether it existed
    fn remove_link(&mut self, a: &T::NodeAddress, b: &T::NodeAddress) -> bool;
}

/// Adjacency-set topology, the provider used by the tests and demos.
/// BTree collections keep iteration deterministic, which keeps whole
/// simulation runs reproducible.
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[cfg_attr(
    feature = "serde",
    serde_with::serde_as,
    derive(Serialize, Deserialize),
    serde(bound = "")
)]
pub struct AdjacencyGraph<T: RoutingDomain + ?Sized> {
    #[cfg_attr(feature = "serde", serde_as(as = "Vec<(_, _)>"))]
    adjacency: BTreeMap<T::NodeAddress, BTreeSet<T::NodeAddress>>,
}

impl<T: RoutingDomain> AdjacencyGraph<T> {
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    pub fn add_node(&mut self, node: T::NodeAddress) {
        self.adjacency.entry(node).or_default();
    }

    /// adds an undirected link, creating the endpoints if needed
    pub fn add_link(&mut self, a: T::NodeAddress, b: T::NodeAddress) {
        debug_assert!(a != b, "links connect distinct nodes");
        if a == b {
            return;
        }
        self.adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.adjacency.entry(b).or_default().insert(a);
    }

    /// every undirected link exactly once
    pub fn links(&self) -> Vec<(T::NodeAddress, T::NodeAddress)> {
        let mut links = Vec::new();
        for (a, neighbours) in &self.adjacency {
            for b in neighbours {
                if a < b {
                    links.push((a.clone(), b.clone()));
                }
            }
        }
        links
    }
}

impl<T: RoutingDomain> TopologyProvider<T> for AdjacencyGraph<T> {
    fn nodes(&self) -> BTreeSet<T::NodeAddress> {
        self.adjacency.keys().cloned().collect()
    }

    fn neighbours(&self, node: &T::NodeAddress) -> BTreeSet<T::NodeAddress> {
        self.adjacency.get(node).cloned().unwrap_or_default()
    }

    fn has_link(&self, a: &T::NodeAddress, b: &T::NodeAddress) -> bool {
        self.adjacency
            .get(a)
            .map(|neighbours| neighbours.contains(b))
            .unwrap_or(false)
    }

    fn remove_link(&mut self, a: &T::NodeAddress, b: &T::NodeAddress) -> bool {
        let forward = self
            .adjacency
            .get_mut(a)
            .map(|neighbours| neighbours.remove(b))
            .unwrap_or(false);
        let backward = self
            .adjacency
            .get_mut(b)
            .map(|neighbours| neighbours.remove(a))
            .unwrap_or(false);
        forward || backward
    }
}
