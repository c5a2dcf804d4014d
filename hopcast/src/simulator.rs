use crate::concepts::packet::{Envelope, OutboundPacket};
use crate::feedback::SimError;
use crate::framework::RoutingDomain;
use crate::router::Router;
use crate::topology::TopologyProvider;
use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::mem;

/// A router together with its mailbox. Both are exclusively owned by the
/// node; the only way in is packet delivery at the end of a round.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(bound = "")
)]
pub struct NodeState<T: RoutingDomain + ?Sized> {
    pub router: Router<T>,
    pub mailbox: Vec<Envelope<T>>,
}

/// All per-node protocol state of one simulation. The topology is not
/// part of this: it is passed explicitly to every operation, so no
/// component can hold on to a global network singleton.
#[cfg_attr(
    feature = "serde",
    serde_with::serde_as,
    derive(Serialize, Deserialize),
    serde(bound = "")
)]
pub struct Network<T: RoutingDomain + ?Sized> {
    #[cfg_attr(feature = "serde", serde_as(as = "Vec<(_, _)>"))]
    pub nodes: BTreeMap<T::NodeAddress, NodeState<T>>,
}

/// What happened during one round; the scheduler sums these instead of
/// threading a dirty flag through the loops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// adjacencies gained or lost by the change detectors
    pub topology_events: usize,
    /// mailbox messages drained through the routing engines
    pub processed: usize,
    /// packets delivered into mailboxes for the next round
    pub delivered: usize,
}

impl TickReport {
    /// a fully inactive round; reaching one constitutes convergence
    pub fn is_quiescent(&self) -> bool {
        self.topology_events == 0 && self.processed == 0 && self.delivered == 0
    }
}

/// Successful simulation outcome.
#[derive(Clone, Copy, Debug)]
pub struct Convergence {
    /// rounds run, counting the final quiescent one
    pub rounds: usize,
}

impl<T: RoutingDomain> Network<T> {
    /// Spawns one router per node the provider reports. The core never
    /// invents or discovers nodes on its own.
    pub fn from_topology<P: TopologyProvider<T>>(topo: &P) -> Self {
        let nodes = topo
            .nodes()
            .into_iter()
            .map(|address| {
                (
                    address.clone(),
                    NodeState {
                        router: Router::new(address),
                        mailbox: Vec::new(),
                    },
                )
            })
            .collect();
        Self { nodes }
    }

    pub fn router(&self, node: &T::NodeAddress) -> Option<&Router<T>> {
        self.nodes.get(node).map(|state| &state.router)
    }

    pub fn router_mut(&mut self, node: &T::NodeAddress) -> Option<&mut Router<T>> {
        self.nodes.get_mut(node).map(|state| &mut state.router)
    }

    pub fn next_hop(
        &self,
        node: &T::NodeAddress,
        destination: &T::NodeAddress,
    ) -> Option<&T::NodeAddress> {
        self.router(node)
            .and_then(|router| router.routes.get(destination))
            .map(|route| &route.next_hop)
    }

    pub fn hops_to(&self, node: &T::NodeAddress, destination: &T::NodeAddress) -> Option<u32> {
        self.router(node)
            .and_then(|router| router.routes.get(destination))
            .map(|route| route.hops)
    }

    /// Runs one synchronous round: every node reconciles its neighbour
    /// set, drains its mailbox through the engine, and queues outbound
    /// packets; delivery happens at the end, so packets sent in round k
    /// are processed in round k+1 and the visiting order cannot change
    /// the outcome.
    pub fn tick<P: TopologyProvider<T>>(&mut self, topo: &P) -> TickReport {
        let mut report = TickReport::default();
        let mut outbox: Vec<(T::NodeAddress, OutboundPacket<T>)> = Vec::new();

        for (address, state) in &mut self.nodes {
            let neighbours = topo.neighbours(address);
            report.topology_events += state.router.sync_neighbours(&neighbours);

            let inbox = mem::take(&mut state.mailbox);
            report.processed += inbox.len();
            for envelope in &inbox {
                state.router.handle_packet(envelope, &neighbours);
            }

            outbox.extend(
                state
                    .router
                    .outbound
                    .drain(..)
                    .map(|packet| (address.clone(), packet)),
            );
        }

        for (source, outbound) in outbox {
            // the source is stamped here, once, out of reach of node logic
            if !topo.has_link(&source, &outbound.dest) {
                warn!(
                    "dropping packet from {:?} to {:?}: no such link",
                    source, outbound.dest
                );
                continue;
            }
            match self.nodes.get_mut(&outbound.dest) {
                Some(state) => {
                    state.mailbox.push(Envelope {
                        source,
                        packet: outbound.packet,
                    });
                    report.delivered += 1;
                }
                None => warn!(
                    "dropping packet from {:?} to unknown node {:?}",
                    source, outbound.dest
                ),
            }
        }
        report
    }

    /// Repeats rounds until one is fully quiescent, the fixpoint that
    /// constitutes convergence for the current topology. Gives up after
    /// `SimParams::max_rounds` so a count-to-infinity oscillation surfaces
    /// as a result instead of a hang.
    pub fn simulate<P: TopologyProvider<T>>(
        &mut self,
        topo: &P,
    ) -> Result<Convergence, SimError> {
        let params = T::params();
        for round in 1..=params.max_rounds {
            let report = self.tick(topo);
            if report.is_quiescent() {
                debug!("network quiescent after {round} rounds");
                return Ok(Convergence { rounds: round });
            }
        }
        Err(SimError::DidNotConverge {
            rounds: params.max_rounds,
        })
    }
}

#[cfg(feature = "serde")]
impl<T: RoutingDomain> Network<T> {
    /// Snapshots the whole network as JSON, an inspection convenience.
    pub fn freeze(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn restore(snapshot: &str) -> serde_json::Result<Self> {
        serde_json::from_str(snapshot)
    }
}
