use crate::concepts::packet::{Envelope, OutboundPacket, Packet, RouteAdvert};
use crate::concepts::route::Route;
use crate::framework::RoutingDomain;
use crate::util::one_further;
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-node protocol state: the routing table plus the queue of packets
/// produced but not yet handed to the scheduler.
#[cfg_attr(
    feature = "serde",
    serde_with::serde_as,
    derive(Serialize, Deserialize),
    serde(bound = "")
)]
pub struct Router<T: RoutingDomain + ?Sized> {
    pub address: T::NodeAddress,
    /// destination -> (next hop, hop count)
    #[cfg_attr(feature = "serde", serde_as(as = "Vec<(_, _)>"))]
    pub routes: BTreeMap<T::NodeAddress, Route<T>>,
    pub outbound: Vec<OutboundPacket<T>>,
}

impl<T: RoutingDomain> Router<T> {
    pub fn new(address: T::NodeAddress) -> Self {
        Self {
            address,
            routes: BTreeMap::new(),
            outbound: Vec::new(),
        }
    }

    // region Interface

    /// queues `packet` for every node in `neighbours`, except `exclude`
    pub fn write_broadcast_packet(
        &mut self,
        packet: &Packet<T>,
        neighbours: &BTreeSet<T::NodeAddress>,
        exclude: Option<&T::NodeAddress>,
    ) {
        for neighbour in neighbours {
            if Some(neighbour) == exclude {
                continue;
            }
            self.outbound.push(OutboundPacket {
                dest: neighbour.clone(),
                packet: packet.clone(),
            });
        }
    }

    /// the full table as advertisements, the shape a route request is
    /// answered with
    pub fn table_adverts(&self) -> Vec<RouteAdvert<T>> {
        self.routes
            .iter()
            .map(|(destination, route)| RouteAdvert {
                destination: destination.clone(),
                hops: route.hops,
            })
            .collect()
    }

    // endregion

    /// Reconciles the table with the provider's actual neighbour set,
    /// once per round before any message is processed. Returns the number
    /// of adjacency changes; any nonzero return keeps the round active.
    pub fn sync_neighbours(&mut self, actual: &BTreeSet<T::NodeAddress>) -> usize {
        let inferred: BTreeSet<T::NodeAddress> = self
            .routes
            .iter()
            .filter(|(_, route)| route.hops == 1)
            .map(|(destination, _)| destination.clone())
            .collect();
        let mut events = 0;

        // a fresh adjacency is one hop away right now; take the entry and
        // ask for the neighbour's table instead of waiting a round trip
        for neighbour in actual.difference(&inferred) {
            self.routes.insert(
                neighbour.clone(),
                Route {
                    next_hop: neighbour.clone(),
                    hops: 1,
                },
            );
            self.outbound.push(OutboundPacket {
                dest: neighbour.clone(),
                packet: Packet::RouteRequest,
            });
            events += 1;
        }

        for neighbour in inferred.difference(actual) {
            let via: Vec<T::NodeAddress> = self
                .routes
                .iter()
                .filter(|(_, route)| route.next_hop == *neighbour)
                .map(|(destination, _)| destination.clone())
                .collect();
            for destination in via {
                self.routes.remove(&destination);
                self.write_broadcast_packet(
                    &Packet::RouteLost { destination },
                    actual,
                    None,
                );
            }
            events += 1;
        }

        debug_assert!(
            !self.routes.contains_key(&self.address),
            "table must never hold a route to the router itself"
        );
        events
    }

    /// handle a single delivered packet
    pub fn handle_packet(&mut self, env: &Envelope<T>, neighbours: &BTreeSet<T::NodeAddress>) {
        match &env.packet {
            Packet::RouteUpdate { routes } => {
                self.handle_route_update(routes, &env.source, neighbours)
            }
            Packet::RouteRequest => self.handle_route_request(&env.source),
            Packet::RouteLost { destination } => {
                self.handle_route_lost(destination, &env.source, neighbours)
            }
        }
        debug_assert!(
            !self.routes.contains_key(&self.address),
            "table must never hold a route to the router itself"
        );
    }

    fn handle_route_update(
        &mut self,
        adverts: &[RouteAdvert<T>],
        source: &T::NodeAddress,
        neighbours: &BTreeSet<T::NodeAddress>,
    ) {
        let accept_equal = T::params().accept_equal_hops;
        let mut accepted = Vec::new();
        for advert in adverts {
            if advert.destination == self.address {
                continue;
            }
            // updates must come from a peer we already recognise
            if !self.routes.contains_key(source) {
                debug!(
                    "{:?}: ignoring advert for {:?} from unrecognised source {:?}",
                    self.address, advert.destination, source
                );
                continue;
            }

            let candidate = one_further(advert.hops);
            let accept = match self.routes.get(&advert.destination) {
                None => true,
                Some(current) => {
                    candidate < current.hops || (accept_equal && candidate == current.hops)
                }
            };
            if accept {
                self.routes.insert(
                    advert.destination.clone(),
                    Route {
                        next_hop: source.clone(),
                        hops: candidate,
                    },
                );
                accepted.push(RouteAdvert {
                    destination: advert.destination.clone(),
                    hops: candidate,
                });
            }
        }

        // propagate only what changed, never the full table
        if !accepted.is_empty() {
            self.write_broadcast_packet(
                &Packet::RouteUpdate { routes: accepted },
                neighbours,
                None,
            );
        }
    }

    fn handle_route_request(&mut self, source: &T::NodeAddress) {
        self.outbound.push(OutboundPacket {
            dest: source.clone(),
            packet: Packet::RouteUpdate {
                routes: self.table_adverts(),
            },
        });
    }

    fn handle_route_lost(
        &mut self,
        lost: &T::NodeAddress,
        source: &T::NodeAddress,
        neighbours: &BTreeSet<T::NodeAddress>,
    ) {
        let via_source: Vec<(T::NodeAddress, u32)> = self
            .routes
            .iter()
            .filter(|(_, route)| route.next_hop == *source)
            .map(|(destination, route)| (destination.clone(), route.hops))
            .collect();

        for (destination, hops) in via_source {
            if destination == *lost {
                self.routes.remove(&destination);
                self.write_broadcast_packet(
                    &Packet::RouteLost { destination },
                    neighbours,
                    Some(source),
                );
            } else {
                // the adjacency to the withdrawing neighbour is suspect;
                // refresh the surviving entry, withheld from the withdrawer
                // so the refresh cannot hand it a phantom reverse route
                self.write_broadcast_packet(
                    &Packet::RouteUpdate {
                        routes: vec![RouteAdvert { destination, hops }],
                    },
                    neighbours,
                    Some(source),
                );
            }
        }
    }
}
