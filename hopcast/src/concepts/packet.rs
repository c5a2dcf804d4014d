use crate::framework::RoutingDomain;
use educe::Educe;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Messages exchanged between adjacent nodes. The sender's address is
/// deliberately absent: the scheduler stamps it into an [`Envelope`] at
/// delivery, so node logic cannot spoof a source.
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub enum Packet<T: RoutingDomain + ?Sized> {
    /// advertises reachable destinations; a delta after acceptance, or the
    /// full table when answering a [`Packet::RouteRequest`]
    RouteUpdate { routes: Vec<RouteAdvert<T>> },
    /// asks a neighbour to reply with its entire table
    RouteRequest,
    /// the sender no longer has a route to `destination`
    RouteLost { destination: T::NodeAddress },
}

/// One advertised destination inside a [`Packet::RouteUpdate`].
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct RouteAdvert<T: RoutingDomain + ?Sized> {
    pub destination: T::NodeAddress,
    /// hop count as seen by the advertiser; the receiver is one further
    pub hops: u32,
}

/// A packet queued by a router for one neighbour.
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct OutboundPacket<T: RoutingDomain + ?Sized> {
    pub dest: T::NodeAddress,
    pub packet: Packet<T>,
}

/// A packet sitting in a mailbox. `source` is written exactly once, by
/// the delivery step at the end of the round the packet was sent in.
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct Envelope<T: RoutingDomain + ?Sized> {
    pub source: T::NodeAddress,
    pub packet: Packet<T>,
}
