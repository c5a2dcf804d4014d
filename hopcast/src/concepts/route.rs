use crate::framework::RoutingDomain;
use educe::Educe;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single routing-table entry. The table maps a destination to this;
/// a router never holds an entry for its own address.
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct Route<T: RoutingDomain + ?Sized> {
    /// the neighbour through which the destination is currently reached
    pub next_hop: T::NodeAddress,
    /// hop count to the destination, direct neighbours are 1
    pub hops: u32,
}
