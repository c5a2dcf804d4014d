use crate::framework::RoutingDomain;
use educe::Educe;
use thiserror::Error;

/// Terminal simulation outcomes that are results, not bugs.
#[derive(Error, Debug)]
pub enum SimError {
    /// The round budget ran out while the network was still active,
    /// usually a count-to-infinity oscillation after a link failure.
    #[error("network did not reach quiescence within {rounds} rounds")]
    DidNotConverge { rounds: usize },
}

/// One routing-table entry the verifier rejected. These are diagnoses,
/// not crashes: a failed verification is an expected outcome on
/// topologies where the loss-suppression heuristics fall short.
#[derive(Error, Educe)]
#[educe(Debug(bound()))]
#[error("bad route at {node:?} for {destination:?}: {kind}")]
pub struct RouteViolation<T: RoutingDomain + ?Sized> {
    pub node: T::NodeAddress,
    pub destination: T::NodeAddress,
    pub kind: ViolationKind,
}

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    #[error("the topology has no path to the destination")]
    Unreachable,
    #[error("a node must not route to itself")]
    SelfRoute,
    #[error("the next hop is not on any shortest path")]
    NextHopOffPath,
    #[error("shortest path takes {expected} hops, the table says {actual}")]
    WrongHopCount { expected: u32, actual: u32 },
}
