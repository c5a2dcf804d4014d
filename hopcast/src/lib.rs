//! hopcast simulates a RIP-like distance-vector routing protocol over an
//! arbitrary, mutable, unit-cost topology, and checks the converged
//! routing tables against an independent shortest-path oracle.
//!
//! The simulation is I/O free: implement [`framework::RoutingDomain`]
//! with your own address type, hand a [`topology::TopologyProvider`] to
//! [`simulator::Network::simulate`], then judge the result with
//! [`verifier::verify`].

pub mod concepts;
pub mod feedback;
pub mod framework;
pub mod router;
pub mod simulator;
pub mod topology;
pub mod util;
pub mod verifier;
