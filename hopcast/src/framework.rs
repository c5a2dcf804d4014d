use std::fmt::Debug;
use std::hash::Hash;

cfg_if::cfg_if! {
    if #[cfg(feature = "serde")] {
        use serde::de::DeserializeOwned;
        use serde::Serialize;

        pub trait SimData: Clone + Serialize + DeserializeOwned + Sized {}
        impl<T: Clone + Serialize + DeserializeOwned + Sized> SimData for T {}
    } else {
        pub trait SimData: Clone + Sized {}
        impl<T: Clone + Sized> SimData for T {}
    }
}

pub trait SimKey: Eq + PartialEq + Hash {}
impl<T: Eq + PartialEq + Hash> SimKey for T {}

/// The environment a simulation runs in. The core is I/O free and never
/// names a concrete address type, only this trait.
pub trait RoutingDomain {
    /// Address of a node on the simulated network, MUST be globally unique
    type NodeAddress: Ord + PartialOrd + Debug + SimData + SimKey;
    fn params() -> SimParams {
        Default::default()
    }
}

/// Simulation Parameters
pub struct SimParams {
    /// rounds `Network::simulate` may run before giving up with
    /// `SimError::DidNotConverge`
    pub max_rounds: usize,
    /// tie-break for equal-hop updates: `true` accepts the newest
    /// advertisement (keeps the next hop pointed at an active advertiser),
    /// `false` keeps the first one learned. Either converges; only the
    /// churn differs.
    pub accept_equal_hops: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            max_rounds: 10_000,
            accept_equal_hops: true,
        }
    }
}
