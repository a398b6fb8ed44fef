//! Identity types for the byte graph.
//!
//! Node ids are handed out by [`Graph`](crate::pipeline::Graph) from a
//! monotonically increasing counter and are never reused, so ordering by id
//! is also insertion order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node within a single graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The id allocated after this one.
    #[inline]
    pub fn next(self) -> NodeId {
        NodeId(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
