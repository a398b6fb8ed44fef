//! Port and parameter descriptors for the node catalog.
//!
//! Each node kind declares its ports and parameters via static descriptor
//! arrays. The graph uses the port descriptors to validate connections and
//! the engine uses them to decide which inputs to gather.

use crate::pipeline::id::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a port is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// Static descriptor for a node's port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortDescriptor {
    pub name: &'static str,
    pub direction: PortDirection,
    /// Parameter this input stands in for while it is connected.
    pub shadows: Option<&'static str>,
}

impl PortDescriptor {
    pub const fn input(name: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Input,
            shadows: None,
        }
    }

    /// An input that overrides `param` when it carries data.
    pub const fn shadowing(name: &'static str, param: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Input,
            shadows: Some(param),
        }
    }

    pub const fn output(name: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Output,
            shadows: None,
        }
    }

    pub fn is_input(&self) -> bool {
        self.direction == PortDirection::Input
    }

    pub fn is_output(&self) -> bool {
        self.direction == PortDirection::Output
    }
}

/// Static descriptor for a node parameter.
///
/// Every parameter is string-typed. `choices` is non-empty for combo-style
/// parameters, in which case `default` is the first choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub default: &'static str,
    pub choices: &'static [&'static str],
}

impl ParamDescriptor {
    pub const fn text(name: &'static str, label: &'static str, default: &'static str) -> Self {
        Self {
            name,
            label,
            default,
            choices: &[],
        }
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        default: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            default,
            choices,
        }
    }

    pub fn is_choice(&self) -> bool {
        !self.choices.is_empty()
    }
}

/// A port on a specific node: `(node id, port name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortAddress {
    pub node_id: NodeId,
    pub port_name: String,
}

impl PortAddress {
    pub fn new(node_id: NodeId, port_name: impl Into<String>) -> Self {
        Self {
            node_id,
            port_name: port_name.into(),
        }
    }
}

impl fmt::Display for PortAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node_id, self.port_name)
    }
}
