//! Options controlling freeze-and-index.

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node idnames treated as pass-through when no options are given.
pub const DEFAULT_PASS_THROUGH: &[&str] = &["NodeReroute"];

/// What link resolution does when it meets a cycle of pass-through nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CyclePolicy {
    /// Drop the cyclic branch; the socket keeps whatever else it resolved to.
    #[default]
    Truncate,
    /// Abort freezing with [`GraphError::PassThroughCycle`](crate::GraphError::PassThroughCycle).
    Reject,
}

/// Settings for [`TreeBuilder::freeze_and_index_with`](crate::TreeBuilder::freeze_and_index_with).
///
/// A node is pass-through when its idname is listed in `pass_through` and it
/// has exactly one input socket. All of its outputs forward that input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FreezeOptions {
    /// Idnames of pass-through (reroute-style) nodes.
    pub pass_through: Vec<String>,
    /// Behavior on pass-through cycles.
    pub cycle_policy: CyclePolicy,
}

impl Default for FreezeOptions {
    fn default() -> Self {
        Self {
            pass_through: DEFAULT_PASS_THROUGH.iter().map(|s| s.to_string()).collect(),
            cycle_policy: CyclePolicy::default(),
        }
    }
}

impl FreezeOptions {
    /// Options with no pass-through idnames: resolved links equal direct links.
    pub fn literal() -> Self {
        Self {
            pass_through: Vec::new(),
            cycle_policy: CyclePolicy::default(),
        }
    }

    /// Adds an idname to the pass-through set.
    pub fn with_pass_through(mut self, idname: impl Into<String>) -> Self {
        let idname = idname.into();
        if !self.is_pass_through_idname(&idname) {
            self.pass_through.push(idname);
        }
        self
    }

    /// Sets the cycle policy.
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    /// Returns true if nodes with this idname may forward their input.
    pub fn is_pass_through_idname(&self, idname: &str) -> bool {
        self.pass_through.iter().any(|p| p == idname)
    }
}
