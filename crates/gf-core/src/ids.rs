//! Strongly typed agent identifier.
//!
//! The inner integer is `pub` to allow direct indexing into per-agent `Vec`s
//! via `id.0 as usize`, but callers should prefer [`AgentId::index`].

use std::fmt;

/// Index of an agent in the fleet.  Agents are processed in ascending
/// `AgentId` order every tick, so the id doubles as the contention
/// tie-break rank.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}
