//! Shared types used across the colony: identifiers, capacities, locations.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AntId(pub Uuid);

impl AntId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic ID for reproducible runs. Ants sharing a seed still get
    /// distinct ids as long as their names differ.
    pub fn from_seed(name: &str, seed: u64) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{name}/{seed}").as_bytes()))
    }
}

impl Default for AntId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AntId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ant-{}", &self.0.simple().to_string()[24..])
    }
}

/// Index of a clearing in the world arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClearingId(pub usize);

impl ClearingId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ClearingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clearing-{}", self.0)
    }
}

/// Index of a directed trail in the world arena.
///
/// Trails are allocated in pairs, so the reverse of trail `2k` is `2k + 1`
/// and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrailId(pub usize);

impl TrailId {
    pub fn index(&self) -> usize {
        self.0
    }

    /// The id of the opposite-direction twin.
    pub fn reverse(&self) -> TrailId {
        TrailId(self.0 ^ 1)
    }
}

impl fmt::Display for TrailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trail-{}", self.0)
    }
}

/// How many ants a clearing or trail can hold at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capacity {
    /// At most this many ants.
    Finite(usize),
    /// No limit.
    Infinite,
}

impl Capacity {
    /// Whether one more ant fits when `occupancy` ants are already present.
    pub fn admits(&self, occupancy: usize) -> bool {
        match self {
            Capacity::Finite(limit) => occupancy < *limit,
            Capacity::Infinite => true,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Capacity::Infinite)
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity::Infinite
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Finite(limit) => write!(f, "{}", limit),
            Capacity::Infinite => write!(f, "inf"),
        }
    }
}

/// Where an ant currently is: on a clearing or walking a trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Clearing(ClearingId),
    Trail(TrailId),
}
