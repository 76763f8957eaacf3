//! Recorder — the telemetry sink every ant reports to.
//!
//! An ant notifies its recorder of every state transition. Recorders observe;
//! they never influence behavior. The runtime ships an in-memory event log
//! and a `tracing` sink; [`NullRecorder`] discards everything.

use crate::pheromone::Pheromone;
use crate::types::{AntId, ClearingId, Location, TrailId};
use serde::{Deserialize, Serialize};

/// Why an ant picked the trail it picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionReason {
    /// Following the lowest known food pheromone.
    FoodSearch,
    /// Trying an unrated trail.
    Exploration,
    /// Stepping straight back after closing a cycle.
    ImmediateReturn,
    /// Backing out of a dead end.
    NoFoodReturn,
    /// Carrying food home along the lowest anthill pheromone.
    ReturnFood,
    /// Carrying food home by retracing the exact path taken.
    ReturnInSequence,
}

/// Why an ant left the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DespawnReason {
    /// Timed out waiting for space on a full clearing.
    DiscoveredAndEaten,
    /// The colony's food target was reached.
    EnoughFoodCollected,
    /// Cancelled from outside, or nothing left to explore from the anthill.
    Terminated,
}

/// A single state transition of an ant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AntEvent {
    Spawn,
    Enter(Location),
    Leave(Location),
    StartFoodSearch,
    StopFoodSearch,
    StartExploration,
    StopExploration,
    /// A trail was chosen. `candidates` is the tie-broken set the choice was
    /// drawn from, when there was one.
    Select {
        trail: TrailId,
        candidates: Option<Vec<TrailId>>,
        reason: SelectionReason,
    },
    UpdateAnthill { trail: TrailId, value: Pheromone },
    UpdateFood { trail: TrailId, value: Pheromone },
    /// The ant waited too long on a trail and was noticed.
    AttractAttention,
    PickupFood(ClearingId),
    StartFoodReturn,
    ReturnFood(ClearingId),
    Despawn(DespawnReason),
}

/// Receives every state transition of every ant.
///
/// Implementations are shared across ant threads and must not block for long:
/// they are called from inside the traversal protocol while locks are held.
pub trait Recorder: Send + Sync {
    fn record(&self, ant: AntId, event: AntEvent);
}

/// A recorder that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn record(&self, _ant: AntId, _event: AntEvent) {}
}
