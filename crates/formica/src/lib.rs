//! # Formica
//!
//! A concurrent ant colony foraging simulation.
//!
//! Ants leave an anthill, wander a graph of capacity-bounded clearings and
//! trails looking for food, and carry it home one unit at a time. There is no
//! central coordinator: every ant runs on its own thread and the colony's
//! route knowledge lives entirely in the pheromones written onto trails.
//!
//! ## Quick Start
//!
//! ```rust
//! use formica::prelude::*;
//! use std::sync::Arc;
//!
//! let mut builder = WorldBuilder::new();
//! let home = builder.anthill("home");
//! let meadow = builder.clearing("meadow", 2, Capacity::Finite(4));
//! builder.trail(home, meadow, Capacity::Finite(2));
//! let world = Arc::new(builder.build().unwrap());
//!
//! let log = Arc::new(EventLog::new());
//! let simulator = Simulator::new(world, log.clone());
//! let colony = ColonyConfig { ant_count: 2, seed: Some(7), ..ColonyConfig::default() };
//! let report = simulator.run(colony.ants().unwrap()).unwrap();
//!
//! assert!(report.target_reached());
//! assert!(log.count(|e| matches!(e, AntEvent::ReturnFood(_))) >= 2);
//! ```
//!
//! ## Architecture
//!
//! - [`formica_core`] - identifiers, pheromones, telemetry events and errors
//! - [`formica_runtime`] - clearings, trails, the world, ants and the simulator
//!
//! ## Key Concepts
//!
//! ### Pheromones
//!
//! Every trail carries two hints, each a step count: how far the anthill is
//! when walking against the trail, and how far the food is when walking
//! along it. Smaller is better. A food hint can also mark a dead end, which
//! turns every later ant away.
//!
//! ### Impatience
//!
//! An ant follows the best known food hint unless it is worse than its
//! impatience; then it explores an unrated trail instead and, once it finds
//! food, retraces its exact path home.
//!
//! ### Disguise
//!
//! An ant waiting on a trail for a full clearing is discovered and eaten once
//! its disguise runs out. Its remains keep occupying the trail for the rest of
//! the run.

// Re-export all subcrates
pub use formica_core as core;
pub use formica_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use formica::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use formica_core::prelude::*;

    // World
    pub use formica_runtime::clearing::Clearing;
    pub use formica_runtime::trail::Trail;
    pub use formica_runtime::world::{World, WorldBuilder};

    // Agents
    pub use formica_runtime::ant::{Ant, AntReport, AntState};
    pub use formica_runtime::sequence::Sequence;

    // Running a colony
    pub use formica_runtime::config::{AntConfig, ColonyConfig};
    pub use formica_runtime::event_log::{EventLog, LoggedEvent, Tee, TracingRecorder};
    pub use formica_runtime::simulator::{Simulation, SimulationReport, Simulator};
}
