//! # Formica Core
//!
//! Core types shared by every Formica crate.
//!
//! The colony lives on a graph of **clearings** (capacity-bounded nodes)
//! connected by **trails** (capacity-bounded directed edges, each paired with
//! its reverse). Ants communicate only through the **pheromones** they leave
//! on trails. This crate holds the vocabulary for all of that:
//!
//! - [`types`] — identifiers, capacities and locations
//! - [`pheromone`] — the distance-hint value domain written onto trails
//! - [`recorder`] — the telemetry events an ant emits and the sink trait
//! - [`error`] — structured errors for world construction and simulation
//!
//! ## Quick Start
//!
//! ```rust
//! use formica_core::prelude::*;
//!
//! let hint = Pheromone::Value(3);
//! assert!(hint.is_recorded());
//! assert!(Pheromone::Unset < hint && hint < Pheromone::Blocked);
//!
//! let capacity = Capacity::Finite(2);
//! assert!(capacity.admits(1));
//! assert!(!capacity.admits(2));
//! ```

pub mod types;
pub mod pheromone;
pub mod recorder;
pub mod error;
pub mod prelude;
