//! Formica Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use formica_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{AntId, Capacity, ClearingId, Location, TrailId};

// Re-export the pheromone domain
pub use crate::pheromone::Pheromone;

// Re-export telemetry
pub use crate::recorder::{AntEvent, DespawnReason, NullRecorder, Recorder, SelectionReason};

// Re-export error types
pub use crate::error::{FormicaError, Result, WorldError};
