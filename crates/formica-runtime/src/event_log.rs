//! Recorders shipped with the runtime.
//!
//! - [`EventLog`] keeps every event in arrival order, for tests and export.
//! - [`TracingRecorder`] forwards events to `tracing`.

use formica_core::error::Result;
use formica_core::recorder::{AntEvent, Recorder};
use formica_core::types::AntId;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// One recorded transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedEvent {
    /// Position in the global log.
    pub seq: usize,
    pub ant: AntId,
    pub event: AntEvent,
}

/// An in-memory, totally ordered log of every ant event.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<LoggedEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn events(&self) -> MutexGuard<'_, Vec<LoggedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the whole log.
    pub fn snapshot(&self) -> Vec<LoggedEvent> {
        self.events().clone()
    }

    /// Events of one ant, in order.
    pub fn for_ant(&self, ant: AntId) -> Vec<AntEvent> {
        self.events()
            .iter()
            .filter(|e| e.ant == ant)
            .map(|e| e.event.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }

    /// Number of events matching a predicate.
    pub fn count(&self, predicate: impl Fn(&AntEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(&e.event)).count()
    }

    /// Serialize the log as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&*self.events())?)
    }
}

impl Recorder for EventLog {
    fn record(&self, ant: AntId, event: AntEvent) {
        let mut events = self.events();
        let seq = events.len();
        events.push(LoggedEvent { seq, ant, event });
    }
}

/// Forwards events to `tracing`: lifecycle changes at debug, movement and
/// pheromone traffic at trace.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRecorder;

impl Recorder for TracingRecorder {
    fn record(&self, ant: AntId, event: AntEvent) {
        match &event {
            AntEvent::Spawn
            | AntEvent::Despawn(_)
            | AntEvent::AttractAttention
            | AntEvent::PickupFood(_)
            | AntEvent::ReturnFood(_)
            | AntEvent::StartExploration
            | AntEvent::StopExploration => debug!(%ant, ?event, "ant"),
            _ => trace!(%ant, ?event, "ant"),
        }
    }
}

/// Fans one event stream out to several recorders.
pub struct Tee(pub Vec<std::sync::Arc<dyn Recorder>>);

impl Recorder for Tee {
    fn record(&self, ant: AntId, event: AntEvent) {
        for recorder in &self.0 {
            recorder.record(ant, event.clone());
        }
    }
}
