//! Simulator — runs a colony, one OS thread per ant.
//!
//! There is no central scheduler. Ants interleave freely and only ever meet
//! at trail passage locks and clearing capacity. The simulator's job is to
//! start them, offer a cancellation signal, and collect what each one
//! reports when it stops.

use crate::ant::{Ant, AntReport};
use crate::config::AntConfig;
use crate::world::World;
use formica_core::error::{FormicaError, Result};
use formica_core::recorder::{DespawnReason, Recorder};
use serde::Serialize;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Starts colonies on a shared world.
pub struct Simulator {
    world: Arc<World>,
    recorder: Arc<dyn Recorder>,
}

impl Simulator {
    pub fn new(world: Arc<World>, recorder: Arc<dyn Recorder>) -> Self {
        Self { world, recorder }
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    /// Start one thread per ant and return immediately.
    pub fn spawn(&self, ants: Vec<AntConfig>) -> Result<Simulation> {
        let cancel = Arc::new(AtomicBool::new(false));
        let mut handles = Vec::with_capacity(ants.len());

        info!(
            ants = ants.len(),
            clearings = self.world.clearings().len(),
            target = self.world.food_target(),
            "starting colony"
        );

        for config in ants {
            let ant = Ant::new(&config, Arc::clone(&self.world), Arc::clone(&self.recorder))
                .with_cancellation(Arc::clone(&cancel));
            let spawned = thread::Builder::new()
                .name(config.name.clone())
                .spawn(move || ant.run());
            match spawned {
                Ok(handle) => handles.push((config.name, handle)),
                Err(e) => {
                    cancel.store(true, Ordering::Release);
                    for (_, handle) in handles {
                        let _ = handle.join();
                    }
                    return Err(FormicaError::ThreadSpawn {
                        name: config.name,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(Simulation {
            world: Arc::clone(&self.world),
            cancel,
            handles,
            started: Instant::now(),
        })
    }

    /// Spawn and wait for every ant to stop on its own.
    pub fn run(&self, ants: Vec<AntConfig>) -> Result<SimulationReport> {
        self.spawn(ants)?.join()
    }
}

/// A running colony.
pub struct Simulation {
    world: Arc<World>,
    cancel: Arc<AtomicBool>,
    handles: Vec<(String, JoinHandle<AntReport>)>,
    started: Instant,
}

impl Simulation {
    /// Ask every ant to stop. Each sees the signal at its next termination
    /// check, so an ant waiting on a full clearing stops once that wait ends.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// Whether every ant thread has stopped.
    pub fn is_finished(&self) -> bool {
        self.handles.iter().all(|(_, handle)| handle.is_finished())
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    /// Wait for every ant. A panicked ant cancels the rest and is reported
    /// once all threads have stopped.
    pub fn join(self) -> Result<SimulationReport> {
        let mut ants = Vec::with_capacity(self.handles.len());
        let mut failure = None;

        for (name, handle) in self.handles {
            match handle.join() {
                Ok(report) => ants.push(report),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(ant = %name, %message, "ant thread panicked");
                    self.cancel.store(true, Ordering::Release);
                    if failure.is_none() {
                        failure = Some(FormicaError::AntPanicked { name, message });
                    }
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }

        let report = SimulationReport {
            ants,
            collected: self.world.collected(),
            food_target: self.world.food_target(),
            elapsed: self.started.elapsed(),
        };
        info!(
            collected = report.collected,
            target = report.food_target,
            eaten = report.count(DespawnReason::DiscoveredAndEaten),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "colony finished"
        );
        Ok(report)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Outcome of a finished colony.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub ants: Vec<AntReport>,
    /// Units delivered to the anthill.
    pub collected: u64,
    pub food_target: u64,
    pub elapsed: Duration,
}

impl SimulationReport {
    /// Number of ants that stopped for `reason`.
    pub fn count(&self, reason: DespawnReason) -> usize {
        self.ants.iter().filter(|a| a.outcome == reason).count()
    }

    pub fn deliveries(&self) -> u64 {
        self.ants.iter().map(|a| a.deliveries).sum()
    }

    pub fn target_reached(&self) -> bool {
        self.collected >= self.food_target
    }
}
