//! # Formica Runtime
//!
//! The shared world and the ants that forage in it.
//!
//! A [`world::World`] is built once and then shared read-only across threads;
//! only occupancy, food and pheromones change during a run, each behind its
//! own lock. Every [`ant::Ant`] runs its own control loop on its own thread,
//! started and joined by the [`simulator::Simulator`].

pub mod clearing;
pub mod trail;
pub mod world;
pub mod sequence;
pub mod ant;
pub mod config;
pub mod event_log;
pub mod simulator;
