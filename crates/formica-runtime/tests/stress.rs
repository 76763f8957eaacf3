//! Many ants, small capacities, short disguises.
//!
//! These runs exist to shake out deadlocks and bookkeeping leaks: every run
//! must finish, and when it does the only occupancy left anywhere is the
//! remains of eaten ants on trails.

use formica_core::prelude::*;
use formica_runtime::config::ColonyConfig;
use formica_runtime::event_log::EventLog;
use formica_runtime::simulator::Simulator;
use formica_runtime::world::{World, WorldBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn grid(side: usize, food: u64) -> World {
    let mut b = WorldBuilder::new();
    let mut ids = Vec::new();
    for row in 0..side {
        for col in 0..side {
            let id = if row == 0 && col == 0 {
                b.anthill("hill")
            } else {
                let corner = (row == 0 || row == side - 1) && (col == 0 || col == side - 1);
                b.clearing(
                    format!("r{row}c{col}"),
                    if corner { food } else { 0 },
                    Capacity::Finite(2),
                )
            };
            ids.push(id);
        }
    }
    for row in 0..side {
        for col in 0..side {
            let here = ids[row * side + col];
            if col + 1 < side {
                b.trail(here, ids[row * side + col + 1], Capacity::Finite(1));
            }
            if row + 1 < side {
                b.trail(here, ids[(row + 1) * side + col], Capacity::Finite(1));
            }
        }
    }
    b.build().unwrap()
}

/// Ants eaten on each trail so far: an `AttractAttention` directly followed
/// by that ant's `Leave` of the trail it was crossing.
fn eaten_per_trail(log: &EventLog) -> HashMap<TrailId, usize> {
    let mut last: HashMap<AntId, AntEvent> = HashMap::new();
    let mut eaten = HashMap::new();
    for logged in log.snapshot() {
        if let AntEvent::Leave(Location::Trail(trail)) = logged.event {
            if last.get(&logged.ant) == Some(&AntEvent::AttractAttention) {
                *eaten.entry(trail).or_insert(0) += 1;
            }
        }
        last.insert(logged.ant, logged.event);
    }
    eaten
}

fn assert_capacities_hold(world: &World, log: &EventLog) {
    for clearing in world.clearings() {
        if let Capacity::Finite(limit) = clearing.capacity() {
            assert!(
                clearing.occupancy() <= limit,
                "{} holds {} ants over a limit of {}",
                clearing.name(),
                clearing.occupancy(),
                limit
            );
        }
    }

    // Occupancies first: the log only grows, so eaten counts read after
    // them cover every remains already on a trail.
    let occupancies: Vec<usize> = world.trails().iter().map(|t| t.occupancy()).collect();
    let eaten = eaten_per_trail(log);
    for (trail, occupancy) in world.trails().iter().zip(occupancies) {
        if let Capacity::Finite(limit) = trail.capacity() {
            let remains = eaten.get(&trail.id()).copied().unwrap_or(0);
            assert!(
                occupancy <= limit + remains,
                "trail {} holds {} ants over a limit of {} with {} eaten on it",
                trail.id(),
                occupancy,
                limit,
                remains
            );
        }
    }
}

fn crowded_run(seed: u64, ants: usize, disguise_ms: u64) {
    let world = Arc::new(grid(4, 3));
    let log = Arc::new(EventLog::new());
    let colony = ColonyConfig {
        ant_count: ants,
        impatience: 4,
        disguise_ms,
        seed: Some(seed),
    };

    let simulation = Simulator::new(Arc::clone(&world), log.clone())
        .spawn(colony.ants().unwrap())
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !simulation.is_finished() && Instant::now() < deadline {
        assert_capacities_hold(&world, &log);
        thread::sleep(Duration::from_millis(2));
    }
    simulation.cancel();
    let report = simulation.join().unwrap();

    assert_eq!(report.ants.len(), ants);
    assert_eq!(log.count(|e| matches!(e, AntEvent::Spawn)), ants);
    assert_eq!(log.count(|e| matches!(e, AntEvent::Despawn(_))), ants);
    assert!(report.collected <= report.food_target);
    assert_eq!(report.deliveries(), report.collected);
    assert_eq!(world.clearing(world.anthill()).food(), report.collected);

    assert!(world.clearings().iter().all(|c| c.occupancy() == 0));
    assert_capacities_hold(&world, &log);
    let remains: usize = world.trails().iter().map(|t| t.occupancy()).sum();
    assert_eq!(remains, report.count(DespawnReason::DiscoveredAndEaten));
    let eaten = eaten_per_trail(&log);
    assert_eq!(eaten.values().sum::<usize>(), remains);
    for trail in world.trails() {
        assert_eq!(trail.occupancy(), eaten.get(&trail.id()).copied().unwrap_or(0));
    }
}

#[test]
fn crowded_grid_never_deadlocks() {
    for seed in [1, 17, 404] {
        crowded_run(seed, 24, 15);
    }
}

#[test]
fn generous_disguise_loses_no_ants_to_a_free_grid() {
    let world = Arc::new(grid(3, 2));
    let colony = ColonyConfig {
        ant_count: 4,
        disguise_ms: 10_000,
        seed: Some(9),
        ..ColonyConfig::default()
    };
    let report = Simulator::new(Arc::clone(&world), Arc::new(NullRecorder))
        .run(colony.ants().unwrap())
        .unwrap();

    assert_eq!(report.count(DespawnReason::DiscoveredAndEaten), 0);
    assert!(report.collected > 0);
    assert!(world.trails().iter().all(|t| t.occupancy() == 0));
}

#[test]
fn every_ant_keeps_a_consistent_event_stream() {
    let world = Arc::new(grid(3, 2));
    let log = Arc::new(EventLog::new());
    let colony = ColonyConfig {
        ant_count: 6,
        disguise_ms: 20,
        seed: Some(31),
        ..ColonyConfig::default()
    };
    let report = Simulator::new(world, log.clone())
        .run(colony.ants().unwrap())
        .unwrap();

    for ant in &report.ants {
        let events = log.for_ant(ant.id);
        assert_eq!(events.first(), Some(&AntEvent::Spawn));
        assert_eq!(events.last(), Some(&AntEvent::Despawn(ant.outcome)));

        let enters = events.iter().filter(|e| matches!(e, AntEvent::Enter(_))).count();
        let leaves = events.iter().filter(|e| matches!(e, AntEvent::Leave(_))).count();
        assert_eq!(enters, leaves, "{} left as often as it entered", ant.name);

        let pickups = events.iter().filter(|e| matches!(e, AntEvent::PickupFood(_))).count() as u64;
        assert!(pickups == ant.deliveries || pickups == ant.deliveries + 1);
    }
}
