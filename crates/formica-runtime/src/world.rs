//! World — the shared arena of clearings and trails, plus the food tally.
//!
//! The topology is fixed once [`WorldBuilder::build`] returns: clearings and
//! trails live in flat vectors and refer to each other by index, so the
//! whole world can be shared across ant threads behind one `Arc` with no
//! reference cycles. Only occupancy, food and pheromones change afterwards,
//! each behind its own lock.
//!
//! # Example
//!
//! ```rust
//! use formica_core::prelude::*;
//! use formica_runtime::world::WorldBuilder;
//!
//! let mut builder = WorldBuilder::new();
//! let home = builder.anthill("home");
//! let field = builder.clearing("field", 3, Capacity::Finite(2));
//! builder.trail(home, field, Capacity::Finite(1));
//! let world = builder.build().unwrap();
//!
//! assert_eq!(world.anthill(), home);
//! assert!(world.is_food_left());
//! ```

use crate::clearing::Clearing;
use crate::trail::Trail;
use formica_core::error::{FormicaError, Result, WorldError};
use formica_core::types::{Capacity, ClearingId, TrailId};
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// The colony's environment.
#[derive(Debug)]
pub struct World {
    clearings: Vec<Clearing>,
    trails: Vec<Trail>,
    anthill: ClearingId,
    food_target: u64,
    collected: AtomicU64,
}

impl World {
    pub fn anthill(&self) -> ClearingId {
        self.anthill
    }

    /// # Panics
    /// Panics on an id that did not come from this world.
    pub fn clearing(&self, id: ClearingId) -> &Clearing {
        &self.clearings[id.index()]
    }

    /// # Panics
    /// Panics on an id that did not come from this world.
    pub fn trail(&self, id: TrailId) -> &Trail {
        &self.trails[id.index()]
    }

    pub fn clearings(&self) -> &[Clearing] {
        &self.clearings
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    /// Look up a clearing by name.
    pub fn find(&self, name: &str) -> Option<ClearingId> {
        self.clearings.iter().find(|c| c.name() == name).map(Clearing::id)
    }

    /// The trail from `from` to `to`, if the two are adjacent.
    pub fn trail_between(&self, from: ClearingId, to: ClearingId) -> Option<TrailId> {
        self.clearing(from)
            .trails()
            .iter()
            .copied()
            .find(|&t| self.trail(t).to() == to)
    }

    /// Whether the colony still needs food.
    pub fn is_food_left(&self) -> bool {
        self.collected.load(Ordering::Acquire) < self.food_target
    }

    /// Tally one delivered unit and put it into the anthill's store.
    pub fn food_collected(&self) {
        let total = self.collected.fetch_add(1, Ordering::AcqRel) + 1;
        self.clearing(self.anthill).deposit_food();
        debug!(collected = total, target = self.food_target, "food delivered");
    }

    pub fn collected(&self) -> u64 {
        self.collected.load(Ordering::Acquire)
    }

    pub fn food_target(&self) -> u64 {
        self.food_target
    }
}

/// Builder for a [`World`].
///
/// Trails are created in pairs: [`WorldBuilder::trail`] adds the forward
/// trail and its reverse with the same capacity.
#[derive(Debug, Default)]
pub struct WorldBuilder {
    clearings: Vec<ClearingSpec>,
    trails: Vec<(ClearingId, ClearingId, Capacity)>,
    anthill: Option<ClearingId>,
    food_target: Option<u64>,
    names: HashSet<String>,
    errors: Vec<WorldError>,
}

#[derive(Debug)]
struct ClearingSpec {
    name: String,
    food: u64,
    capacity: Capacity,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clearing and return its id.
    pub fn clearing(&mut self, name: impl Into<String>, food: u64, capacity: Capacity) -> ClearingId {
        let name = name.into();
        if !self.names.insert(name.clone()) {
            self.errors.push(WorldError::DuplicateClearing(name.clone()));
        }
        let id = ClearingId(self.clearings.len());
        self.clearings.push(ClearingSpec { name, food, capacity });
        id
    }

    /// Add an unbounded, foodless clearing and make it the anthill.
    pub fn anthill(&mut self, name: impl Into<String>) -> ClearingId {
        let id = self.clearing(name, 0, Capacity::Infinite);
        self.anthill = Some(id);
        id
    }

    /// Make an existing clearing the anthill. [`WorldBuilder::build`] rejects
    /// it unless its capacity is [`Capacity::Infinite`].
    pub fn set_anthill(&mut self, id: ClearingId) -> &mut Self {
        self.anthill = Some(id);
        self
    }

    /// Connect two clearings in both directions. Returns the forward trail;
    /// its reverse is `id.reverse()`.
    pub fn trail(&mut self, from: ClearingId, to: ClearingId, capacity: Capacity) -> TrailId {
        let id = TrailId(self.trails.len() * 2);
        self.trails.push((from, to, capacity));
        id
    }

    /// Stop once this many units have been delivered. Defaults to all the
    /// food in the world.
    pub fn food_target(&mut self, target: u64) -> &mut Self {
        self.food_target = Some(target);
        self
    }

    pub fn build(self) -> Result<World> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err.into());
        }
        let anthill = self.anthill.ok_or(WorldError::MissingAnthill)?;

        let name_of = |id: ClearingId| {
            self.clearings
                .get(id.index())
                .map(|c| c.name.clone())
                .ok_or_else(|| FormicaError::unknown_clearing(id.to_string()))
        };
        let anthill_name = name_of(anthill)?;
        if self.clearings[anthill.index()].capacity != Capacity::Infinite {
            return Err(WorldError::BoundedAnthill(anthill_name).into());
        }

        let mut outgoing: Vec<Vec<TrailId>> = vec![Vec::new(); self.clearings.len()];
        let mut trails = Vec::with_capacity(self.trails.len() * 2);
        for (pair, &(from, to, capacity)) in self.trails.iter().enumerate() {
            let from_name = name_of(from)?;
            name_of(to)?;
            if from == to {
                return Err(WorldError::SelfLoop(from_name).into());
            }
            let forward = TrailId(pair * 2);
            let backward = forward.reverse();
            outgoing[from.index()].push(forward);
            outgoing[to.index()].push(backward);
            trails.push(Trail::new(forward, from, to, capacity));
            trails.push(Trail::new(backward, to, from, capacity));
        }

        let total_food: u64 = self
            .clearings
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != anthill.index())
            .map(|(_, spec)| spec.food)
            .sum();

        let clearings: Vec<Clearing> = self
            .clearings
            .into_iter()
            .zip(outgoing)
            .enumerate()
            .map(|(index, (spec, out))| {
                Clearing::new(ClearingId(index), spec.name, spec.food, spec.capacity, out)
            })
            .collect();

        warn_unreachable_food(&clearings, &trails, anthill);

        Ok(World {
            clearings,
            trails,
            anthill,
            food_target: self.food_target.unwrap_or(total_food),
            collected: AtomicU64::new(0),
        })
    }
}

fn warn_unreachable_food(clearings: &[Clearing], trails: &[Trail], anthill: ClearingId) {
    let mut graph: DiGraph<ClearingId, TrailId> = DiGraph::with_capacity(clearings.len(), trails.len());
    let nodes: Vec<NodeIndex> = clearings.iter().map(|c| graph.add_node(c.id())).collect();
    for trail in trails {
        graph.add_edge(nodes[trail.from().index()], nodes[trail.to().index()], trail.id());
    }
    for clearing in clearings {
        if clearing.id() != anthill
            && clearing.has_food()
            && !has_path_connecting(&graph, nodes[anthill.index()], nodes[clearing.id().index()], None)
        {
            warn!(clearing = clearing.name(), food = clearing.food(), "food unreachable from the anthill");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formica_core::error::FormicaError;

    #[test]
    fn trails_come_in_reverse_pairs() {
        let mut b = WorldBuilder::new();
        let h = b.anthill("H");
        let a = b.clearing("A", 1, Capacity::Finite(1));
        let c = b.clearing("C", 0, Capacity::Finite(1));
        let ha = b.trail(h, a, Capacity::Finite(2));
        let ac = b.trail(a, c, Capacity::Infinite);
        let world = b.build().unwrap();

        assert_eq!(world.trail(ha).to(), a);
        assert_eq!(world.trail(ha.reverse()).to(), h);
        assert_eq!(world.trail(ac.reverse()).from(), c);
        assert_eq!(world.clearing(a).trails(), &[ha.reverse(), ac]);
        assert_eq!(world.trail_between(c, a), Some(ac.reverse()));
        assert_eq!(world.trail_between(h, c), None);
        assert_eq!(world.find("C"), Some(c));
    }

    #[test]
    fn food_target_defaults_to_all_food() {
        let mut b = WorldBuilder::new();
        let h = b.anthill("H");
        let a = b.clearing("A", 3, Capacity::Infinite);
        b.trail(h, a, Capacity::Infinite);
        let world = b.build().unwrap();
        assert_eq!(world.food_target(), 3);

        for _ in 0..3 {
            assert!(world.is_food_left());
            world.food_collected();
        }
        assert!(!world.is_food_left());
        assert_eq!(world.clearing(h).food(), 3);
    }

    #[test]
    fn explicit_food_target() {
        let mut b = WorldBuilder::new();
        b.anthill("H");
        b.clearing("A", 10, Capacity::Infinite);
        b.food_target(1);
        let world = b.build().unwrap();
        assert!(world.is_food_left());
        world.food_collected();
        assert!(!world.is_food_left());
    }

    #[test]
    fn missing_anthill_is_rejected() {
        let mut b = WorldBuilder::new();
        b.clearing("A", 0, Capacity::Infinite);
        assert!(matches!(
            b.build(),
            Err(FormicaError::World(WorldError::MissingAnthill))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut b = WorldBuilder::new();
        b.anthill("H");
        b.clearing("H", 0, Capacity::Infinite);
        assert!(matches!(
            b.build(),
            Err(FormicaError::World(WorldError::DuplicateClearing(name))) if name == "H"
        ));
    }

    #[test]
    fn bounded_anthill_is_rejected() {
        let mut b = WorldBuilder::new();
        let h = b.clearing("H", 0, Capacity::Finite(1));
        let x = b.clearing("X", 1, Capacity::Finite(1));
        b.trail(h, x, Capacity::Finite(1));
        b.set_anthill(h);
        assert!(matches!(
            b.build(),
            Err(FormicaError::World(WorldError::BoundedAnthill(name))) if name == "H"
        ));

        let mut b = WorldBuilder::new();
        let h = b.clearing("H", 0, Capacity::Infinite);
        b.set_anthill(h);
        let world = b.build().unwrap();
        assert_eq!(world.anthill(), h);
        assert_eq!(world.clearing(h).capacity(), Capacity::Infinite);
    }

    #[test]
    fn self_loops_and_dangling_trails_are_rejected() {
        let mut b = WorldBuilder::new();
        let h = b.anthill("H");
        b.trail(h, h, Capacity::Infinite);
        assert!(matches!(
            b.build(),
            Err(FormicaError::World(WorldError::SelfLoop(_)))
        ));

        let mut b = WorldBuilder::new();
        let h = b.anthill("H");
        b.trail(h, ClearingId(9), Capacity::Infinite);
        assert!(matches!(
            b.build(),
            Err(FormicaError::World(WorldError::UnknownClearing(_)))
        ));
    }
}
