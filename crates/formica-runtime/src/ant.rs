//! Ant — one autonomous forager running on its own thread.
//!
//! An ant alternates between two modes:
//!
//! - **Searching**: pick a trail out of the current clearing by food
//!   pheromone (or explore an unrated one when the known options are not good
//!   enough), walk it, and leave an anthill-ward hint on the reverse trail.
//!   Its brain remembers the path so cycles are undone immediately and dead
//!   ends are backed out of.
//! - **Returning**: carry food home, either by the lowest anthill pheromone
//!   or, for an ant that explored, by retracing its exact path. Each step
//!   leaves a food-ward hint on the reverse trail.
//!
//! Every move goes through [`Ant::traverse`]: passage lock of the trail
//! first, then the destination clearing's lock, never two clearing locks at
//! once. That fixed order is what keeps the colony deadlock-free.

use crate::clearing::Clearing;
use crate::config::AntConfig;
use crate::sequence::Sequence;
use crate::world::World;
use formica_core::pheromone::Pheromone;
use formica_core::recorder::{AntEvent, DespawnReason, Recorder, SelectionReason};
use formica_core::types::{AntId, ClearingId, Location, TrailId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Where an ant is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AntState {
    Searching,
    /// Carrying food home along the best anthill pheromone.
    ReturningDirect,
    /// Carrying food home by retracing its own path.
    ReturningAdventurous,
    Eaten,
    Terminated,
}

/// What an ant reports once its loop ends.
#[derive(Debug, Clone, Serialize)]
pub struct AntReport {
    pub id: AntId,
    pub name: String,
    pub outcome: DespawnReason,
    /// Units of food this ant brought home.
    pub deliveries: u64,
}

/// A foraging agent.
pub struct Ant {
    id: AntId,
    name: String,
    impatience: i64,
    disguise: Duration,
    world: Arc<World>,
    recorder: Arc<dyn Recorder>,
    cancelled: Arc<AtomicBool>,
    rng: StdRng,

    position: ClearingId,
    brain: Sequence,
    returning: bool,
    adventurous: bool,
    searching: bool,
    eaten: bool,
    finished: bool,
    /// Cleared when the ant took the last unit of a source, so the trip home
    /// does not advertise a depleted clearing.
    reinforce_food: bool,
    steps_since_food: i64,
    steps_since_hill: i64,
    deliveries: u64,
}

impl Ant {
    pub fn new(config: &AntConfig, world: Arc<World>, recorder: Arc<dyn Recorder>) -> Self {
        let (id, rng) = match config.seed {
            Some(seed) => (AntId::from_seed(&config.name, seed), StdRng::seed_from_u64(seed)),
            None => (AntId::new(), StdRng::from_entropy()),
        };
        let position = world.anthill();
        Self {
            id,
            name: config.name.clone(),
            impatience: config.impatience,
            disguise: config.disguise(),
            world,
            recorder,
            cancelled: Arc::new(AtomicBool::new(false)),
            rng,
            position,
            brain: Sequence::new(),
            returning: false,
            adventurous: false,
            searching: false,
            eaten: false,
            finished: false,
            reinforce_food: true,
            steps_since_food: 0,
            steps_since_hill: 0,
            deliveries: 0,
        }
    }

    /// Share a cancellation flag; once it is set the ant stops at its next
    /// termination check.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    pub fn id(&self) -> AntId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> ClearingId {
        self.position
    }

    pub fn state(&self) -> AntState {
        if self.eaten {
            AntState::Eaten
        } else if self.finished {
            AntState::Terminated
        } else if self.returning && self.adventurous {
            AntState::ReturningAdventurous
        } else if self.returning {
            AntState::ReturningDirect
        } else {
            AntState::Searching
        }
    }

    /// Run until a terminal state.
    pub fn run(mut self) -> AntReport {
        self.spawn();
        let outcome = loop {
            if let Some(reason) = self.termination() {
                break reason;
            }
            let step = if self.returning {
                self.step_home()
            } else {
                self.step_search()
            };
            if let ControlFlow::Break(reason) = step {
                break reason;
            }
        };
        self.despawn(outcome);
        AntReport {
            id: self.id,
            name: self.name,
            outcome,
            deliveries: self.deliveries,
        }
    }

    fn record(&self, event: AntEvent) {
        self.recorder.record(self.id, event);
    }

    fn here(&self) -> &Clearing {
        self.world.clearing(self.position)
    }

    fn at_anthill(&self) -> bool {
        self.position == self.world.anthill()
    }

    fn spawn(&mut self) {
        let anthill = self.world.anthill();
        self.position = anthill;
        let home = self.world.clearing(anthill);
        home.enter();
        self.record(AntEvent::Spawn);
        let out_degree = home.out_degree();
        self.brain.push_clearing(anthill, out_degree, &[]);
        self.record(AntEvent::Enter(Location::Clearing(anthill)));
    }

    /// Checked between steps, with no lock held.
    fn termination(&self) -> Option<DespawnReason> {
        if self.eaten {
            Some(DespawnReason::DiscoveredAndEaten)
        } else if self.cancelled.load(Ordering::Acquire) {
            Some(DespawnReason::Terminated)
        } else if !self.world.is_food_left() {
            Some(DespawnReason::EnoughFoodCollected)
        } else {
            None
        }
    }

    fn despawn(&mut self, reason: DespawnReason) {
        if reason != DespawnReason::DiscoveredAndEaten {
            self.record(AntEvent::Leave(Location::Clearing(self.position)));
            self.here().leave();
            self.finished = true;
        }
        self.record(AntEvent::Despawn(reason));
        debug!(
            ant = %self.name,
            ?reason,
            deliveries = self.deliveries,
            "ant despawned"
        );
    }

    fn step_search(&mut self) -> ControlFlow<DespawnReason> {
        if self.at_anthill() {
            self.steps_since_hill = 0;
            if !self.searching {
                self.searching = true;
                self.record(AntEvent::StartFoodSearch);
            }
        } else if self.here().has_food() {
            if let Some(food_left) = self.here().take_one_food() {
                self.pick_up(food_left);
                return ControlFlow::Continue(());
            }
        }

        debug_assert_eq!(self.brain.current(), Some(self.position));
        match self.select_way() {
            Some(index) => {
                self.advance(index);
                ControlFlow::Continue(())
            }
            None => {
                self.steps_since_hill -= 1;
                self.back_out_of_dead_end()
            }
        }
    }

    /// Walk outgoing trail `index`, undoing the step at once if it closed a
    /// cycle.
    fn advance(&mut self, index: usize) {
        let world = Arc::clone(&self.world);
        self.brain.block_index(index);
        let trail = world.clearing(self.position).trails()[index];
        let destination = world.trail(trail).to();
        self.steps_since_hill += 1;

        let closes_cycle = self.brain.already_visited(destination);
        if !self.traverse(trail, !closes_cycle) {
            return;
        }

        if closes_cycle {
            let back = trail.reverse();
            self.record(AntEvent::Select {
                trail: back,
                candidates: None,
                reason: SelectionReason::ImmediateReturn,
            });
            if !self.traverse(back, false) {
                return;
            }
            let trails_back = world.clearing(destination).trails();
            if let Some(back_index) = trails_back.iter().position(|&t| t == back) {
                self.brain.block_index_at(destination, back_index);
            }
            self.steps_since_hill -= 1;
        } else {
            let out_degree = world.clearing(destination).out_degree();
            self.brain.push_clearing(destination, out_degree, &[]);
            self.brain.push_trail(trail);
            self.position = destination;
        }
    }

    /// Pick the next trail while searching. `None` means a dead end.
    fn select_way(&mut self) -> Option<usize> {
        let world = Arc::clone(&self.world);
        let here = world.clearing(self.position);
        let parent = if self.at_anthill() {
            None
        } else {
            Some(self.brain.parent_id())
        };

        let mut known = Vec::new();
        let mut best = i64::MAX;
        let mut unexplored = Vec::new();
        for (index, &trail_id) in here.trails().iter().enumerate() {
            let trail = world.trail(trail_id);
            if Some(trail.to()) == parent || !self.brain.is_viable(index) {
                continue;
            }
            match trail.food_pheromone() {
                Pheromone::Blocked => {}
                Pheromone::Unset => unexplored.push(index),
                Pheromone::Value(v) => {
                    if v < best {
                        best = v;
                        known.clear();
                    }
                    if v == best {
                        known.push(index);
                    }
                }
            }
        }

        let trails_of = |indices: &[usize]| -> Vec<TrailId> {
            indices.iter().map(|&i| here.trails()[i]).collect()
        };

        if !unexplored.is_empty() && (known.is_empty() || best > self.impatience) {
            if !self.adventurous {
                self.adventurous = true;
                self.record(AntEvent::StartExploration);
            }
            let index = *unexplored.choose(&mut self.rng)?;
            self.record(AntEvent::Select {
                trail: here.trails()[index],
                candidates: Some(trails_of(&unexplored)),
                reason: SelectionReason::Exploration,
            });
            Some(index)
        } else {
            let index = *known.choose(&mut self.rng)?;
            self.record(AntEvent::Select {
                trail: here.trails()[index],
                candidates: Some(trails_of(&known)),
                reason: SelectionReason::FoodSearch,
            });
            Some(index)
        }
    }

    /// Step back out of a dead end and mark the way in, or give up when the
    /// anthill itself has nothing left to offer.
    fn back_out_of_dead_end(&mut self) -> ControlFlow<DespawnReason> {
        if self.at_anthill() {
            debug!(ant = %self.name, "no viable trail from the anthill; search exhausted");
            return ControlFlow::Break(DespawnReason::Terminated);
        }

        let back = self.brain.last_trail().reverse();
        self.record(AntEvent::Select {
            trail: back,
            candidates: None,
            reason: SelectionReason::NoFoodReturn,
        });
        if !self.traverse(back, false) {
            return ControlFlow::Continue(());
        }

        let way_in = back.reverse();
        let value = self
            .world
            .trail(way_in)
            .update_food_pheromone(Pheromone::dead_end(), false);
        self.record(AntEvent::UpdateFood { trail: way_in, value });
        self.position = self.world.trail(back).to();
        self.brain.pop_frame();
        ControlFlow::Continue(())
    }

    fn pick_up(&mut self, food_left: bool) {
        self.reinforce_food = food_left;
        self.returning = true;
        self.searching = false;
        self.record(AntEvent::PickupFood(self.position));
        self.record(AntEvent::StopFoodSearch);
        self.record(AntEvent::StartFoodReturn);
    }

    fn step_home(&mut self) -> ControlFlow<DespawnReason> {
        if self.at_anthill() {
            self.deliver();
            return ControlFlow::Continue(());
        }

        if self.adventurous {
            let back = self.brain.last_trail().reverse();
            self.record(AntEvent::Select {
                trail: back,
                candidates: None,
                reason: SelectionReason::ReturnInSequence,
            });
            self.steps_since_food += 1;
            if self.traverse(back, self.reinforce_food) {
                self.brain.pop_frame();
                self.position = self.world.trail(back).to();
            }
        } else {
            let trail = self.select_way_home();
            self.steps_since_food += 1;
            if self.traverse(trail, self.reinforce_food) {
                self.position = self.world.trail(trail).to();
            }
        }
        ControlFlow::Continue(())
    }

    /// Lowest anthill pheromone out of the current clearing.
    ///
    /// # Panics
    /// Panics if no outgoing trail carries an anthill-ward hint; every
    /// clearing an ant reached while searching has one.
    fn select_way_home(&mut self) -> TrailId {
        let world = Arc::clone(&self.world);
        let here = world.clearing(self.position);

        let mut best = i64::MAX;
        let mut candidates = Vec::new();
        for &trail_id in here.trails() {
            let v = match world.trail(trail_id).anthill_pheromone() {
                Pheromone::Value(v) if v >= 0 => v,
                _ => continue,
            };
            if v < best {
                best = v;
                candidates.clear();
            }
            if v == best {
                candidates.push(trail_id);
            }
        }

        let trail = match candidates.choose(&mut self.rng) {
            Some(&trail) => trail,
            None => panic!(
                "{} carries food at {} but no trail there knows the way home",
                self.name,
                here.name()
            ),
        };
        self.record(AntEvent::Select {
            trail,
            candidates: Some(candidates),
            reason: SelectionReason::ReturnFood,
        });
        trail
    }

    fn deliver(&mut self) {
        self.world.food_collected();
        self.deliveries += 1;
        self.record(AntEvent::ReturnFood(self.position));

        let out_degree = self.here().out_degree();
        self.brain.reset();
        self.brain.push_clearing(self.position, out_degree, &[]);

        if self.adventurous {
            self.record(AntEvent::StopExploration);
        }
        self.steps_since_food = 0;
        self.steps_since_hill = 0;
        self.adventurous = false;
        self.returning = false;
        self.searching = false;
        self.reinforce_food = true;
    }

    /// Move across `trail_id`. Returns `false` if the ant was eaten on the
    /// way; its slot on the trail is then never released.
    fn traverse(&mut self, trail_id: TrailId, update_pheromones: bool) -> bool {
        let world = Arc::clone(&self.world);
        let trail = world.trail(trail_id);
        let origin = world.clearing(trail.from());
        let destination = world.clearing(trail.to());

        {
            let passage = trail.lock_passage();
            if !passage.has_space() {
                debug!(ant = %self.name, trail = %trail_id, "crossing a trail crowded by remains");
            }
            passage.enter();
            self.record(AntEvent::Enter(Location::Trail(trail_id)));
            self.record(AntEvent::Leave(Location::Clearing(origin.id())));
            origin.leave();

            let arrived = destination.enter_within(self.disguise, || {
                self.record(AntEvent::Enter(Location::Clearing(destination.id())));
                self.record(AntEvent::Leave(Location::Trail(trail_id)));
                passage.leave();
            });

            if arrived.is_none() {
                self.record(AntEvent::AttractAttention);
                self.record(AntEvent::Leave(Location::Trail(trail_id)));
                self.eaten = true;
                debug!(
                    ant = %self.name,
                    trail = %trail_id,
                    waiting_for = destination.name(),
                    "discovered while waiting for space"
                );
                return false;
            }
        }

        if update_pheromones {
            self.reinforce(trail_id);
        }
        true
    }

    /// Leave a hint on the reverse of the trail just walked.
    fn reinforce(&self, trail_id: TrailId) {
        let reverse = trail_id.reverse();
        let trail = self.world.trail(reverse);
        if self.returning {
            let value = trail
                .update_food_pheromone(Pheromone::Value(self.steps_since_food), self.adventurous);
            self.record(AntEvent::UpdateFood { trail: reverse, value });
        } else {
            let value = trail.update_anthill_pheromone(Pheromone::Value(self.steps_since_hill));
            self.record(AntEvent::UpdateAnthill { trail: reverse, value });
        }
    }
}
