//! Clearing — a capacity-bounded node of the trail graph.
//!
//! Occupancy and food share one mutex; a condition variable signals freed
//! space to ants waiting on a trail that leads here. Every operation takes
//! the lock for its own duration only.

use formica_core::types::{Capacity, ClearingId, TrailId};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug)]
struct ClearingState {
    ants: usize,
    food: u64,
}

/// A node ants rest on, forage at, and queue for.
#[derive(Debug)]
pub struct Clearing {
    id: ClearingId,
    name: String,
    capacity: Capacity,
    /// Outgoing trails in a fixed order; indices into this list are what an
    /// ant's brain marks as viable or not.
    trails: Vec<TrailId>,
    state: Mutex<ClearingState>,
    space_left: Condvar,
}

impl Clearing {
    pub(crate) fn new(
        id: ClearingId,
        name: impl Into<String>,
        food: u64,
        capacity: Capacity,
        trails: Vec<TrailId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            trails,
            state: Mutex::new(ClearingState { ants: 0, food }),
            space_left: Condvar::new(),
        }
    }

    pub fn id(&self) -> ClearingId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Outgoing trails, in the order used for brain indices.
    pub fn trails(&self) -> &[TrailId] {
        &self.trails
    }

    pub fn out_degree(&self) -> usize {
        self.trails.len()
    }

    fn state(&self) -> MutexGuard<'_, ClearingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether another ant fits right now.
    pub fn has_space(&self) -> bool {
        self.capacity.admits(self.state().ants)
    }

    /// Register an arriving ant. Callers must already have made sure there
    /// is room.
    pub fn enter(&self) {
        self.state().ants += 1;
    }

    /// Register a departing ant and wake one ant queued for space.
    pub fn leave(&self) {
        let mut state = self.state();
        debug_assert!(state.ants > 0, "{} left while empty", self.name);
        state.ants = state.ants.saturating_sub(1);
        self.space_left.notify_one();
    }

    /// Wait up to `timeout` for room, then enter.
    ///
    /// `on_enter` runs after the occupancy increment and before the lock is
    /// released, so whatever it records is ordered with the arrival. Returns
    /// `None` if no space freed up in time; occupancy is untouched then.
    pub fn enter_within<R>(&self, timeout: Duration, on_enter: impl FnOnce() -> R) -> Option<R> {
        let guard = self.state();
        let (mut state, _) = self
            .space_left
            .wait_timeout_while(guard, timeout, |state| !self.capacity.admits(state.ants))
            .unwrap_or_else(PoisonError::into_inner);
        if !self.capacity.admits(state.ants) {
            return None;
        }
        state.ants += 1;
        Some(on_enter())
    }

    /// Current number of ants here.
    pub fn occupancy(&self) -> usize {
        self.state().ants
    }

    pub fn has_food(&self) -> bool {
        self.state().food > 0
    }

    /// Current food count.
    pub fn food(&self) -> u64 {
        self.state().food
    }

    /// Take one unit of food.
    ///
    /// Returns whether food remains afterwards, or `None` if the clearing
    /// was already empty (another ant got there first).
    pub fn take_one_food(&self) -> Option<bool> {
        let mut state = self.state();
        if state.food == 0 {
            return None;
        }
        state.food -= 1;
        Some(state.food > 0)
    }

    /// Add one unit of food.
    pub fn deposit_food(&self) {
        self.state().food += 1;
    }
}
