//! Trail — a capacity-bounded directed edge carrying two pheromone registers.
//!
//! Each physical path between two clearings is a pair of trails, one per
//! direction, with independent occupancy and pheromones. Traversal of a
//! single trail is serialized by its passage lock; the two pheromone
//! registers have their own read-write locks so route decisions never wait
//! on a traversal.

use formica_core::pheromone::Pheromone;
use formica_core::types::{Capacity, ClearingId, TrailId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

/// A directed edge between two clearings.
#[derive(Debug)]
pub struct Trail {
    id: TrailId,
    from: ClearingId,
    to: ClearingId,
    capacity: Capacity,
    /// Held for the whole traversal; the only point of mutual exclusion
    /// between ants using this trail.
    passage: Mutex<()>,
    /// Only written while `passage` is held.
    ants: AtomicUsize,
    anthill: RwLock<Pheromone>,
    food: RwLock<Pheromone>,
}

/// Proof that the caller holds a trail's passage lock.
pub struct Passage<'a> {
    trail: &'a Trail,
    _guard: MutexGuard<'a, ()>,
}

impl Trail {
    pub(crate) fn new(id: TrailId, from: ClearingId, to: ClearingId, capacity: Capacity) -> Self {
        Self {
            id,
            from,
            to,
            capacity,
            passage: Mutex::new(()),
            ants: AtomicUsize::new(0),
            anthill: RwLock::new(Pheromone::Unset),
            food: RwLock::new(Pheromone::Unset),
        }
    }

    pub fn id(&self) -> TrailId {
        self.id
    }

    pub fn from(&self) -> ClearingId {
        self.from
    }

    pub fn to(&self) -> ClearingId {
        self.to
    }

    /// The opposite-direction twin.
    pub fn reverse(&self) -> TrailId {
        self.id.reverse()
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Acquire the passage lock. Blocks while another ant is crossing.
    pub fn lock_passage(&self) -> Passage<'_> {
        Passage {
            trail: self,
            _guard: self.passage.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Number of ants on this trail, including the remains of eaten ones.
    pub fn occupancy(&self) -> usize {
        self.ants.load(Ordering::Acquire)
    }

    pub fn anthill_pheromone(&self) -> Pheromone {
        *self.anthill.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn food_pheromone(&self) -> Pheromone {
        *self.food.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the anthill-ward hint, keeping the recorded value if the new one
    /// is worse. Returns the register's value after the update.
    pub fn update_anthill_pheromone(&self, p: Pheromone) -> Pheromone {
        let mut current = self.anthill.write().unwrap_or_else(PoisonError::into_inner);
        if current.accepts(p) {
            *current = p;
        }
        *current
    }

    /// Write the food-ward hint. With `guarded` set (adventurous writers) a
    /// worse value is rejected; otherwise it overwrites unconditionally.
    /// Returns the register's value after the update.
    pub fn update_food_pheromone(&self, p: Pheromone, guarded: bool) -> Pheromone {
        let mut current = self.food.write().unwrap_or_else(PoisonError::into_inner);
        if !guarded || current.accepts(p) {
            *current = p;
        }
        *current
    }
}

impl Passage<'_> {
    pub fn has_space(&self) -> bool {
        self.trail.capacity.admits(self.trail.ants.load(Ordering::Acquire))
    }

    pub fn enter(&self) {
        self.trail.ants.fetch_add(1, Ordering::AcqRel);
    }

    pub fn leave(&self) {
        let previous = self.trail.ants.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "{} left while empty", self.trail.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn trail() -> Trail {
        Trail::new(TrailId(4), ClearingId(0), ClearingId(1), Capacity::Finite(1))
    }

    #[test]
    fn reverse_is_the_paired_id() {
        let t = trail();
        assert_eq!(t.reverse(), TrailId(5));
    }

    #[test]
    fn passage_tracks_occupancy() {
        let t = trail();
        let passage = t.lock_passage();
        assert!(passage.has_space());
        passage.enter();
        assert!(!passage.has_space());
        assert_eq!(t.occupancy(), 1);
        passage.leave();
        assert_eq!(t.occupancy(), 0);
    }

    #[test]
    fn passage_lock_serializes_crossings() {
        let t = Arc::new(trail());
        let held = t.lock_passage();
        held.enter();

        let other = {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                let passage = t.lock_passage();
                let seen = t.occupancy();
                passage.enter();
                seen
            })
        };

        thread::sleep(Duration::from_millis(30));
        held.leave();
        drop(held);
        assert_eq!(other.join().unwrap(), 0);
        assert_eq!(t.occupancy(), 1);
    }

    #[test]
    fn anthill_register_never_worsens() {
        let t = trail();
        assert_eq!(t.update_anthill_pheromone(Pheromone::Value(4)), Pheromone::Value(4));
        assert_eq!(t.update_anthill_pheromone(Pheromone::Value(9)), Pheromone::Value(4));
        assert_eq!(t.update_anthill_pheromone(Pheromone::Value(2)), Pheromone::Value(2));
        assert_eq!(t.update_anthill_pheromone(Pheromone::Blocked), Pheromone::Blocked);
    }

    #[test]
    fn accepted_guarded_writes_are_non_increasing() {
        let t = trail();
        let mut accepted = Vec::new();
        for v in [7, 9, 5, 5, 8, 3, 12, 1] {
            let before = t.food_pheromone();
            let after = t.update_food_pheromone(Pheromone::Value(v), true);
            if after != before || after == Pheromone::Value(v) {
                accepted.push(after);
            }
        }
        assert!(accepted.windows(2).all(|w| w[0] >= w[1]), "{accepted:?}");
        assert_eq!(t.food_pheromone(), Pheromone::Value(1));
    }

    #[test]
    fn unguarded_food_write_may_worsen() {
        let t = trail();
        t.update_food_pheromone(Pheromone::Value(3), true);
        assert_eq!(t.update_food_pheromone(Pheromone::Value(6), true), Pheromone::Value(3));
        assert_eq!(t.update_food_pheromone(Pheromone::Value(6), false), Pheromone::Value(6));
    }

    #[test]
    fn dead_end_marking_always_wins() {
        let t = trail();
        t.update_food_pheromone(Pheromone::Value(1), true);
        assert!(t.update_food_pheromone(Pheromone::dead_end(), true).is_blocked());
        assert!(t.food_pheromone().is_blocked());
        assert_eq!(t.anthill_pheromone(), Pheromone::Unset);
    }
}
