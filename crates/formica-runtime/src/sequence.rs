//! Sequence — an ant's private backtracking memory.
//!
//! The brain is a stack of frames, one per clearing on the current
//! excursion, each with a viability flag per outgoing trail. Alongside it
//! runs the chain of trails that connected those clearings, and a set of the
//! clearing ids on the stack for constant-time cycle detection.
//!
//! A brain belongs to exactly one ant and is never shared.

use formica_core::types::{ClearingId, TrailId};
use std::collections::HashSet;

#[derive(Debug, Clone)]
struct Frame {
    clearing: ClearingId,
    /// One flag per outgoing trail; flags only ever go from true to false.
    viable: Box<[bool]>,
}

/// The path an ant has taken since leaving the anthill.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    frames: Vec<Frame>,
    trail_chain: Vec<TrailId>,
    visited: HashSet<ClearingId>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a frame for `id`, with every outgoing trail viable except those
    /// listed in `blocked`.
    pub fn push_clearing(&mut self, id: ClearingId, out_degree: usize, blocked: &[usize]) {
        debug_assert!(
            !self.visited.contains(&id),
            "{id} pushed twice in one excursion"
        );
        let mut viable = vec![true; out_degree].into_boxed_slice();
        for &index in blocked {
            viable[index] = false;
        }
        self.frames.push(Frame { clearing: id, viable });
        self.visited.insert(id);
    }

    pub fn push_trail(&mut self, trail: TrailId) {
        self.trail_chain.push(trail);
    }

    /// The trail that led onto the current clearing.
    ///
    /// # Panics
    /// Panics if the ant has not moved since the last reset.
    pub fn last_trail(&self) -> TrailId {
        match self.trail_chain.last() {
            Some(trail) => *trail,
            None => panic!("no trail taken since the brain was reset"),
        }
    }

    fn top(&mut self) -> &mut Frame {
        match self.frames.last_mut() {
            Some(frame) => frame,
            None => panic!("brain has no frames"),
        }
    }

    /// Mark outgoing trail `index` of the current clearing as used.
    pub fn block_index(&mut self, index: usize) {
        self.top().viable[index] = false;
    }

    /// Mark outgoing trail `index` of clearing `id` as used, wherever that
    /// clearing sits on the stack.
    pub fn block_index_at(&mut self, id: ClearingId, index: usize) {
        if let Some(frame) = self.frames.iter_mut().find(|frame| frame.clearing == id) {
            frame.viable[index] = false;
        }
    }

    pub fn is_viable(&self, index: usize) -> bool {
        match self.frames.last() {
            Some(frame) => frame.viable[index],
            None => panic!("brain has no frames"),
        }
    }

    pub fn already_visited(&self, id: ClearingId) -> bool {
        self.visited.contains(&id)
    }

    /// The clearing one level below the current one.
    ///
    /// # Panics
    /// Panics at depth below 2.
    pub fn parent_id(&self) -> ClearingId {
        assert!(
            self.frames.len() >= 2,
            "parent requested at depth {}",
            self.frames.len()
        );
        self.frames[self.frames.len() - 2].clearing
    }

    /// Drop the current clearing and the trail that led to it.
    pub fn pop_frame(&mut self) {
        if let Some(frame) = self.frames.pop() {
            self.visited.remove(&frame.clearing);
        }
        self.trail_chain.pop();
    }

    pub fn reset(&mut self) {
        self.frames.clear();
        self.trail_chain.clear();
        self.visited.clear();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The clearing on top of the stack, if any.
    pub fn current(&self) -> Option<ClearingId> {
        self.frames.last().map(|frame| frame.clearing)
    }

    /// Trails taken since the last reset, oldest first.
    pub fn trail_chain(&self) -> &[TrailId] {
        &self.trail_chain
    }
}
