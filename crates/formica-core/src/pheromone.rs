//! Pheromone — the distance hint ants write onto trails.
//!
//! Every trail carries two registers: an anthill-ward hint (how many steps
//! back to the anthill) and a food-ward hint (how many steps on to food).
//! Lower values mean shorter known distances. A register starts out
//! [`Pheromone::Unset`]; [`Pheromone::Blocked`] permanently removes a trail
//! from food search until someone reports a measured value through it.
//!
//! The order is total: `Unset < Value(a) < Value(b) < Blocked` for `a < b`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A distance hint on a trail register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pheromone {
    /// Nobody has reported through this trail yet.
    Unset,
    /// A measured step count.
    Value(i64),
    /// Excluded from selection.
    Blocked,
}

impl Pheromone {
    /// Marker written onto the food register of a trail that led into a
    /// dead end. Dead ends are excluded from food search, not measured.
    pub fn dead_end() -> Self {
        Pheromone::Blocked
    }

    /// Anything other than [`Pheromone::Unset`].
    pub fn is_recorded(&self) -> bool {
        !matches!(self, Pheromone::Unset)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Pheromone::Blocked)
    }

    /// The measured value, if this is a finite hint.
    pub fn value(&self) -> Option<i64> {
        match self {
            Pheromone::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether writing `candidate` over `self` is accepted when the
    /// improvement-only guard is active.
    ///
    /// A blocking write always wins; a write into an unset register always
    /// applies; otherwise the candidate must not be worse than what is there.
    pub fn accepts(&self, candidate: Pheromone) -> bool {
        candidate.is_blocked() || !self.is_recorded() || candidate <= *self
    }
}

impl Default for Pheromone {
    fn default() -> Self {
        Pheromone::Unset
    }
}

impl Ord for Pheromone {
    fn cmp(&self, other: &Self) -> Ordering {
        use Pheromone::*;
        match (self, other) {
            (Value(a), Value(b)) => a.cmp(b),
            (Unset, Unset) | (Blocked, Blocked) => Ordering::Equal,
            (Unset, _) | (_, Blocked) => Ordering::Less,
            (_, Unset) | (Blocked, _) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Pheromone {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pheromone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pheromone::Unset => write!(f, "unset"),
            Pheromone::Value(v) => write!(f, "{}", v),
            Pheromone::Blocked => write!(f, "blocked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order() {
        let mut hints = vec![
            Pheromone::Blocked,
            Pheromone::Value(4),
            Pheromone::Unset,
            Pheromone::Value(-2),
            Pheromone::Value(0),
        ];
        hints.sort();
        assert_eq!(
            hints,
            vec![
                Pheromone::Unset,
                Pheromone::Value(-2),
                Pheromone::Value(0),
                Pheromone::Value(4),
                Pheromone::Blocked,
            ]
        );
    }

    #[test]
    fn guard_rejects_only_worse_finite_values() {
        let current = Pheromone::Value(5);
        assert!(current.accepts(Pheromone::Value(3)));
        assert!(current.accepts(Pheromone::Value(5)));
        assert!(!current.accepts(Pheromone::Value(6)));
        assert!(current.accepts(Pheromone::Blocked));
    }

    #[test]
    fn unset_register_accepts_anything() {
        assert!(Pheromone::Unset.accepts(Pheromone::Value(1000)));
        assert!(Pheromone::Unset.accepts(Pheromone::Blocked));
    }

    #[test]
    fn blocked_register_yields_to_measurements() {
        assert!(Pheromone::Blocked.accepts(Pheromone::Value(12)));
        assert!(Pheromone::Blocked.accepts(Pheromone::Blocked));
    }

    #[test]
    fn dead_end_is_excluded_from_selection() {
        assert!(Pheromone::dead_end().is_blocked());
        assert_eq!(Pheromone::dead_end().value(), None);
    }
}
