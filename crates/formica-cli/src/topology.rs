//! Demo worlds for the CLI.

use clap::ValueEnum;
use formica::prelude::*;

/// Shape of a generated world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Topology {
    /// Anthill at one end of a chain, food at the other.
    Line,
    /// Anthill on a cycle, food on the far side.
    Ring,
    /// Square lattice, anthill in one corner, food in the other three.
    Grid,
}

/// Parameters for [`generate`].
#[derive(Debug, Clone, Copy)]
pub struct WorldShape {
    pub topology: Topology,
    /// Clearings in a line or ring (anthill excluded); side length of a grid.
    pub size: usize,
    /// Units of food per source.
    pub food: u64,
    /// 0 means unbounded.
    pub clearing_capacity: usize,
    /// 0 means unbounded.
    pub trail_capacity: usize,
}

fn capacity(limit: usize) -> Capacity {
    match limit {
        0 => Capacity::Infinite,
        n => Capacity::Finite(n),
    }
}

pub fn generate(shape: &WorldShape) -> Result<World> {
    if shape.size < 2 {
        return Err(FormicaError::invalid_config(
            "size",
            shape.size.to_string(),
            "a world needs at least two clearings besides the anthill",
        ));
    }
    let clearing_cap = capacity(shape.clearing_capacity);
    let trail_cap = capacity(shape.trail_capacity);
    let mut b = WorldBuilder::new();

    match shape.topology {
        Topology::Line | Topology::Ring => {
            let hill = b.anthill("anthill");
            let food_at = match shape.topology {
                Topology::Line => shape.size,
                _ => (shape.size + 1) / 2,
            };
            let mut previous = hill;
            for i in 1..=shape.size {
                let food = if i == food_at { shape.food } else { 0 };
                let next = b.clearing(format!("c{i}"), food, clearing_cap);
                b.trail(previous, next, trail_cap);
                previous = next;
            }
            if shape.topology == Topology::Ring {
                b.trail(previous, hill, trail_cap);
            }
        }
        Topology::Grid => {
            let n = shape.size;
            let mut ids = Vec::with_capacity(n * n);
            for row in 0..n {
                for col in 0..n {
                    let id = if row == 0 && col == 0 {
                        b.anthill("anthill")
                    } else {
                        let corner = (row == 0 || row == n - 1) && (col == 0 || col == n - 1);
                        let food = if corner { shape.food } else { 0 };
                        b.clearing(format!("r{row}c{col}"), food, clearing_cap)
                    };
                    ids.push(id);
                }
            }
            for row in 0..n {
                for col in 0..n {
                    if col + 1 < n {
                        b.trail(ids[row * n + col], ids[row * n + col + 1], trail_cap);
                    }
                    if row + 1 < n {
                        b.trail(ids[row * n + col], ids[(row + 1) * n + col], trail_cap);
                    }
                }
            }
        }
    }

    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(topology: Topology, size: usize) -> WorldShape {
        WorldShape {
            topology,
            size,
            food: 3,
            clearing_capacity: 2,
            trail_capacity: 0,
        }
    }

    #[test]
    fn line_puts_food_at_the_far_end() {
        let world = generate(&shape(Topology::Line, 4)).unwrap();
        assert_eq!(world.clearings().len(), 5);
        assert_eq!(world.trails().len(), 8);
        let end = world.find("c4").unwrap();
        assert_eq!(world.clearing(end).food(), 3);
        assert_eq!(world.food_target(), 3);
    }

    #[test]
    fn ring_closes_back_on_the_anthill() {
        let world = generate(&shape(Topology::Ring, 5)).unwrap();
        let last = world.find("c5").unwrap();
        assert!(world.trail_between(last, world.anthill()).is_some());
        assert_eq!(world.clearing(world.find("c3").unwrap()).food(), 3);
    }

    #[test]
    fn grid_feeds_the_corners_away_from_the_anthill() {
        let world = generate(&shape(Topology::Grid, 3)).unwrap();
        assert_eq!(world.clearings().len(), 9);
        assert_eq!(world.trails().len(), 24);
        for name in ["r0c2", "r2c0", "r2c2"] {
            assert_eq!(world.clearing(world.find(name).unwrap()).food(), 3, "{name}");
        }
        assert_eq!(world.food_target(), 9);
    }

    #[test]
    fn tiny_worlds_are_rejected() {
        assert!(generate(&shape(Topology::Line, 1)).is_err());
    }
}
