//! Describe a generated world.

use anyhow::Result;
use colored::Colorize;
use formica::prelude::*;

use crate::topology::{generate, WorldShape};

pub fn run(shape: &WorldShape) -> Result<()> {
    let world = generate(shape)?;

    println!(
        "{} {:?} world: {} clearings, {} trails, food target {}",
        "→".blue(),
        shape.topology,
        world.clearings().len().to_string().cyan(),
        world.trails().len().to_string().cyan(),
        world.food_target().to_string().cyan()
    );
    println!();

    for clearing in world.clearings() {
        let label = if clearing.id() == world.anthill() {
            format!("{} (anthill)", clearing.name()).green().bold()
        } else if clearing.has_food() {
            clearing.name().yellow()
        } else {
            clearing.name().normal()
        };
        let neighbours: Vec<&str> = clearing
            .trails()
            .iter()
            .map(|&t| world.clearing(world.trail(t).to()).name())
            .collect();
        println!(
            "  {:<20} food {:>3}  capacity {:<4}  → {}",
            label,
            clearing.food(),
            clearing.capacity().to_string(),
            neighbours.join(", ")
        );
    }

    Ok(())
}
