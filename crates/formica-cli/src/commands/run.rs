//! Run a colony.

use anyhow::{Context, Result};
use colored::Colorize;
use formica::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::topology::{generate, WorldShape};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

pub fn run(
    shape: &WorldShape,
    colony: &ColonyConfig,
    timeout: Option<u64>,
    events: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let world = Arc::new(generate(shape)?);
    let ants = colony.ants()?;

    println!(
        "{} Releasing {} ants into a {:?} world ({} clearings, food target {})...",
        "→".blue(),
        ants.len().to_string().cyan(),
        shape.topology,
        world.clearings().len().to_string().cyan(),
        world.food_target().to_string().cyan()
    );

    let log = Arc::new(EventLog::new());
    let recorder: Arc<dyn Recorder> = Arc::new(Tee(vec![log.clone(), Arc::new(TracingRecorder)]));
    let simulation = Simulator::new(Arc::clone(&world), recorder).spawn(ants)?;

    if let Some(secs) = timeout {
        let deadline = Instant::now() + Duration::from_secs(secs);
        while !simulation.is_finished() && Instant::now() < deadline {
            thread::sleep(POLL_INTERVAL);
        }
        if !simulation.is_finished() {
            println!("{} Timed out after {}s, cancelling", "!".yellow().bold(), secs);
            simulation.cancel();
        }
    }

    let report = simulation.join()?;

    println!();
    if report.target_reached() {
        println!("{} Food target reached!", "✓".green().bold());
    } else {
        println!("{} Colony stopped short of its target", "✗".red().bold());
    }
    println!(
        "  Collected: {} / {}",
        report.collected.to_string().green(),
        report.food_target.to_string().cyan()
    );
    println!(
        "  Outcomes:  {} finished, {} terminated, {} eaten",
        report.count(DespawnReason::EnoughFoodCollected).to_string().green(),
        report.count(DespawnReason::Terminated).to_string().yellow(),
        report.count(DespawnReason::DiscoveredAndEaten).to_string().red()
    );
    println!("  Events:    {}", log.len().to_string().cyan());
    println!("  Elapsed:   {:.2?}", report.elapsed);

    if verbose {
        println!();
        for ant in &report.ants {
            println!(
                "  {:<10} {:<22} {} deliveries",
                ant.name,
                format!("{:?}", ant.outcome),
                ant.deliveries
            );
        }
    }

    if let Some(path) = events {
        std::fs::write(path, log.to_json()?)
            .with_context(|| format!("writing events to {}", path.display()))?;
        println!("{} Events written to {}", "✓".green(), path.display().to_string().cyan());
    }

    Ok(())
}
