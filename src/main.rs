//! Boulder Core
//!
//! Demo shell: loads a level, feeds a scripted input sequence through the
//! command queue, advances the simulation and logs what happens.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use boulder::{
    VERSION, Level, Simulation,
    config::SimConfig,
    game::{
        events::GameEventData,
        input::{parse_script, ScriptStep},
        render,
        tick::replay,
    },
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SimConfig::from_env();

    info!("Boulder Core v{}", VERSION);
    info!("Tick Rate: {} Hz", config.tick_rate);

    let level = match &config.level_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading level {}", path.display()))?;
            Level::from_json(&json).with_context(|| format!("loading level {}", path.display()))?
        }
        None => Level::default_level(),
    };
    info!(
        "Level: {}x{}, player start {}",
        level.width(),
        level.height(),
        level.player_start()
    );

    let steps = parse_script(&config.script).context("parsing input script")?;
    run(&level, &steps, &config)
}

/// Run the script, then keep ticking until `max_ticks`.
fn run(level: &Level, steps: &[ScriptStep], config: &SimConfig) -> anyhow::Result<()> {
    let mut sim = Simulation::new(level);
    info!("Initial grid:\n{}", render::to_text(sim.grid()));

    let mut script = steps.iter();
    let mut total_events = 0;
    let mut total_mutations = 0;

    while sim.tick() < config.max_ticks {
        // Queue everything up to the next tick marker
        for step in script.by_ref() {
            match step {
                ScriptStep::Input(direction) => sim.push_input(*direction),
                ScriptStep::Tick => break,
            }
        }

        let result = sim.advance();
        total_events += result.events.len();
        total_mutations += result.events.iter().filter(|e| e.is_mutation()).count();

        for event in &result.events {
            match &event.data {
                GameEventData::LocksRemoved { class, count } if *count > 0 => {
                    info!("Tick {}: {} locks of class {} opened", event.tick, count, class.index());
                }
                GameEventData::BlockPushed { tile, from, to } => {
                    info!("Tick {}: pushed {:?} {} -> {}", event.tick, tile, from, to);
                }
                _ => {}
            }
        }

        if result.intents_applied > 0 {
            info!("Tick {}:\n{}", result.tick, render::to_text(sim.grid()));
        }
    }

    // Print final results
    info!("=== Final State (tick {}) ===", sim.tick());
    info!("\n{}", render::to_text(sim.grid()));
    info!("Player at {}", sim.player().position());
    info!("Total events: {} ({} changed the grid)", total_events, total_mutations);

    let hash = sim.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    let mut recording = sim.recording().clone();
    recording.finalize(sim.tick());
    let (replayed, _) = replay(level, &recording, recording.end_tick());
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    println!("{}", serde_json::to_string(&sim.frame())?);
    Ok(())
}
