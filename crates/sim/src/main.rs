//! Headless simulation runner.
//!
//! Loads content, builds a scenario and advances the world one tick at a
//! time with an automatic player. Every tick report is written to stdout as
//! one JSON line; logs go to stderr.
mod config;
mod logging;
mod pilot;

use std::io::Write;

use anyhow::Result;
use config::SimConfig;
use pilot::Pilot;
use vale_content::ContentFactory;
use vale_core::GameEngine;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::init(config.log_dir.as_deref())?;

    run(&config, &mut std::io::stdout().lock())
}

fn run(config: &SimConfig, out: &mut impl Write) -> Result<()> {
    let factory = ContentFactory::new(&config.data_dir);
    let content = factory.load_content()?;
    let mut scenario = factory.load_scenario(&config.scenario)?;
    if let Some(seed) = config.seed {
        scenario.seed = seed;
    }
    let mut state = content.build(&scenario)?;

    tracing::info!(
        scenario = %config.scenario,
        seed = scenario.seed,
        ticks = config.ticks,
        "simulation starting"
    );

    let mut pilot = Pilot::default();
    let mut engine = GameEngine::new(&mut state);
    let mut spawns = 0;
    let mut defeats = 0;
    for _ in 0..config.ticks {
        let report = engine.run_tick(content.env(), &mut pilot);
        spawns += report.spawn_count();
        defeats += report.defeated().count();

        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;

        if report.player_defeated {
            tracing::info!(tick = %report.tick, "player defeated, stopping");
            break;
        }
    }
    out.flush()?;

    let state = engine.state();
    tracing::info!(
        tick = %state.tick,
        weather = %state.weather.current(),
        actors = state.actors().count(),
        spawns,
        defeats,
        "simulation finished"
    );
    Ok(())
}
