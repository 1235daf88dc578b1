mod common;

use common::{World, player};
use vale_core::{
    ActorTemplate, Capabilities, GameEngine, GameEvent, GameState, GroundKind, IdleInput,
    Location, SpawnEntry, SpawnSkip, SpawnableGround, TerrainKind, Weather, WeatherController,
};

fn graveyard(interval: u32) -> SpawnableGround {
    SpawnableGround::new(GroundKind::Graveyard, Location::at(0, 4, 4), interval)
        .with_template(SpawnEntry::always("wandering_undead"))
}

fn undead_template() -> ActorTemplate {
    ActorTemplate::builder("wandering_undead")
        .with(Capabilities::ENEMY)
        .build()
}

/// Runs `ticks` ticks, despawning every new actor right away so capacity
/// never gets in the way.
fn count_spawns(weather: Weather, ground: SpawnableGround, ticks: usize) -> usize {
    let world = World::open(9, 9).with_templates([undead_template()]);
    let mut state = GameState::new(3, WeatherController::fixed(weather));
    state.grounds.push(ground);

    let mut spawned = 0;
    for _ in 0..ticks {
        let mut engine = GameEngine::new(&mut state);
        let report = engine.run_tick(world.env(), &mut IdleInput);
        for event in &report.events {
            if let GameEvent::Spawned { actor, .. } = event {
                spawned += 1;
                engine.despawn(*actor);
            }
        }
    }
    spawned
}

#[test]
fn clear_weather_spawns_once_per_interval() {
    assert_eq!(count_spawns(Weather::Clear, graveyard(3), 12), 4);
}

#[test]
fn storm_interval_of_one_spawns_every_tick() {
    assert_eq!(count_spawns(Weather::Rainy, graveyard(1), 12), 12);

    let bush = SpawnableGround::new(GroundKind::Bush, Location::at(0, 4, 4), 3)
        .with_template(SpawnEntry::always("wandering_undead"));
    // Rain shortens a bush's interval to two after the first spawn.
    assert_eq!(count_spawns(Weather::Rainy, bush, 12), 5);
}

#[test]
fn capacity_holds_while_the_spawn_lives() {
    let world = World::open(9, 9).with_templates([undead_template()]);
    let mut state = GameState::new(3, WeatherController::default());
    state.grounds.push(graveyard(1).with_capacity(2));

    let mut total = 0;
    for _ in 0..6 {
        total += GameEngine::new(&mut state)
            .run_tick(world.env(), &mut IdleInput)
            .spawn_count();
    }
    assert_eq!(total, 2);
    assert!(state
        .actors()
        .all(|actor| actor.has(Capabilities::SPAWNED)));
}

#[test]
fn surrounded_ground_retries_next_tick() {
    let mut world = World::open(3, 3).with_templates([undead_template()]);
    if let Some(map) = world.atlas.map_mut(vale_core::MapId(0)) {
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2)] {
            map.set(Location::at(0, x, y).position, TerrainKind::Wall);
        }
    }
    let mut state = GameState::new(3, WeatherController::default());
    let blocker = state
        .spawn_actor(&world.atlas, &player(), Location::at(0, 2, 2))
        .unwrap();
    state.grounds.push(
        SpawnableGround::new(GroundKind::EmptyHut, Location::at(0, 1, 1), 1)
            .with_template(SpawnEntry::always("wandering_undead")),
    );

    let report = GameEngine::new(&mut state).run_tick(world.env(), &mut IdleInput);
    assert!(report.events.contains(&GameEvent::SpawnSkipped {
        ground: Location::at(0, 1, 1),
        reason: SpawnSkip::NoFreeTile,
    }));

    // The only free tile opens up: the very next tick spawns.
    GameEngine::new(&mut state).despawn(blocker);
    let report = GameEngine::new(&mut state).run_tick(world.env(), &mut IdleInput);
    assert_eq!(report.spawn_count(), 1);
}

#[test]
fn weather_gated_templates_wait_for_their_weather() {
    let world = World::open(9, 9).with_templates([undead_template()]);
    let rainy_only = SpawnableGround::new(GroundKind::Graveyard, Location::at(0, 4, 4), 1)
        .with_template(SpawnEntry::during("wandering_undead", Weather::Rainy));

    let mut state = GameState::new(3, WeatherController::cycling(3));
    state.grounds.push(rainy_only);

    let mut first_spawn = None;
    for _ in 0..6 {
        let report = GameEngine::new(&mut state).run_tick(world.env(), &mut IdleInput);
        if report.spawn_count() > 0 && first_spawn.is_none() {
            first_spawn = Some((report.tick.0, report.weather));
        }
    }
    assert_eq!(first_spawn, Some((4, Weather::Rainy)));
}
