mod common;

use common::{World, player, undead};
use vale_core::{
    ActionKind, ActorBehaviour, ActorTemplate, Capabilities, GameEngine, GameState, IdleInput,
    Location, WeatherController,
};

#[test]
fn hostile_in_range_is_always_attacked() {
    let world = World::open(7, 7);
    let env = world.env();

    // Every surrounding tile is free, so Follow and Wander would both propose.
    for (x, y) in [(2, 2), (3, 2), (4, 2), (2, 3), (4, 3), (2, 4), (3, 4), (4, 4)] {
        let mut state = GameState::new(x as u64 * 31 + y as u64, WeatherController::default());
        let hero = state
            .spawn_actor(&world.atlas, &player(), Location::at(0, 3, 3))
            .unwrap();
        let undead = state
            .spawn_actor(&world.atlas, &undead(), Location::at(0, x, y))
            .unwrap();
        state.actor_mut(undead).unwrap().follow_target = Some(hero);

        let engine = GameEngine::new(&mut state);
        assert_eq!(engine.decide(env, undead).kind(), ActionKind::Attack, "at ({x}, {y})");
    }
}

#[test]
fn follow_wins_over_wander_when_nothing_is_in_reach() {
    let world = World::open(9, 9);
    let mut state = GameState::new(5, WeatherController::default());
    let hero = state
        .spawn_actor(&world.atlas, &player(), Location::at(0, 8, 4))
        .unwrap();
    let undead = state
        .spawn_actor(&world.atlas, &undead(), Location::at(0, 2, 4))
        .unwrap();
    state.actor_mut(undead).unwrap().follow_target = Some(hero);

    for _ in 0..4 {
        GameEngine::new(&mut state).run_tick(world.env(), &mut IdleInput);
    }
    assert_eq!(state.actor(undead).unwrap().location, Location::at(0, 6, 4));
}

#[test]
fn wanderer_with_room_always_moves() {
    let world = World::open(5, 5);
    let wanderer = ActorTemplate::builder("living_branch")
        .with(Capabilities::ENEMY)
        .behaviours([ActorBehaviour::Wander])
        .build();
    let mut state = GameState::new(12, WeatherController::default());
    state
        .spawn_actor(&world.atlas, &wanderer, Location::at(0, 2, 2))
        .unwrap();

    for _ in 0..20 {
        let report = GameEngine::new(&mut state).run_tick(world.env(), &mut IdleInput);
        let outcome = report.outcomes().next().unwrap();
        assert_eq!(outcome.kind, ActionKind::Move);
        assert!(outcome.is_performed());
    }
}

#[test]
fn same_seed_replays_identically() {
    let world = World::open(8, 8);
    let run = |seed: u64| {
        let mut state = GameState::new(seed, WeatherController::cycling(2));
        state
            .spawn_actor(&world.atlas, &player(), Location::at(0, 0, 0))
            .unwrap();
        for (x, y) in [(4, 4), (6, 2), (2, 6)] {
            state
                .spawn_actor(&world.atlas, &undead(), Location::at(0, x, y))
                .unwrap();
        }
        (0..15)
            .map(|_| GameEngine::new(&mut state).run_tick(world.env(), &mut IdleInput))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(99), run(99));
}
