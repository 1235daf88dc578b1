//! The shipped data directory loads, builds and runs.

use vale_content::{BUNDLED_DATA_DIR, ContentFactory};
use vale_core::{
    Capabilities, GameEngine, GameEvent, IdleInput, Location, MapId, MapOracle,
    StatusName, TemplateOracle, TickReport, Weather,
};

const ROSTER: [&str; 9] = [
    "player",
    "blacksmith",
    "wandering_undead",
    "hollow_soldier",
    "red_wolf",
    "forest_keeper",
    "living_branch",
    "eldentree_guardian",
    "forest_watcher",
];

fn factory() -> ContentFactory {
    ContentFactory::new(BUNDLED_DATA_DIR)
}

#[test]
fn roster_and_maps_load() {
    let content = factory().load_content().unwrap();

    assert_eq!(content.templates.len(), ROSTER.len());
    for id in ROSTER {
        assert!(content.templates.template(id).is_some(), "{id}");
    }
    let branch = content.templates.template("living_branch").unwrap();
    assert!(branch.capabilities.contains(Capabilities::VOID_IMMUNE));
    let watcher = content.templates.template("forest_watcher").unwrap();
    assert!(watcher.capabilities.contains(Capabilities::BOSS | Capabilities::WEATHER_CONTROLLER));

    assert_eq!(
        content.atlas.map_ids().collect::<Vec<_>>(),
        vec![MapId(0), MapId(1)]
    );
    assert_eq!(
        content.atlas.gate_destination(Location::at(0, 19, 3)),
        Some(Location::at(1, 1, 3))
    );
}

#[test]
fn every_scenario_builds() {
    let factory = factory();
    let content = factory.load_content().unwrap();

    for name in ["default", "graveyard"] {
        let scenario = factory.load_scenario(name).unwrap();
        let state = content.build(&scenario).unwrap();
        assert!(state.player().is_some(), "{name}");
    }
}

fn run(ticks: usize) -> Vec<TickReport> {
    let factory = factory();
    let content = factory.load_content().unwrap();
    let mut state = content.build(&factory.load_scenario("default").unwrap()).unwrap();

    let mut engine = GameEngine::new(&mut state);
    let mut reports = Vec::new();
    for _ in 0..ticks {
        let report = engine.run_tick(content.env(), &mut IdleInput);
        let done = report.player_defeated;
        reports.push(report);
        if done {
            break;
        }
    }
    reports
}

#[test]
fn default_scenario_is_reproducible() {
    let first = run(30);
    assert_eq!(first, run(30));
}

#[test]
fn default_scenario_cycles_the_weather() {
    let reports = run(7);
    let weathers: Vec<Weather> = reports.iter().map(|report| report.weather).collect();
    assert_eq!(&weathers[..4], &[Weather::Sunny, Weather::Sunny, Weather::Sunny, Weather::Rainy]);
    assert!(matches!(
        reports[0].events.first(),
        Some(GameEvent::WeatherChanged { .. })
    ));
}

#[test]
fn wolves_are_empowered_exactly_while_sunny() {
    let factory = factory();
    let content = factory.load_content().unwrap();
    let mut state = content.build(&factory.load_scenario("default").unwrap()).unwrap();

    let mut engine = GameEngine::new(&mut state);
    let mut wolves_seen = 0;
    for _ in 0..60 {
        let report = engine.run_tick(content.env(), &mut IdleInput);
        for wolf in engine
            .state()
            .actors()
            .filter(|actor| actor.template == "red_wolf")
        {
            wolves_seen += 1;
            assert_eq!(
                wolf.ledger.statuses().has(StatusName::Empowered),
                report.weather == Weather::Sunny,
                "{} at {}",
                wolf.id,
                report.tick
            );
        }
    }
    assert!(wolves_seen > 0);
}
