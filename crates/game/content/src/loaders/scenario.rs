//! Scenario loader.
//!
//! A scenario places actors, spawnable grounds and open gates on the maps of
//! an atlas. Template ids and tiles are checked when the scenario is built,
//! not here.

use std::path::Path;

use vale_core::Scenario;

use crate::loaders::{LoadResult, read_file};

pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        for ground in &scenario.grounds {
            if ground.interval == 0 {
                anyhow::bail!("ground at {} has a zero spawn interval", ground.at);
            }
            if ground.templates.is_empty() {
                anyhow::bail!("ground at {} has nothing to spawn", ground.at);
            }
            if ground.chance_percent > 100 {
                anyhow::bail!(
                    "ground at {} spawns with chance {} (must be 0..=100)",
                    ground.at,
                    ground.chance_percent
                );
            }
        }

        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vale_core::{GroundKind, Location, Weather, WeatherSetup};

    const CROSSROADS: &str = r#"(
        seed: 7,
        weather: Cycling(Some(4)),
        actors: [
            (template: "player", at: (map: (0), position: (x: 1, y: 1))),
            (template: "red_wolf", at: (map: (0), position: (x: 3, y: 1)), follow_player: true),
        ],
        grounds: [
            (
                kind: Bush,
                at: (map: (0), position: (x: 0, y: 3)),
                interval: 2,
                templates: [(template: "red_wolf"), (template: "forest_keeper", weather: Some(Rainy))],
                weather_intervals: [(Sunny, 1)],
            ),
        ],
        unlocked_gates: [(map: (0), position: (x: 4, y: 0))],
    )"#;

    #[test]
    fn parses_placements_and_grounds() {
        let scenario = ScenarioLoader::parse(CROSSROADS).unwrap();

        assert_eq!(scenario.seed, 7);
        assert_eq!(scenario.weather, WeatherSetup::Cycling(Some(4)));
        assert_eq!(scenario.actors.len(), 2);
        assert!(!scenario.actors[0].follow_player);
        assert!(scenario.actors[1].follow_player);

        let ground = &scenario.grounds[0];
        assert_eq!(ground.kind, GroundKind::Bush);
        assert_eq!(ground.capacity, 1);
        assert_eq!(ground.chance_percent, 100);
        assert_eq!(ground.templates[1].weather, Some(Weather::Rainy));
        assert_eq!(ground.weather_intervals, vec![(Weather::Sunny, 1)]);
        assert_eq!(scenario.unlocked_gates, vec![Location::at(0, 4, 0)]);
    }

    #[test]
    fn weather_defaults_to_clear() {
        let scenario = ScenarioLoader::parse("(seed: 1, actors: [])").unwrap();
        assert_eq!(scenario.weather, WeatherSetup::Fixed(Weather::Clear));
        assert!(scenario.grounds.is_empty());
    }

    #[test]
    fn idle_grounds_are_rejected() {
        let zero = CROSSROADS.replace("interval: 2", "interval: 0");
        assert!(ScenarioLoader::parse(&zero).is_err());

        let certain = CROSSROADS.replace("interval: 2,", "interval: 2, chance_percent: 101,");
        assert!(ScenarioLoader::parse(&certain).is_err());
    }
}
