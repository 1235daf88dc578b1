//! Initial world setup.
//!
//! A [`Scenario`] is plain data: which templates stand where, which grounds
//! spawn what, how the weather behaves and which gates start open. Building
//! it against an environment yields a fresh [`GameState`].

use crate::env::{GameEnv, MapOracle, OracleError, TemplateOracle, TerrainKind};
use crate::error::{ErrorSeverity, GameError};
use crate::spawn::{GroundKind, SpawnEntry, SpawnableGround};
use crate::state::{GameState, Location, StateError};
use crate::weather::{Weather, WeatherController};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error("unknown actor template `{0}`")]
    UnknownTemplate(String),

    #[error("cannot place an actor on blocked tile {0}")]
    Blocked(Location),

    #[error("gate {0} is not a gate tile")]
    NotAGate(Location),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ScenarioError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::State(error) => error.severity(),
            Self::Oracle(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTemplate(_) => "SCENARIO_UNKNOWN_TEMPLATE",
            Self::Blocked(_) => "SCENARIO_BLOCKED",
            Self::NotAGate(_) => "SCENARIO_NOT_A_GATE",
            Self::State(error) => error.error_code(),
            Self::Oracle(error) => error.error_code(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherSetup {
    Fixed(Weather),
    /// Sunny and Rainy phases. `None` takes the period from the game config.
    Cycling(Option<u32>),
}

impl Default for WeatherSetup {
    fn default() -> Self {
        WeatherSetup::Fixed(Weather::Clear)
    }
}

/// One hand-placed actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub template: String,
    pub at: Location,
    /// Starts out tracking the player.
    #[cfg_attr(feature = "serde", serde(default))]
    pub follow_player: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundSpec {
    pub kind: GroundKind,
    pub at: Location,
    pub interval: u32,
    #[cfg_attr(feature = "serde", serde(default = "GroundSpec::default_capacity"))]
    pub capacity: u32,
    #[cfg_attr(feature = "serde", serde(default = "GroundSpec::default_chance"))]
    pub chance_percent: u32,
    pub templates: Vec<SpawnEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weather_intervals: Vec<(Weather, u32)>,
}

impl GroundSpec {
    #[cfg(feature = "serde")]
    fn default_capacity() -> u32 {
        1
    }

    #[cfg(feature = "serde")]
    fn default_chance() -> u32 {
        100
    }

    pub fn to_ground(&self) -> SpawnableGround {
        let ground = SpawnableGround::new(self.kind, self.at, self.interval)
            .with_capacity(self.capacity)
            .with_chance(self.chance_percent);
        let ground = self
            .templates
            .iter()
            .cloned()
            .fold(ground, SpawnableGround::with_template);
        self.weather_intervals
            .iter()
            .fold(ground, |ground, (weather, interval)| {
                ground.with_interval_during(*weather, *interval)
            })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub seed: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weather: WeatherSetup,
    /// Placed in order; the order becomes the turn order.
    pub actors: Vec<Placement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grounds: Vec<GroundSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlocked_gates: Vec<Location>,
}

impl Scenario {
    /// Builds the initial state.
    ///
    /// # Errors
    ///
    /// Fails on unknown templates, placements on blocked or taken tiles,
    /// unlock entries that are not gates, and a missing map or template
    /// oracle.
    pub fn build(&self, env: &GameEnv<'_>) -> Result<GameState, ScenarioError> {
        let map = env.map()?;
        let templates = env.templates()?;

        let weather = match self.weather {
            WeatherSetup::Fixed(weather) => WeatherController::fixed(weather),
            WeatherSetup::Cycling(period) => {
                let period = match period {
                    Some(period) => period,
                    None => env.config()?.weather_switch_period,
                };
                WeatherController::cycling(period)
            }
        };
        let mut state = GameState::new(self.seed, weather);

        let mut followers = Vec::new();
        for placement in &self.actors {
            let template = templates
                .template(&placement.template)
                .ok_or_else(|| ScenarioError::UnknownTemplate(placement.template.clone()))?;
            let passable = state
                .tile_view(map, placement.at)
                .is_none_or(|view| view.is_passable());
            if !passable {
                return Err(ScenarioError::Blocked(placement.at));
            }

            let id = state.spawn_actor(map, template, placement.at)?;
            if let Some(actor) = state.actor_mut(id) {
                if let Some(status) = actor.weather_status(weather.current()) {
                    actor.ledger.apply_status(status);
                }
            }
            if placement.follow_player {
                followers.push(id);
            }
        }

        let player = state.player().map(|player| player.id);
        for id in followers {
            if let Some(actor) = state.actor_mut(id) {
                actor.follow_target = player;
            }
        }

        for gate in &self.unlocked_gates {
            let is_gate = map
                .tile(*gate)
                .is_some_and(|tile| tile.terrain() == TerrainKind::LockedGate);
            if !is_gate {
                return Err(ScenarioError::NotAGate(*gate));
            }
            state.world.unlock(*gate);
        }

        state.grounds = self.grounds.iter().map(GroundSpec::to_ground).collect();
        tracing::info!(
            seed = self.seed,
            actors = self.actors.len(),
            grounds = self.grounds.len(),
            "scenario built"
        );
        Ok(state)
    }
}
