//! Spawnable grounds.
//!
//! A ground counts its cooldown down once per tick. When it reaches zero and
//! the ground owns fewer living actors than its capacity, it picks an
//! eligible template (some are weather-gated), rolls its spawn chance, and
//! places the new actor on the first free neighbouring tile. The cooldown
//! then resets to the interval for the current weather.
//!
//! A ground holding no free neighbour skips the spawn *without* resetting its
//! cooldown, so it tries again on the next tick. Ownership is a weak list of
//! ids: removing a ground never removes the actors it created.

use crate::env::{GameEnv, MapOracle, RollContext, TemplateOracle, compute_seed};
use crate::events::{GameEvent, SpawnSkip};
use crate::state::{Capabilities, EntityId, GameState, Location};
use crate::weather::Weather;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroundKind {
    /// Grows back faster in the rain.
    Bush,
    Graveyard,
    /// Busier in the sun.
    EmptyHut,
}

impl GroundKind {
    /// Interval this kind uses under `weather` when the ground sets no
    /// explicit override.
    pub fn modulate(self, interval: u32, weather: Weather) -> u32 {
        let modulated = match (self, weather) {
            (GroundKind::Bush, Weather::Rainy) => interval * 2 / 3,
            (GroundKind::EmptyHut, Weather::Sunny) => interval / 2,
            _ => interval,
        };
        modulated.max(1)
    }
}

/// One template a ground may produce.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEntry {
    pub template: String,
    /// Only eligible while this weather holds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weather: Option<Weather>,
}

impl SpawnEntry {
    pub fn always(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            weather: None,
        }
    }

    pub fn during(template: impl Into<String>, weather: Weather) -> Self {
        Self {
            template: template.into(),
            weather: Some(weather),
        }
    }

    fn is_eligible(&self, weather: Weather) -> bool {
        self.weather.is_none_or(|required| required == weather)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnableGround {
    kind: GroundKind,
    location: Location,
    interval: u32,
    weather_intervals: Vec<(Weather, u32)>,
    capacity: u32,
    chance_percent: u32,
    templates: Vec<SpawnEntry>,
    cooldown: u32,
    spawned: Vec<EntityId>,
}

impl SpawnableGround {
    /// A ground with capacity 1, a certain spawn chance and no templates.
    pub fn new(kind: GroundKind, location: Location, interval: u32) -> Self {
        let interval = interval.max(1);
        Self {
            kind,
            location,
            interval,
            weather_intervals: Vec::new(),
            capacity: 1,
            chance_percent: 100,
            templates: Vec::new(),
            cooldown: interval,
            spawned: Vec::new(),
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_chance(mut self, percent: u32) -> Self {
        self.chance_percent = percent;
        self
    }

    pub fn with_template(mut self, entry: SpawnEntry) -> Self {
        self.templates.push(entry);
        self
    }

    /// Overrides the interval used while `weather` holds.
    pub fn with_interval_during(mut self, weather: Weather, interval: u32) -> Self {
        self.weather_intervals.retain(|(w, _)| *w != weather);
        self.weather_intervals.push((weather, interval.max(1)));
        self
    }

    pub fn kind(&self) -> GroundKind {
        self.kind
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn templates(&self) -> &[SpawnEntry] {
        &self.templates
    }

    /// Ids this ground created that were alive at its last evaluation.
    pub fn spawned(&self) -> &[EntityId] {
        &self.spawned
    }

    pub fn interval_for(&self, weather: Weather) -> u32 {
        self.weather_intervals
            .iter()
            .find(|(w, _)| *w == weather)
            .map(|(_, interval)| *interval)
            .unwrap_or_else(|| self.kind.modulate(self.interval, weather))
    }

    /// Forgets owned actors and restarts the cooldown from the base interval.
    pub fn reset(&mut self) {
        self.cooldown = self.interval;
        self.spawned.clear();
    }

    /// Runs one spawn cycle. `index` keeps the rolls of different grounds
    /// apart.
    pub(crate) fn tick(
        &mut self,
        index: u32,
        state: &mut GameState,
        env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) {
        self.spawned
            .retain(|id| state.actor(*id).is_some_and(|actor| actor.is_alive()));
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown > 0 || self.spawned.len() >= self.capacity as usize {
            return;
        }

        let (Ok(map), Ok(templates), Ok(rng)) = (env.map(), env.templates(), env.rng()) else {
            tracing::warn!(ground = %self.location, "spawn skipped: environment incomplete");
            return;
        };

        let weather = state.weather.current();
        let eligible: Vec<&SpawnEntry> = self
            .templates
            .iter()
            .filter(|entry| entry.is_eligible(weather))
            .collect();
        if eligible.is_empty() {
            tracing::debug!(ground = %self.location, %weather, "no template eligible");
            return;
        }

        let chance_seed = compute_seed(state.seed, state.tick.0, index, RollContext::SpawnChance, 0);
        if !rng.chance(chance_seed, self.chance_percent) {
            tracing::debug!(ground = %self.location, "spawn roll failed");
            self.cooldown = self.interval_for(weather);
            return;
        }

        let pick_seed = compute_seed(state.seed, state.tick.0, index, RollContext::SpawnTemplate, 0);
        let entry = eligible[rng.pick(pick_seed, eligible.len())];
        let Some(template) = templates.template(&entry.template) else {
            tracing::warn!(ground = %self.location, template = %entry.template, "unknown template");
            events.push(GameEvent::SpawnSkipped {
                ground: self.location,
                reason: SpawnSkip::UnknownTemplate(entry.template.clone()),
            });
            self.cooldown = self.interval_for(weather);
            return;
        };

        let immune = template.capabilities.contains(Capabilities::VOID_IMMUNE);
        let Some(at) = free_tile(map, state, self.location, immune) else {
            tracing::debug!(ground = %self.location, template = %template.id, "no free tile");
            events.push(GameEvent::SpawnSkipped {
                ground: self.location,
                reason: SpawnSkip::NoFreeTile,
            });
            return;
        };

        let id = match state.spawn_actor(map, template, at) {
            Ok(id) => id,
            Err(error) => {
                events.push(GameEvent::SpawnSkipped {
                    ground: self.location,
                    reason: SpawnSkip::Placement(error),
                });
                return;
            }
        };
        if let Some(actor) = state.actor_mut(id) {
            actor.capabilities |= Capabilities::SPAWNED;
            if let Some(status) = actor.weather_status(weather) {
                actor.ledger.apply_status(status);
            }
        }

        tracing::info!(ground = %self.location, actor = %id, template = %template.id, %at, "spawned");
        self.spawned.push(id);
        self.cooldown = self.interval_for(weather);
        events.push(GameEvent::Spawned {
            ground: self.location,
            actor: id,
            template: template.id.clone(),
            at,
        });
    }
}

/// First neighbour of `origin` (in direction order) an actor could appear on.
fn free_tile<M>(map: &M, state: &GameState, origin: Location, void_immune: bool) -> Option<Location>
where
    M: MapOracle + ?Sized,
{
    map.neighbors(origin).into_iter().find_map(|(_, next)| {
        let view = state.tile_view(map, next)?;
        (view.is_enterable() && (void_immune || !view.is_lethal())).then_some(next)
    })
}

/// Runs every ground once, in order.
pub(crate) fn run(state: &mut GameState, env: &GameEnv<'_>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut grounds = std::mem::take(&mut state.grounds);
    for (index, ground) in grounds.iter_mut().enumerate() {
        ground.tick(index as u32, state, env, &mut events);
    }
    state.grounds = grounds;
    events
}
