//! Structured per-tick outcome log.
//!
//! The engine never builds display strings. Everything a front end needs to
//! narrate a tick is in the ordered [`GameEvent`] list of a [`TickReport`].

use crate::action::ActionOutcome;
use crate::state::{EntityId, Item, Location, MapId, StateError, StatusEffect, StatusName, Tick};
use crate::weather::Weather;

/// What brought an actor down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefeatCause {
    /// Damage from another actor's action.
    Action { by: EntityId },
    /// A status effect, e.g. bleeding out.
    Status(StatusName),
    /// Ended a turn on lethal terrain.
    Terrain,
}

/// Why a ground that was due to spawn did not.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnSkip {
    /// Every neighbouring tile is blocked, taken or lethal. Retried next tick.
    NoFreeTile,
    /// The ground names a template the catalog does not have.
    UnknownTemplate(String),
    Placement(StateError),
}

/// Summary of one map reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetSummary {
    /// `None` when every map was reset.
    pub map: Option<MapId>,
    pub despawned: Vec<EntityId>,
    pub restored: Vec<EntityId>,
    pub gates_relocked: usize,
    pub runes_cleared: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    WeatherChanged {
        from: Weather,
        to: Weather,
    },
    StatusTicked {
        actor: EntityId,
        status: StatusName,
        effect: Option<StatusEffect>,
    },
    StatusExpired {
        actor: EntityId,
        status: StatusName,
        terminal: Option<StatusEffect>,
    },
    Action(ActionOutcome),
    Defeated {
        actor: EntityId,
        template: String,
        at: Location,
        cause: DefeatCause,
    },
    ItemsDropped {
        at: Location,
        items: Vec<Item>,
    },
    Spawned {
        ground: Location,
        actor: EntityId,
        template: String,
        at: Location,
    },
    SpawnSkipped {
        ground: Location,
        reason: SpawnSkip,
    },
    Despawned {
        actor: EntityId,
    },
    MapReset(ResetSummary),
}

/// Everything that happened during one tick, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick: Tick,
    /// Weather in force after the tick's transition.
    pub weather: Weather,
    pub events: Vec<GameEvent>,
    pub player_defeated: bool,
}

impl TickReport {
    pub fn new(tick: Tick, weather: Weather) -> Self {
        Self {
            tick,
            weather,
            events: Vec::new(),
            player_defeated: false,
        }
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.events.iter().filter_map(|event| match event {
            GameEvent::Action(outcome) => Some(outcome),
            _ => None,
        })
    }

    pub fn spawn_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, GameEvent::Spawned { .. }))
            .count()
    }

    pub fn defeated(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.events.iter().filter_map(|event| match event {
            GameEvent::Defeated { actor, .. } => Some(*actor),
            _ => None,
        })
    }
}
