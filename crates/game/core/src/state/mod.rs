//! Authoritative simulation state.
//!
//! [`GameState`] is the single process-wide value that every tick mutates. It
//! is passed by reference into the engine; nothing in the crate keeps global
//! or static mutable state.
mod actor;
mod common;
mod item;
mod ledger;
mod status;
mod world;

pub use actor::{ActorState, Capabilities, LootEntry};
pub use common::{Direction, EntityId, Location, MapId, Position, Tick};
pub use item::{Inventory, Item, ItemKind, Weapon, WeaponKind, WeaponSkill};
pub use ledger::{
    AdjustOutcome, Attribute, AttributeLedger, ResourceMeter, StatusEffect, StatusEvent,
};
pub use status::{Status, StatusApplication, StatusExpiry, StatusKind, StatusName, StatusSet};
pub use world::{TileView, WorldState};

use crate::env::{ActorTemplate, MapOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::spawn::SpawnableGround;
use crate::weather::WeatherController;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("location {0} is outside every map")]
    OutOfBounds(Location),

    #[error("location {0} is occupied")]
    Occupied(Location),

    #[error("occupancy desync for actor {actor} at {location}")]
    OccupancyDesync { actor: EntityId, location: Location },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) | Self::OutOfBounds(_) => ErrorSeverity::Validation,
            Self::Occupied(_) => ErrorSeverity::Recoverable,
            Self::OccupancyDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "STATE_ACTOR_NOT_FOUND",
            Self::OutOfBounds(_) => "STATE_OUT_OF_BOUNDS",
            Self::Occupied(_) => "STATE_OCCUPIED",
            Self::OccupancyDesync { .. } => "STATE_OCCUPANCY_DESYNC",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Base seed mixed into every random draw.
    pub seed: u64,
    /// Last completed tick.
    pub tick: Tick,
    /// Number of actions executed so far, including no-ops.
    pub nonce: u64,
    /// Living actors in creation order. This order is the turn order.
    actors: Vec<ActorState>,
    next_id: u32,
    pub world: WorldState,
    pub weather: WeatherController,
    pub grounds: Vec<SpawnableGround>,
}

impl GameState {
    pub fn new(seed: u64, weather: WeatherController) -> Self {
        Self {
            seed,
            tick: Tick::ZERO,
            nonce: 0,
            actors: Vec::new(),
            next_id: EntityId::PLAYER.0,
            world: WorldState::default(),
            weather,
            grounds: Vec::new(),
        }
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    /// Actors in creation order.
    pub fn actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.iter()
    }

    pub(crate) fn actors_mut(&mut self) -> impl Iterator<Item = &mut ActorState> {
        self.actors.iter_mut()
    }

    /// Snapshot of actor ids in creation order.
    pub fn actor_ids(&self) -> Vec<EntityId> {
        self.actors.iter().map(|actor| actor.id).collect()
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.actors.iter().find(|actor| actor.is_player())
    }

    pub fn occupant_at(&self, location: Location) -> Option<&ActorState> {
        self.world
            .occupant_at(location)
            .and_then(|id| self.actor(id))
    }

    pub fn tile_view<M>(&self, map: &M, location: Location) -> Option<TileView>
    where
        M: MapOracle + ?Sized,
    {
        TileView::from_parts(map, &self.world, location)
    }

    /// Instantiates `template` at `location`.
    ///
    /// The location must exist and be free. Terrain is not checked here;
    /// callers decide whether lethal or blocking tiles are acceptable.
    pub fn spawn_actor<M>(
        &mut self,
        map: &M,
        template: &ActorTemplate,
        location: Location,
    ) -> Result<EntityId, StateError>
    where
        M: MapOracle + ?Sized,
    {
        if !map.contains(location) {
            return Err(StateError::OutOfBounds(location));
        }

        let id = EntityId(self.next_id);
        if !self.world.place(location, id) {
            return Err(StateError::Occupied(location));
        }
        self.next_id += 1;
        self.actors.push(template.instantiate(id, location));
        Ok(id)
    }

    /// Removes an actor from the turn order and the occupancy grid.
    pub fn remove_actor(&mut self, id: EntityId) -> Option<ActorState> {
        let index = self.actors.iter().position(|actor| actor.id == id)?;
        let actor = self.actors.remove(index);
        self.world.vacate(actor.location, id);
        Some(actor)
    }

    /// Moves an actor, keeping occupancy in sync. Passability is the caller's
    /// concern.
    pub fn relocate(&mut self, id: EntityId, destination: Location) -> Result<(), StateError> {
        let origin = self
            .actor(id)
            .map(|actor| actor.location)
            .ok_or(StateError::ActorNotFound(id))?;
        if origin == destination {
            return Ok(());
        }

        if self.world.occupant_at(destination).is_some() {
            return Err(StateError::Occupied(destination));
        }
        if !self.world.vacate(origin, id) {
            return Err(StateError::OccupancyDesync {
                actor: id,
                location: origin,
            });
        }
        self.world.place(destination, id);

        let actor = self.actor_mut(id).ok_or(StateError::ActorNotFound(id))?;
        actor.location = destination;
        Ok(())
    }
}
