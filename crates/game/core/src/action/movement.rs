//! Positional actions: single steps, gate travel and gate unlocking.

use super::{ActionError, ActionTransition, Effect, check_enterable, living_actor};
use crate::env::{GameEnv, MapOracle, TerrainKind};
use crate::state::{
    ActorState, Capabilities, Direction, EntityId, GameState, ItemKind, Location,
};

/// One step onto a neighbouring tile.
///
/// Stepping onto lethal terrain is allowed; the engine resolves the
/// consequence at the end of the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }
}

impl ActionTransition for MoveAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        let destination = actor.location.step(self.direction);
        check_enterable(state, env, actor, destination, true)
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        let from = living_actor(state, self.actor)?.location;
        let to = from.step(self.direction);
        state.relocate(self.actor, to)?;
        Ok(vec![Effect::Moved {
            actor: self.actor,
            from,
            to,
        }])
    }
}

/// Gate tile within reach of `actor`: on it or next to it.
fn gate_in_reach<M>(map: &M, actor: &ActorState, gate: Location) -> Result<(), ActionError>
where
    M: MapOracle + ?Sized,
{
    let tile = map.tile(gate).ok_or(ActionError::NotAGate(gate))?;
    if tile.terrain() != TerrainKind::LockedGate {
        return Err(ActionError::NotAGate(gate));
    }
    match actor.location.chebyshev(gate) {
        Some(distance) if distance <= 1 => Ok(()),
        _ => Err(ActionError::GateOutOfReach(gate)),
    }
}

/// Travels through an unlocked gate to the location it links to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveMapAction {
    pub actor: EntityId,
    pub gate: Location,
}

impl MoveMapAction {
    pub fn new(actor: EntityId, gate: Location) -> Self {
        Self { actor, gate }
    }
}

impl ActionTransition for MoveMapAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        if !actor.has(Capabilities::INTERACT_WITH_GATE) {
            return Err(ActionError::CannotUseGates(self.actor));
        }

        let map = env.map()?;
        gate_in_reach(map, actor, self.gate)?;
        if !state.world.is_unlocked(self.gate) {
            return Err(ActionError::GateLocked(self.gate));
        }
        let destination = map
            .gate_destination(self.gate)
            .ok_or(ActionError::NoGateLink(self.gate))?;
        check_enterable(state, env, actor, destination, false)
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        let from = living_actor(state, self.actor)?.location;
        let to = env
            .map()?
            .gate_destination(self.gate)
            .ok_or(ActionError::NoGateLink(self.gate))?;
        state.relocate(self.actor, to)?;
        Ok(vec![Effect::Traveled {
            actor: self.actor,
            from,
            to,
        }])
    }
}

/// Opens a locked gate with an Old Key. The key is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnlockDoorAction {
    pub actor: EntityId,
    pub gate: Location,
}

impl UnlockDoorAction {
    pub fn new(actor: EntityId, gate: Location) -> Self {
        Self { actor, gate }
    }
}

impl ActionTransition for UnlockDoorAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        if !actor.inventory.has_item(ItemKind::OldKey) {
            return Err(ActionError::ItemMissing(ItemKind::OldKey));
        }
        gate_in_reach(env.map()?, actor, self.gate)?;
        if state.world.is_unlocked(self.gate) {
            return Err(ActionError::GateAlreadyUnlocked(self.gate));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        if !state.world.unlock(self.gate) {
            return Err(ActionError::GateAlreadyUnlocked(self.gate));
        }
        Ok(vec![Effect::GateUnlocked { gate: self.gate }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::config::GameConfig;
    use crate::env::{
        ActorTemplate, Env, GridAtlas, GridMap, MapDimensions, PcgRng, TemplateCatalog,
    };
    use crate::state::{Item, MapId};
    use crate::weather::WeatherController;

    fn atlas() -> GridAtlas {
        let mut first = GridMap::filled(MapDimensions::new(5, 5), TerrainKind::Dirt);
        first.set(Location::at(0, 2, 0).position, TerrainKind::Wall);
        first.set(Location::at(0, 0, 1).position, TerrainKind::Void);
        first.set(Location::at(0, 4, 4).position, TerrainKind::LockedGate);
        let second = GridMap::filled(MapDimensions::new(3, 3), TerrainKind::Floor);
        let mut atlas = GridAtlas::new()
            .with_map(MapId(0), first)
            .with_map(MapId(1), second);
        atlas.link_gate(Location::at(0, 4, 4), Location::at(1, 1, 1));
        atlas
    }

    fn walker() -> ActorTemplate {
        ActorTemplate::builder("walker")
            .with(Capabilities::PLAYER | Capabilities::INTERACT_WITH_GATE)
            .build()
    }

    #[test]
    fn move_checks_terrain_and_occupancy() {
        let atlas = atlas();
        let catalog = TemplateCatalog::new();
        let config = GameConfig::default();
        let env = Env::with_all(&atlas, &catalog, &PcgRng, &config).as_game_env();
        let mut state = GameState::new(1, WeatherController::default());
        let id = state
            .spawn_actor(&atlas, &walker(), Location::at(0, 1, 0))
            .unwrap();
        state
            .spawn_actor(&atlas, &walker(), Location::at(0, 1, 1))
            .unwrap();

        let wall = Action::from(MoveAction::new(id, Direction::East));
        assert_eq!(
            wall.execute(&mut state, &env).failure,
            Some(ActionError::Blocked {
                destination: Location::at(0, 2, 0)
            })
        );
        let edge = Action::from(MoveAction::new(id, Direction::North));
        assert!(!edge.can_execute(&state, &env));
        let crowded = Action::from(MoveAction::new(id, Direction::South));
        assert!(!crowded.can_execute(&state, &env));

        let into_void = Action::from(MoveAction::new(id, Direction::SouthWest));
        assert!(into_void.execute(&mut state, &env).is_performed());
        assert_eq!(state.actor(id).unwrap().location, Location::at(0, 0, 1));
    }

    #[test]
    fn gate_needs_key_then_leads_to_linked_map() {
        let atlas = atlas();
        let catalog = TemplateCatalog::new();
        let config = GameConfig::default();
        let env = Env::with_all(&atlas, &catalog, &PcgRng, &config).as_game_env();
        let mut state = GameState::new(1, WeatherController::default());
        let id = state
            .spawn_actor(&atlas, &walker(), Location::at(0, 3, 3))
            .unwrap();
        let gate = Location::at(0, 4, 4);

        let travel = Action::from(MoveMapAction::new(id, gate));
        assert_eq!(
            travel.execute(&mut state, &env).failure,
            Some(ActionError::GateLocked(gate))
        );

        let unlock = Action::from(UnlockDoorAction::new(id, gate));
        assert_eq!(
            unlock.execute(&mut state, &env).failure,
            Some(ActionError::ItemMissing(ItemKind::OldKey))
        );

        state
            .actor_mut(id)
            .unwrap()
            .inventory
            .add(Item::new(ItemKind::OldKey));
        assert!(unlock.execute(&mut state, &env).is_performed());
        assert!(state.actor(id).unwrap().inventory.has_item(ItemKind::OldKey));
        assert!(!unlock.can_execute(&state, &env));

        assert!(travel.execute(&mut state, &env).is_performed());
        assert_eq!(state.actor(id).unwrap().location, Location::at(1, 1, 1));
    }
}
