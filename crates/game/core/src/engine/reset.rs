use super::GameEngine;
use crate::events::{GameEvent, ResetSummary};
use crate::state::{Capabilities, EntityId, MapId};

impl<'a> GameEngine<'a> {
    /// Puts one map (or every map, for `None`) back to its initial condition.
    ///
    /// Spawned actors are removed, surviving bosses are restored to full,
    /// unlocked gates re-lock, rune piles vanish and grounds start over.
    /// Hand-placed actors other than bosses keep their current state.
    pub fn reset_maps(&mut self, map: Option<MapId>) -> ResetSummary {
        let on_map = |location_map: MapId| map.is_none_or(|map| map == location_map);
        let mut summary = ResetSummary {
            map,
            ..ResetSummary::default()
        };

        let despawn: Vec<EntityId> = self
            .state
            .actors()
            .filter(|actor| actor.has(Capabilities::SPAWNED) && on_map(actor.location.map))
            .map(|actor| actor.id)
            .collect();
        for id in despawn {
            if self.state.remove_actor(id).is_some() {
                summary.despawned.push(id);
            }
        }

        for actor in self.state.actors_mut() {
            if actor.has(Capabilities::BOSS) && on_map(actor.location.map) && actor.is_alive() {
                actor.ledger.restore();
                summary.restored.push(actor.id);
            }
        }

        summary.gates_relocked = self.state.world.relock(map);
        summary.runes_cleared = self.state.world.clear_runes(map);
        for ground in self
            .state
            .grounds
            .iter_mut()
            .filter(|ground| on_map(ground.location().map))
        {
            ground.reset();
        }

        tracing::info!(
            ?map,
            despawned = summary.despawned.len(),
            restored = summary.restored.len(),
            gates = summary.gates_relocked,
            runes = summary.runes_cleared,
            "map reset"
        );
        summary
    }

    /// Removes an actor without treating it as a defeat: no drops, no events
    /// beyond the despawn itself.
    pub fn despawn(&mut self, id: EntityId) -> Option<GameEvent> {
        let actor = self.state.remove_actor(id)?;
        tracing::debug!(actor = %id, template = %actor.template, "despawned");
        Some(GameEvent::Despawned { actor: id })
    }
}
