use std::collections::{BTreeMap, BTreeSet};

use super::common::{EntityId, Location};
use super::item::{Item, ItemKind};
use crate::env::{MapOracle, TerrainKind};

/// Mutable world layer on top of the static map: who stands where, which
/// gates are open, and what lies on the ground.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    occupancy: BTreeMap<Location, EntityId>,
    unlocked_gates: BTreeSet<Location>,
    ground_items: BTreeMap<Location, Vec<Item>>,
}

impl WorldState {
    pub fn occupant_at(&self, location: Location) -> Option<EntityId> {
        self.occupancy.get(&location).copied()
    }

    pub(crate) fn place(&mut self, location: Location, actor: EntityId) -> bool {
        if self.occupancy.contains_key(&location) {
            return false;
        }
        self.occupancy.insert(location, actor);
        true
    }

    pub(crate) fn vacate(&mut self, location: Location, actor: EntityId) -> bool {
        if self.occupancy.get(&location) != Some(&actor) {
            return false;
        }
        self.occupancy.remove(&location);
        true
    }

    pub fn is_unlocked(&self, gate: Location) -> bool {
        self.unlocked_gates.contains(&gate)
    }

    pub(crate) fn unlock(&mut self, gate: Location) -> bool {
        self.unlocked_gates.insert(gate)
    }

    /// Re-locks every gate on `map`, or everywhere when `map` is `None`.
    pub(crate) fn relock(&mut self, map: Option<super::MapId>) -> usize {
        let before = self.unlocked_gates.len();
        self.unlocked_gates
            .retain(|gate| map.is_some_and(|map| gate.map != map));
        before - self.unlocked_gates.len()
    }

    pub fn items_at(&self, location: Location) -> &[Item] {
        self.ground_items
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn drop_items(&mut self, location: Location, items: impl IntoIterator<Item = Item>) {
        let pile = self.ground_items.entry(location).or_default();
        pile.extend(items);
        if pile.is_empty() {
            self.ground_items.remove(&location);
        }
    }

    /// Removes rune piles lying on `map` (or everywhere). Returns how many went.
    pub(crate) fn clear_runes(&mut self, map: Option<super::MapId>) -> usize {
        let mut removed = 0;
        for (location, pile) in self.ground_items.iter_mut() {
            if map.is_some_and(|map| location.map != map) {
                continue;
            }
            let before = pile.len();
            pile.retain(|item| item.kind != ItemKind::Runes);
            removed += before - pile.len();
        }
        self.ground_items.retain(|_, pile| !pile.is_empty());
        removed
    }
}

/// Combined static and dynamic view of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileView {
    pub terrain: TerrainKind,
    pub occupant: Option<EntityId>,
    pub unlocked: bool,
}

impl TileView {
    pub fn from_parts<M>(map: &M, world: &WorldState, location: Location) -> Option<Self>
    where
        M: MapOracle + ?Sized,
    {
        let tile = map.tile(location)?;
        Some(Self {
            terrain: tile.terrain(),
            occupant: world.occupant_at(location),
            unlocked: world.is_unlocked(location),
        })
    }

    /// Terrain allows entry. Locked gates open once unlocked.
    pub fn is_passable(&self) -> bool {
        match self.terrain {
            TerrainKind::LockedGate => self.unlocked,
            terrain => terrain.is_passable(),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Passable and free.
    pub fn is_enterable(&self) -> bool {
        self.is_passable() && !self.is_occupied()
    }

    /// Whether ending a turn here defeats an actor without void immunity.
    pub fn is_lethal(&self) -> bool {
        self.terrain.is_lethal()
    }
}
