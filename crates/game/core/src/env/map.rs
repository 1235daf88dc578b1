use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{Direction, Location, MapId, Position};

/// Neighbouring tiles of a location, in [`Direction::ALL`] order.
pub type Neighbors = ArrayVec<(Direction, Location), { GameConfig::MAX_NEIGHBORS }>;

/// Static map oracle exposing immutable layout information for every map.
///
/// Dynamic facts (occupancy, unlocked gates) live in
/// [`crate::state::WorldState`]; combine both through
/// [`crate::state::GameState::tile_view`].
pub trait MapOracle: Send + Sync {
    fn dimensions(&self, map: MapId) -> Option<MapDimensions>;

    fn tile(&self, location: Location) -> Option<StaticTile>;

    /// Where travelling through the gate at `gate` leads, if anywhere.
    fn gate_destination(&self, _gate: Location) -> Option<Location> {
        None
    }

    fn contains(&self, location: Location) -> bool {
        self.dimensions(location.map)
            .is_some_and(|dimensions| dimensions.contains(location.position))
    }

    /// In-bounds neighbours in the fixed direction preference order.
    fn neighbors(&self, location: Location) -> Neighbors {
        Direction::ALL
            .into_iter()
            .map(|direction| (direction, location.step(direction)))
            .filter(|(_, next)| self.contains(*next))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Dirt,
    Wall,
    /// Passable, but fatal to anything without void immunity.
    Void,
    /// Passable; can be drunk from.
    Puddle,
    /// Impassable until unlocked in world state.
    LockedGate,
}

impl TerrainKind {
    /// Base passability. Gates depend on world state, see
    /// [`crate::state::TileView::is_passable`].
    pub fn is_passable(self) -> bool {
        matches!(
            self,
            TerrainKind::Floor | TerrainKind::Dirt | TerrainKind::Void | TerrainKind::Puddle
        )
    }

    pub fn is_lethal(self) -> bool {
        matches!(self, TerrainKind::Void)
    }

    /// Map glyph used by content files.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        Some(match glyph {
            '.' => TerrainKind::Dirt,
            '_' => TerrainKind::Floor,
            '#' => TerrainKind::Wall,
            '+' => TerrainKind::Void,
            '~' => TerrainKind::Puddle,
            '=' => TerrainKind::LockedGate,
            _ => return None,
        })
    }
}

/// Dense terrain grid for one map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    dimensions: MapDimensions,
    terrain: Vec<TerrainKind>,
}

impl GridMap {
    /// A map filled with `fill`.
    pub fn filled(dimensions: MapDimensions, fill: TerrainKind) -> Self {
        let len = dimensions.width as usize * dimensions.height as usize;
        Self {
            dimensions,
            terrain: vec![fill; len],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn terrain_at(&self, position: Position) -> Option<TerrainKind> {
        self.index(position).map(|index| self.terrain[index])
    }

    /// Overwrites one tile. Out-of-bounds positions are ignored.
    pub fn set(&mut self, position: Position, terrain: TerrainKind) -> bool {
        match self.index(position) {
            Some(index) => {
                self.terrain[index] = terrain;
                true
            }
            None => false,
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions.contains(position).then(|| {
            position.y as usize * self.dimensions.width as usize + position.x as usize
        })
    }
}

/// Every map of a run, plus the gate links between them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridAtlas {
    maps: BTreeMap<MapId, GridMap>,
    gates: BTreeMap<Location, Location>,
}

impl GridAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_map(&mut self, id: MapId, map: GridMap) {
        self.maps.insert(id, map);
    }

    pub fn with_map(mut self, id: MapId, map: GridMap) -> Self {
        self.insert_map(id, map);
        self
    }

    /// Links the gate tile at `gate` to `destination`.
    pub fn link_gate(&mut self, gate: Location, destination: Location) {
        self.gates.insert(gate, destination);
    }

    pub fn map(&self, id: MapId) -> Option<&GridMap> {
        self.maps.get(&id)
    }

    pub fn map_mut(&mut self, id: MapId) -> Option<&mut GridMap> {
        self.maps.get_mut(&id)
    }

    pub fn map_ids(&self) -> impl Iterator<Item = MapId> + '_ {
        self.maps.keys().copied()
    }
}

impl MapOracle for GridAtlas {
    fn dimensions(&self, map: MapId) -> Option<MapDimensions> {
        self.maps.get(&map).map(GridMap::dimensions)
    }

    fn tile(&self, location: Location) -> Option<StaticTile> {
        self.maps
            .get(&location.map)?
            .terrain_at(location.position)
            .map(StaticTile::new)
    }

    fn gate_destination(&self, gate: Location) -> Option<Location> {
        self.gates.get(&gate).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas() -> GridAtlas {
        let mut map = GridMap::filled(MapDimensions::new(3, 3), TerrainKind::Floor);
        map.set(Position::new(1, 0), TerrainKind::Wall);
        GridAtlas::new().with_map(MapId(0), map)
    }

    #[test]
    fn corner_has_three_neighbours_in_preference_order() {
        let atlas = atlas();
        let neighbours: Vec<Direction> = atlas
            .neighbors(Location::at(0, 0, 0))
            .into_iter()
            .map(|(direction, _)| direction)
            .collect();
        assert_eq!(
            neighbours,
            vec![Direction::East, Direction::South, Direction::SouthEast]
        );
    }

    #[test]
    fn tiles_resolve_per_map() {
        let atlas = atlas();
        assert_eq!(
            atlas.tile(Location::at(0, 1, 0)).map(StaticTile::terrain),
            Some(TerrainKind::Wall)
        );
        assert_eq!(atlas.tile(Location::at(1, 1, 0)), None);
        assert!(!atlas.contains(Location::at(0, 3, 0)));
    }

    #[test]
    fn glyphs_cover_every_terrain() {
        for glyph in ['.', '_', '#', '+', '~', '='] {
            assert!(TerrainKind::from_glyph(glyph).is_some(), "{glyph}");
        }
        assert_eq!(TerrainKind::from_glyph('?'), None);
    }
}
