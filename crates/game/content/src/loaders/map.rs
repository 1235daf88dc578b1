//! Map data loader.
//!
//! Maps are written as glyph rows, one string per row, top row first. Gate
//! links name the destination map by id; entity placement lives in scenario
//! files.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use vale_core::{
    GridAtlas, GridMap, Location, MapDimensions, MapId, MapOracle, Position, TerrainKind,
};

use crate::loaders::{LoadResult, read_file, ron_files};

/// Map file layout.
#[derive(Debug, Clone, Deserialize)]
struct MapDataRon {
    id: u16,
    name: String,
    rows: Vec<String>,
    #[serde(default)]
    gates: Vec<GateRon>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct GateRon {
    at: (i32, i32),
    to: DestinationRon,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct DestinationRon {
    map: u16,
    x: i32,
    y: i32,
}

/// One parsed map with its outgoing gate links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapData {
    pub id: MapId,
    pub name: String,
    pub map: GridMap,
    /// `(gate tile on this map, destination)`.
    pub gates: Vec<(Location, Location)>,
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a single map from a RON file.
    pub fn load(path: &Path) -> LoadResult<MapData> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid map {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<MapData> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let height = data.rows.len();
        let width = data.rows.first().map_or(0, |row| row.chars().count());
        if width == 0 || height == 0 {
            anyhow::bail!("map '{}' is empty", data.name);
        }

        let id = MapId(data.id);
        let mut map = GridMap::filled(
            MapDimensions::new(width as u32, height as u32),
            TerrainKind::Dirt,
        );
        for (y, row) in data.rows.iter().enumerate() {
            if row.chars().count() != width {
                anyhow::bail!(
                    "row {} of map '{}' has {} tiles, expected {}",
                    y,
                    data.name,
                    row.chars().count(),
                    width
                );
            }
            for (x, glyph) in row.chars().enumerate() {
                let terrain = TerrainKind::from_glyph(glyph).ok_or_else(|| {
                    anyhow::anyhow!("unknown glyph '{}' at ({}, {})", glyph, x, y)
                })?;
                map.set(Position::new(x as i32, y as i32), terrain);
            }
        }

        let mut gates = Vec::with_capacity(data.gates.len());
        for gate in data.gates {
            let at = Position::new(gate.at.0, gate.at.1);
            if map.terrain_at(at) != Some(TerrainKind::LockedGate) {
                anyhow::bail!("gate link at ({}, {}) is not on a gate tile", at.x, at.y);
            }
            gates.push((
                Location::new(id, at),
                Location::at(gate.to.map, gate.to.x, gate.to.y),
            ));
        }

        Ok(MapData {
            id,
            name: data.name,
            map,
            gates,
        })
    }

    /// Load every `*.ron` map in `dir` into one atlas and link their gates.
    ///
    /// Map ids must be unique and every gate must lead to a tile that exists.
    pub fn load_atlas(dir: &Path) -> LoadResult<GridAtlas> {
        let mut maps = BTreeMap::new();
        for path in ron_files(dir)? {
            let data = Self::load(&path)?;
            if let Some(previous) = maps.insert(data.id, data) {
                anyhow::bail!(
                    "map id {} is used twice (second: '{}')",
                    previous.id.0,
                    path.display()
                );
            }
        }
        Self::assemble(maps.into_values())
    }

    /// Build an atlas from already parsed maps.
    pub fn assemble(maps: impl IntoIterator<Item = MapData>) -> LoadResult<GridAtlas> {
        let mut atlas = GridAtlas::new();
        let mut links = Vec::new();
        for data in maps {
            tracing::debug!(map = %data.id, name = %data.name, gates = data.gates.len(), "map loaded");
            links.extend(data.gates);
            atlas.insert_map(data.id, data.map);
        }

        for (gate, destination) in links {
            if !atlas.contains(destination) {
                anyhow::bail!("gate {} leads to {}, which is not on any map", gate, destination);
            }
            atlas.link_gate(gate, destination);
        }
        Ok(atlas)
    }
}
