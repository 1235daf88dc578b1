//! Content loaders for reading game data from files.
//!
//! Each loader turns one file (or one directory of files) into the oracle
//! types `vale-core` consumes.

pub mod actors;
pub mod config;
pub mod factory;
pub mod map;
pub mod scenario;

pub use actors::ActorLoader;
pub use config::ConfigLoader;
pub use factory::{ContentFactory, GameContent};
pub use map::{MapData, MapLoader};
pub use scenario::ScenarioLoader;

use std::path::{Path, PathBuf};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// `.ron` files directly under `dir`, sorted by file name.
pub(crate) fn ron_files(dir: &Path) -> LoadResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
