//! Run configuration read from the process environment.
use std::env;
use std::path::{Path, PathBuf};

/// Everything a headless run needs besides the content itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub scenario: String,
    pub ticks: u64,
    /// Replaces the scenario's own seed when set.
    pub seed: Option<u64>,
    /// Also write logs to `vale-sim.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl SimConfig {
    pub const DEFAULT_TICKS: u64 = 100;
    pub const DEFAULT_SCENARIO: &'static str = "default";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `VALE_DATA_DIR` - Content directory (default: platform data dir if it
    ///   holds content, else the bundled data)
    /// - `VALE_SCENARIO` - Scenario name under `scenarios/` (default: `default`)
    /// - `VALE_TICKS` - Ticks to run before stopping (default: 100)
    /// - `VALE_SEED` - Seed override (default: the scenario's seed)
    /// - `VALE_LOG_DIR` - Directory for a log file (default: stderr only)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("VALE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Self {
            data_dir,
            scenario: lookup("VALE_SCENARIO").unwrap_or_else(|| Self::DEFAULT_SCENARIO.into()),
            ticks: parse(lookup("VALE_TICKS"))
                .unwrap_or(Self::DEFAULT_TICKS)
                .max(1),
            seed: parse(lookup("VALE_SEED")),
            log_dir: lookup("VALE_LOG_DIR").map(PathBuf::from),
        }
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

/// Platform data directory when it carries content, otherwise the content
/// shipped with `vale-content`.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "vale")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .filter(|dir| has_content(dir))
        .unwrap_or_else(|| PathBuf::from(vale_content::BUNDLED_DATA_DIR))
}

fn has_content(dir: &Path) -> bool {
    dir.join("actors.ron").is_file()
}
