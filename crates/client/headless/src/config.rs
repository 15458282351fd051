//! Host configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Headless host configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Directory holding `units.ron` and the optional content files.
    pub data_dir: PathBuf,
    /// Overrides the tick cap from `config.toml`.
    pub max_ticks: Option<u64>,
    /// Edge length of the flat terrain used when no `terrain.ron` exists.
    pub terrain_size: f32,
    /// Height of the flat terrain.
    pub flat_height: f32,
    /// File name for a log copy in the platform cache directory.
    pub log_file: Option<String>,
    /// Delay between frames; 0 runs frames back to back.
    pub frame_ms: u64,
}

impl ClientConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";
    pub const DEFAULT_TERRAIN_SIZE: f32 = 1000.0;
    pub const DEFAULT_FRAME_MS: u64 = 0;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Content directory (default: `data`)
    /// - `BATTLE_MAX_TICKS` - Tick cap override
    /// - `BATTLE_TERRAIN_SIZE` - Flat terrain size (default: 1000)
    /// - `BATTLE_FLAT_HEIGHT` - Flat terrain height (default: 0)
    /// - `BATTLE_LOG_FILE` - Also write logs to this file under the cache dir
    /// - `BATTLE_FRAME_MS` - Milliseconds between frames (default: 0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(ticks) = read_env::<u64>("BATTLE_MAX_TICKS") {
            config.max_ticks = Some(ticks);
        }
        if let Some(size) = read_env::<f32>("BATTLE_TERRAIN_SIZE") {
            config.terrain_size = size.max(0.0);
        }
        if let Some(height) = read_env::<f32>("BATTLE_FLAT_HEIGHT") {
            config.flat_height = height;
        }
        if let Ok(file) = env::var("BATTLE_LOG_FILE") {
            config.log_file = (!file.is_empty()).then_some(file);
        }
        if let Some(frame_ms) = read_env::<u64>("BATTLE_FRAME_MS") {
            config.frame_ms = frame_ms;
        }

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            max_ticks: None,
            terrain_size: Self::DEFAULT_TERRAIN_SIZE,
            flat_height: 0.0,
            log_file: None,
            frame_ms: Self::DEFAULT_FRAME_MS,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
