use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 40;

/// Points granted for every food eaten.
pub const POINTS_PER_FOOD: u32 = 5;

/// Score multiple at which the speed multiplier steps up.
pub const LEVEL_THRESHOLD: u32 = 100;

/// Multiplier increment applied on every level-up.
pub const SPEED_STEP: f64 = 0.5;

/// Tick interval at multiplier 1.0, in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 100;

/// Number of wall cells placed on every regeneration.
pub const WALL_COUNT: usize = 5;

/// Walls are regenerated only from this score on.
pub const WALL_TRIGGER_MIN_SCORE: u32 = 500;

/// Walls are regenerated when the score is a multiple of this value.
pub const WALL_TRIGGER_EVERY: u32 = 200;

/// Number of high scores retained across rounds.
pub const HIGH_SCORE_CAPACITY: usize = 3;

/// Largest high-score table a config may ask for.
pub const MAX_HIGH_SCORE_CAPACITY: usize = 100;

/// Random placement attempts before falling back to a full board scan.
pub const PLACEMENT_RETRIES: u32 = 1_000;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Tunable rules for one simulation instance.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub points_per_food: u32,
    pub level_threshold: u32,
    pub speed_step: f64,
    pub base_tick_interval_ms: u64,
    pub wall_count: usize,
    pub wall_trigger_min_score: u32,
    pub wall_trigger_every: u32,
    pub high_score_capacity: usize,
    pub placement_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            points_per_food: POINTS_PER_FOOD,
            level_threshold: LEVEL_THRESHOLD,
            speed_step: SPEED_STEP,
            base_tick_interval_ms: BASE_TICK_INTERVAL_MS,
            wall_count: WALL_COUNT,
            wall_trigger_min_score: WALL_TRIGGER_MIN_SCORE,
            wall_trigger_every: WALL_TRIGGER_EVERY,
            high_score_capacity: HIGH_SCORE_CAPACITY,
            placement_retries: PLACEMENT_RETRIES,
        }
    }
}

impl GameConfig {
    /// Returns a default config on a grid of the given size.
    #[must_use]
    pub fn with_grid(width: u16, height: u16) -> Self {
        Self {
            grid: GridSize { width, height },
            ..Self::default()
        }
    }

    /// Checks values the simulation divides by or relies on being non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::Invalid("grid dimensions must be non-zero"));
        }
        if self.level_threshold == 0 {
            return Err(ConfigError::Invalid("level_threshold must be non-zero"));
        }
        if self.wall_trigger_every == 0 {
            return Err(ConfigError::Invalid("wall_trigger_every must be non-zero"));
        }
        if !(self.speed_step.is_finite() && self.speed_step > 0.0) {
            return Err(ConfigError::Invalid("speed_step must be positive"));
        }
        if self.base_tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("base_tick_interval_ms must be non-zero"));
        }
        if self.wall_count > self.grid.total_cells() {
            return Err(ConfigError::Invalid("wall_count exceeds the number of grid cells"));
        }
        if self.high_score_capacity > MAX_HIGH_SCORE_CAPACITY {
            return Err(ConfigError::Invalid("high_score_capacity is too large"));
        }
        Ok(())
    }

    /// Loads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &raw)
    }

    /// Loads the config at the platform default location.
    ///
    /// Returns defaults when the file does not exist (first run).
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path();
        match fs::read_to_string(&path) {
            Ok(raw) => Self::parse(&path, &raw),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    fn parse(path: &Path, raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::ConfigError;

    use super::{GameConfig, GridSize, MAX_HIGH_SCORE_CAPACITY};

    #[test]
    fn partial_config_file_keeps_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "grid": { "width": 12, "height": 9 }, "wall_count": 2 }"#);

        let config = GameConfig::load(&path).expect("partial config should load");

        assert_eq!(
            config.grid,
            GridSize {
                width: 12,
                height: 9
            }
        );
        assert_eq!(config.wall_count, 2);
        assert_eq!(config.points_per_food, 5);
        assert_eq!(config.base_tick_interval_ms, 100);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_config_file_returns_parse_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_config_file_returns_read_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        let config = GameConfig::with_grid(0, 10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_positive_speed_step_is_rejected() {
        let config = GameConfig {
            speed_step: 0.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn more_walls_than_cells_is_rejected() {
        let mut config = GameConfig::with_grid(3, 1);
        config.wall_count = 3;
        assert!(config.validate().is_ok());

        config.wall_count = 4;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn oversized_config_values_fail_to_load() {
        for (label, raw) in [
            ("scores", r#"{ "high_score_capacity": 18446744073709551615 }"#),
            (
                "walls",
                r#"{ "grid": { "width": 3, "height": 1 }, "wall_count": 18446744073709551615 }"#,
            ),
        ] {
            let path = unique_test_path(label);
            write_test_file(&path, raw);

            assert!(matches!(
                GameConfig::load(&path),
                Err(ConfigError::Invalid(_))
            ));
            cleanup_test_path(&path);
        }
    }

    #[test]
    fn high_score_capacity_is_capped() {
        let mut config = GameConfig::default();
        config.high_score_capacity = MAX_HIGH_SCORE_CAPACITY;
        assert!(config.validate().is_ok());

        config.high_score_capacity = MAX_HIGH_SCORE_CAPACITY + 1;
        assert!(config.validate().is_err());
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
