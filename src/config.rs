use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns a square grid with `size` cells per side.
    #[must_use]
    pub fn square(size: u16) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Cells per side of the square play field.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Largest accepted cells per side.
pub const MAX_GRID_SIZE: u16 = 64;

/// Segments in a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: u16 = 5;

/// Obstacles placed on every reset.
pub const BASE_OBSTACLE_COUNT: usize = 3;

/// Score needed per extra obstacle.
pub const POINTS_PER_OBSTACLE: u32 = 3;

/// Upper bound on obstacles in one game.
pub const MAX_OBSTACLE_COUNT: usize = 45;

/// Tick interval when speed does not scale with score.
pub const CONSTANT_TICK_INTERVAL_MS: u64 = 120;

/// Base tick interval in milliseconds for progressive speed.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Milliseconds shaved off per speed level.
pub const TICK_INTERVAL_STEP_MS: u64 = 10;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Score needed per speed level increase.
pub const POINTS_PER_SPEED_LEVEL: u32 = 3;

/// What happens when the head leaves the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EdgePolicy {
    /// Re-enter from the opposite edge.
    Wrap,
    /// Leaving the grid ends the game.
    Wall,
}

/// How a finished game is restarted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    /// Any movement key resets and starts a new game.
    AnyKey,
    /// Movement is ignored until the explicit restart action.
    ExplicitOnly,
}

/// Score to obstacle-count mapping.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObstacleFormula {
    pub base: usize,
    pub increase_every: u32,
    pub max: usize,
}

impl Default for ObstacleFormula {
    fn default() -> Self {
        Self {
            base: BASE_OBSTACLE_COUNT,
            increase_every: POINTS_PER_OBSTACLE,
            max: MAX_OBSTACLE_COUNT,
        }
    }
}

/// Score to tick-interval mapping.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum SpeedFormula {
    Constant {
        interval_ms: u64,
    },
    Progressive {
        base_ms: u64,
        step_ms: u64,
        increase_every: u32,
        min_ms: u64,
    },
}

impl SpeedFormula {
    #[must_use]
    pub fn progressive() -> Self {
        Self::Progressive {
            base_ms: DEFAULT_TICK_INTERVAL_MS,
            step_ms: TICK_INTERVAL_STEP_MS,
            increase_every: POINTS_PER_SPEED_LEVEL,
            min_ms: MIN_TICK_INTERVAL_MS,
        }
    }
}

impl Default for SpeedFormula {
    fn default() -> Self {
        Self::progressive()
    }
}

/// Named rule sets matching the game variants.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Wrap-around edges, fixed speed, restart button only.
    Classic,
    /// Wrap-around edges, speeding up, any key restarts.
    Arcade,
    /// Walled arena, speeding up, any key restarts.
    Walled,
}

/// Complete rule set for one game instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: u16,
    pub initial_snake_length: u16,
    pub edge_policy: EdgePolicy,
    pub restart_policy: RestartPolicy,
    pub obstacles: ObstacleFormula,
    pub speed: SpeedFormula,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::preset(Preset::Arcade)
    }
}

impl GameConfig {
    /// Returns the rules for a named variant.
    #[must_use]
    pub fn preset(preset: Preset) -> Self {
        let base = Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            edge_policy: EdgePolicy::Wrap,
            restart_policy: RestartPolicy::AnyKey,
            obstacles: ObstacleFormula::default(),
            speed: SpeedFormula::progressive(),
        };

        match preset {
            Preset::Classic => Self {
                restart_policy: RestartPolicy::ExplicitOnly,
                speed: SpeedFormula::Constant {
                    interval_ms: CONSTANT_TICK_INTERVAL_MS,
                },
                ..base
            },
            Preset::Arcade => base,
            Preset::Walled => Self {
                edge_policy: EdgePolicy::Wall,
                ..base
            },
        }
    }

    /// Loads a config from a JSON file. Missing fields take their defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize::square(self.grid_size)
    }

    /// Rejects rule sets the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                grid_size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        // The starting body extends left from the centre cell.
        if self.initial_snake_length - 1 > self.grid_size / 2 {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                grid_size: self.grid_size,
            });
        }

        if self.obstacles.increase_every == 0 {
            return Err(ConfigError::ZeroDivisor("obstacles.increase_every"));
        }

        match self.speed {
            SpeedFormula::Constant { interval_ms } if interval_ms == 0 => {
                Err(ConfigError::ZeroInterval)
            }
            SpeedFormula::Progressive { increase_every, .. } if increase_every == 0 => {
                Err(ConfigError::ZeroDivisor("speed.increase_every"))
            }
            SpeedFormula::Progressive { min_ms, .. } if min_ms == 0 => {
                Err(ConfigError::ZeroInterval)
            }
            SpeedFormula::Progressive {
                base_ms, min_ms, ..
            } if min_ms > base_ms => Err(ConfigError::MinAboveBase { base_ms, min_ms }),
            _ => Ok(()),
        }
    }
}

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be non-zero")]
    EmptyGrid,
    #[error("grid size {grid_size} exceeds the maximum of {max}")]
    GridTooLarge { grid_size: u16, max: u16 },
    #[error("initial snake length must be non-zero")]
    EmptySnake,
    #[error("a snake of length {length} does not fit a {grid_size}x{grid_size} grid")]
    SnakeDoesNotFit { length: u16, grid_size: u16 },
    #[error("{0} must be non-zero")]
    ZeroDivisor(&'static str),
    #[error("tick interval must be non-zero")]
    ZeroInterval,
    #[error("minimum tick interval {min_ms}ms exceeds base interval {base_ms}ms")]
    MinAboveBase { base_ms: u64, min_ms: u64 },
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        ConfigError, EdgePolicy, GameConfig, GridSize, MAX_GRID_SIZE, Preset, RestartPolicy,
        SpeedFormula,
    };

    #[test]
    fn presets_differ_only_in_policy_fields() {
        let classic = GameConfig::preset(Preset::Classic);
        let arcade = GameConfig::preset(Preset::Arcade);
        let walled = GameConfig::preset(Preset::Walled);

        assert_eq!(classic.edge_policy, EdgePolicy::Wrap);
        assert_eq!(classic.restart_policy, RestartPolicy::ExplicitOnly);
        assert!(matches!(classic.speed, SpeedFormula::Constant { .. }));

        assert_eq!(arcade.restart_policy, RestartPolicy::AnyKey);
        assert_eq!(walled.edge_policy, EdgePolicy::Wall);
        assert_eq!(arcade.obstacles, walled.obstacles);

        for config in [classic, arcade, walled] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn grid_size_counts_cells() {
        assert_eq!(GridSize::square(20).total_cells(), 400);
    }

    #[test]
    fn validation_rejects_degenerate_rules() {
        let mut config = GameConfig::default();
        config.grid_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid)));

        let mut config = GameConfig::default();
        config.grid_size = u16::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { max: MAX_GRID_SIZE, .. })
        ));

        let mut config = GameConfig::default();
        config.grid_size = MAX_GRID_SIZE;
        assert!(config.validate().is_ok());

        let mut config = GameConfig::default();
        config.grid_size = 6;
        config.initial_snake_length = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SnakeDoesNotFit { .. })
        ));

        let mut config = GameConfig::default();
        config.obstacles.increase_every = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroDivisor(_))));

        let mut config = GameConfig::default();
        config.speed = SpeedFormula::Progressive {
            base_ms: 50,
            step_ms: 10,
            increase_every: 2,
            min_ms: 80,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MinAboveBase { .. })
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(
            r#"{ "grid_size": 12, "edge_policy": "wall", "speed": { "kind": "constant", "interval_ms": 90 } }"#,
        )
        .expect("config should parse");

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.edge_policy, EdgePolicy::Wall);
        assert_eq!(config.speed, SpeedFormula::Constant { interval_ms: 90 });
        assert_eq!(config.obstacles, GameConfig::default().obstacles);
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("obstacle-snake-config-{nanos}.json"));
        fs::write(&path, "{ not json").expect("test file write should succeed");

        assert!(matches!(
            GameConfig::load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));

        let _ = fs::remove_file(&path);
        assert!(matches!(
            GameConfig::load_from_path(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}
