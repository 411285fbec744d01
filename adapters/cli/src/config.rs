//! Client configuration loaded from TOML and refined by command-line flags.

use std::{fs, io, path::Path, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wayfarer_core::GridCell;

/// Tunable parameters of a Wayfarer session.
///
/// Every field has a default, so a configuration file only needs to list the
/// values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WayfarerConfig {
    /// Edge length of a tile in world units.
    pub(crate) tile_length: f32,
    /// Number of tile columns on the adventure map.
    pub(crate) columns: u32,
    /// Number of tile rows on the adventure map.
    pub(crate) rows: u32,
    /// Column of the hero's starting tile.
    pub(crate) start_column: i32,
    /// Row of the hero's starting tile.
    pub(crate) start_row: i32,
    /// Movement points the hero regains every turn.
    pub(crate) max_movement: u32,
    /// Display name of the hero.
    pub(crate) hero_name: String,
    /// Seconds the splash stays on screen.
    pub(crate) splash_seconds: f32,
}

impl Default for WayfarerConfig {
    fn default() -> Self {
        Self {
            tile_length: 32.0,
            columns: 40,
            rows: 23,
            start_column: 20,
            start_row: 11,
            max_movement: 20,
            hero_name: "Hero".to_owned(),
            splash_seconds: 3.0,
        }
    }
}

impl WayfarerConfig {
    /// Reads a configuration file, falling back to defaults for missing keys.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub(crate) fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Checks that the configuration describes a playable map.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_length.is_finite() && self.tile_length > 0.0) {
            return Err(ConfigError::InvalidTileLength {
                tile_length: self.tile_length,
            });
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        let inside = |index: i32, extent: u32| u32::try_from(index).is_ok_and(|index| index < extent);
        if !inside(self.start_column, self.columns) || !inside(self.start_row, self.rows) {
            return Err(ConfigError::StartOutsideGrid {
                column: self.start_column,
                row: self.start_row,
            });
        }
        if self.max_movement == 0 {
            return Err(ConfigError::ZeroMovement);
        }
        if !(self.splash_seconds.is_finite() && self.splash_seconds >= 0.0) {
            return Err(ConfigError::InvalidSplashDuration {
                seconds: self.splash_seconds,
            });
        }
        Ok(())
    }

    /// Tile the hero starts on.
    #[must_use]
    pub(crate) const fn start_cell(&self) -> GridCell {
        GridCell::new(self.start_column, self.start_row)
    }

    /// Time the splash stays on screen.
    ///
    /// Call after [`WayfarerConfig::validate`]; invalid durations collapse to zero.
    #[must_use]
    pub(crate) fn splash_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.splash_seconds).unwrap_or(Duration::ZERO)
    }
}

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration TOML")]
    Parse(#[from] toml::de::Error),
    /// Tiles must have a positive, finite edge length.
    #[error("tile_length must be positive and finite (received {tile_length})")]
    InvalidTileLength {
        /// Rejected tile length.
        tile_length: f32,
    },
    /// The map must contain at least one tile.
    #[error("map must contain at least one tile (received {columns}x{rows})")]
    EmptyGrid {
        /// Rejected column count.
        columns: u32,
        /// Rejected row count.
        rows: u32,
    },
    /// The hero must start on the map.
    #[error("start tile ({column}, {row}) lies outside the map")]
    StartOutsideGrid {
        /// Rejected start column.
        column: i32,
        /// Rejected start row.
        row: i32,
    },
    /// A hero that can never move cannot walk routes.
    #[error("max_movement must be at least 1")]
    ZeroMovement,
    /// The splash delay must be a non-negative number of seconds.
    #[error("splash_seconds must be non-negative (received {seconds})")]
    InvalidSplashDuration {
        /// Rejected delay.
        seconds: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_standard_map() {
        let config = WayfarerConfig::default();

        assert_eq!(config.tile_length, 32.0);
        assert_eq!((config.columns, config.rows), (40, 23));
        assert_eq!(config.start_cell(), GridCell::new(20, 11));
        assert_eq!(config.max_movement, 20);
        assert_eq!(config.splash_duration(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_files_keep_remaining_defaults() {
        let config = WayfarerConfig::parse(
            r#"
            max_movement = 5
            hero_name = "Aria"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.max_movement, 5);
        assert_eq!(config.hero_name, "Aria");
        assert_eq!(config.columns, 40);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = WayfarerConfig::parse("tile_size = 16").expect_err("unknown key");

        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_rejects_unplayable_maps() {
        let mut config = WayfarerConfig {
            tile_length: 0.0,
            ..WayfarerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTileLength { .. })
        ));

        config = WayfarerConfig {
            rows: 0,
            ..WayfarerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid { .. })));

        config = WayfarerConfig {
            start_column: 40,
            ..WayfarerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutsideGrid { column: 40, .. })
        ));

        config = WayfarerConfig {
            start_row: -1,
            ..WayfarerConfig::default()
        };
        assert!(config.validate().is_err());

        config = WayfarerConfig {
            max_movement: 0,
            ..WayfarerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroMovement)));

        config = WayfarerConfig {
            splash_seconds: -1.0,
            ..WayfarerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSplashDuration { .. })
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = WayfarerConfig::load(Path::new("/nonexistent/wayfarer.toml"))
            .expect_err("missing file");

        assert!(error.to_string().contains("/nonexistent/wayfarer.toml"));
    }
}
