//! Board configuration
//!
//! The grid size and the per-row speed/size schedule. A configuration is
//! validated once, when a session is created; after that every row lookup is
//! guaranteed to hit an entry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GRID_HEIGHT, GRID_WIDTH};

/// Longest tick period a browser interval can hold
pub const MAX_PERIOD_MS: u32 = i32::MAX as u32;

/// Problems detected while validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {width}x{height})")]
    EmptyGrid { width: usize, height: usize },
    #[error("schedule has {found} rows but the grid has {expected}")]
    ScheduleLength { expected: usize, found: usize },
    #[error("row {row}: platform size must be at least 1")]
    ZeroSize { row: usize },
    #[error("row {row}: platform size {size} is wider than the grid ({width})")]
    SizeTooWide { row: usize, size: usize, width: usize },
    #[error("row {row}: tick period must be at least 1 ms")]
    ZeroPeriod { row: usize },
    #[error("row {row}: tick period {period_ms} ms exceeds {max} ms")]
    PeriodTooLong { row: usize, period_ms: u32, max: u32 },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Platform size and tick period for one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSpec {
    /// Platform width in cells
    pub size: usize,
    /// Milliseconds between platform steps (lower = faster)
    pub period_ms: u32,
}

impl RowSpec {
    pub const fn new(size: usize, period_ms: u32) -> Self {
        Self { size, period_ms }
    }
}

/// Per-row schedule in play order: entry 0 is the bottom row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    rows: Vec<RowSpec>,
}

impl Schedule {
    pub fn new(rows: Vec<RowSpec>) -> Self {
        Self { rows }
    }

    /// Build a schedule from a table listed top row first
    pub fn from_top_down(mut rows: Vec<RowSpec>) -> Self {
        rows.reverse();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Entries in play order
    pub fn rows(&self) -> &[RowSpec] {
        &self.rows
    }
}

impl Default for Schedule {
    /// The arcade table, listed from the top: a single fast cell at the top,
    /// wide and slow at the bottom.
    fn default() -> Self {
        Self::from_top_down(vec![
            RowSpec::new(1, 50),
            RowSpec::new(1, 80),
            RowSpec::new(1, 80),
            RowSpec::new(1, 100),
            RowSpec::new(2, 100),
            RowSpec::new(2, 150),
            RowSpec::new(2, 200),
            RowSpec::new(2, 250),
            RowSpec::new(3, 300),
            RowSpec::new(3, 350),
            RowSpec::new(3, 500),
        ])
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub schedule: Schedule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            schedule: Schedule::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every row has a usable schedule entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.schedule.len() != self.height {
            return Err(ConfigError::ScheduleLength {
                expected: self.height,
                found: self.schedule.len(),
            });
        }
        for (i, spec) in self.schedule.rows().iter().enumerate() {
            let row = self.height - 1 - i;
            if spec.size == 0 {
                return Err(ConfigError::ZeroSize { row });
            }
            if spec.size > self.width {
                return Err(ConfigError::SizeTooWide {
                    row,
                    size: spec.size,
                    width: self.width,
                });
            }
            if spec.period_ms == 0 {
                return Err(ConfigError::ZeroPeriod { row });
            }
            if spec.period_ms > MAX_PERIOD_MS {
                return Err(ConfigError::PeriodTooLong {
                    row,
                    period_ms: spec.period_ms,
                    max: MAX_PERIOD_MS,
                });
            }
        }
        Ok(())
    }

    /// Schedule entry for a grid row (row 0 is the top)
    ///
    /// Only meaningful on a validated config; `row` must be below `height`.
    pub fn row_spec(&self, row: usize) -> RowSpec {
        self.schedule.rows[self.height - 1 - row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.schedule.len(), GRID_HEIGHT);
    }

    #[test]
    fn test_row_spec_bottom_row_first() {
        let config = GameConfig::default();
        assert_eq!(config.row_spec(10), RowSpec::new(3, 500));
        assert_eq!(config.row_spec(9), RowSpec::new(3, 350));
        assert_eq!(config.row_spec(0), RowSpec::new(1, 50));
    }

    #[test]
    fn test_from_top_down_reverses() {
        let schedule = Schedule::from_top_down(vec![RowSpec::new(1, 50), RowSpec::new(3, 400)]);
        assert_eq!(schedule.rows()[0], RowSpec::new(3, 400));
    }

    #[test]
    fn test_default_schedule_play_order() {
        let rows = Schedule::default();
        assert_eq!(rows.rows().first(), Some(&RowSpec::new(3, 500)));
        assert_eq!(rows.rows().last(), Some(&RowSpec::new(1, 50)));
    }

    #[test]
    fn test_missing_row_is_rejected() {
        let config = GameConfig {
            width: 7,
            height: 3,
            schedule: Schedule::new(vec![RowSpec::new(3, 100); 2]),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ScheduleLength { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_bad_entries_are_rejected() {
        let mut config = GameConfig {
            width: 4,
            height: 2,
            schedule: Schedule::new(vec![RowSpec::new(2, 100), RowSpec::new(5, 100)]),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SizeTooWide { row: 0, size: 5, width: 4 })
        ));

        config.schedule = Schedule::new(vec![RowSpec::new(0, 100), RowSpec::new(1, 100)]);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroSize { row: 1 })));

        config.schedule = Schedule::new(vec![RowSpec::new(1, 100), RowSpec::new(1, 0)]);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPeriod { row: 0 })));

        config.schedule = Schedule::new(vec![RowSpec::new(1, u32::MAX), RowSpec::new(1, 100)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PeriodTooLong { row: 1, period_ms: u32::MAX, .. })
        ));
        config.schedule = Schedule::new(vec![RowSpec::new(1, MAX_PERIOD_MS), RowSpec::new(1, 100)]);
        assert!(config.validate().is_ok());

        config.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid { .. })));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "width": 5,
            "height": 2,
            "schedule": [
                { "size": 2, "period_ms": 300 },
                { "size": 1, "period_ms": 120 }
            ]
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.width, 5);
        assert_eq!(config.row_spec(1), RowSpec::new(2, 300));
        assert_eq!(config.row_spec(0), RowSpec::new(1, 120));

        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
