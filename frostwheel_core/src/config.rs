use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WheelError, WheelResult};
use crate::prize::{Catalog, Prize};

pub const MIN_ROTATIONS: u32 = 6;
pub const SPIN_DURATION_MS: u32 = 4000;
/// Delay between the nominal end of the animation and resolution, so the
/// clamped final frame runs before the outcome is recorded.
pub const RESOLVE_BUFFER_MS: u32 = 100;
pub const WHEEL_SIZE: f64 = 400.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    pub min_rotations: u32,
    pub spin_duration_ms: u32,
    pub resolve_buffer_ms: u32,
    pub wheel_size: f64, // presentation only
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            min_rotations: MIN_ROTATIONS,
            spin_duration_ms: SPIN_DURATION_MS,
            resolve_buffer_ms: RESOLVE_BUFFER_MS,
            wheel_size: WHEEL_SIZE,
        }
    }
}

impl WheelConfig {
    pub fn validate(&self) -> WheelResult<()> {
        if self.min_rotations == 0 {
            return Err(WheelError::InvalidConfig(
                "min_rotations must be at least 1".into(),
            ));
        }
        if self.spin_duration_ms == 0 {
            return Err(WheelError::InvalidConfig(
                "spin_duration_ms must be positive".into(),
            ));
        }
        if self
            .spin_duration_ms
            .checked_add(self.resolve_buffer_ms)
            .is_none()
        {
            return Err(WheelError::InvalidConfig(format!(
                "spin_duration_ms + resolve_buffer_ms must fit in {} ms",
                u32::MAX
            )));
        }
        if !self.wheel_size.is_finite() || self.wheel_size <= 0.0 {
            return Err(WheelError::InvalidConfig(format!(
                "wheel_size must be a positive number, got {}",
                self.wheel_size
            )));
        }
        Ok(())
    }

    /// Milliseconds from trigger until the resolution timer fires.
    pub fn resolve_after_ms(&self) -> u32 {
        self.spin_duration_ms.saturating_add(self.resolve_buffer_ms)
    }
}

/// On-disk wheel description: an optional `[wheel]` table and `[[prizes]]` list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WheelFile {
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub prizes: Option<Vec<Prize>>,
}

impl WheelFile {
    pub fn from_toml_str(input: &str) -> WheelResult<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> WheelResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Validates both halves; a file without prizes falls back to the winter catalog.
    pub fn into_parts(self) -> WheelResult<(WheelConfig, Catalog)> {
        self.wheel.validate()?;
        let catalog = match self.prizes {
            Some(prizes) => Catalog::new(prizes)?,
            None => Catalog::winter(),
        };
        Ok((self.wheel, catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_wheel_table_keeps_defaults() {
        let file = WheelFile::from_toml_str("[wheel]\nmin_rotations = 3\n").unwrap();
        let (config, catalog) = file.into_parts().unwrap();
        assert_eq!(config.min_rotations, 3);
        assert_eq!(config.spin_duration_ms, SPIN_DURATION_MS);
        assert_eq!(config.resolve_after_ms(), 4100);
        assert_eq!(catalog, Catalog::winter());
    }

    #[test]
    fn prizes_array_replaces_catalog() {
        let input = r##"
[[prizes]]
id = "a"
label = "Alpha"
value = "1"
color = "#ffffff"
icon = "A"

[[prizes]]
id = "b"
label = "Beta"
value = "2"
color = "#000000"
icon = "B"
"##;
        let (_, catalog) = WheelFile::from_toml_str(input)
            .unwrap()
            .into_parts()
            .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.prizes()[1].label, "Beta");
    }

    #[test]
    fn rejects_zero_rotations_and_duration() {
        let config = WheelConfig {
            min_rotations: 0,
            ..WheelConfig::default()
        };
        assert!(matches!(config.validate(), Err(WheelError::InvalidConfig(_))));
        let config = WheelConfig {
            spin_duration_ms: 0,
            ..WheelConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_timer_that_overflows() {
        let file = WheelFile::from_toml_str("[wheel]\nspin_duration_ms = 4294967295\n").unwrap();
        assert!(matches!(file.into_parts(), Err(WheelError::InvalidConfig(_))));

        let config = WheelConfig {
            spin_duration_ms: u32::MAX - 100,
            ..WheelConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.resolve_after_ms(), u32::MAX);

        let unchecked = WheelConfig {
            spin_duration_ms: u32::MAX,
            ..WheelConfig::default()
        };
        assert_eq!(unchecked.resolve_after_ms(), u32::MAX);
    }

    #[test]
    fn empty_prize_list_is_an_error() {
        let file = WheelFile::from_toml_str("prizes = []\n").unwrap();
        assert!(matches!(file.into_parts(), Err(WheelError::EmptyCatalog)));
    }
}
