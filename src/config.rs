//! Coloring configuration
//!
//! Loaded from YAML. All fields are optional and fall back to defaults.

use crate::color::{resolve_palette, PaletteType, Rgb, CLASSIC_PALETTE_ID};
use crate::error::{EncodingError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Env var naming a YAML config file.
pub const CONFIG_ENV_VAR: &str = "EMPRESS_COLORING_CONFIG";

/// Sentinel color for values continuous coloring cannot place.
pub const DEFAULT_NAN_COLOR: &str = "#64655d";

pub const DEFAULT_CONTINUOUS_PALETTE: &str = "Viridis";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColoringConfig {
    /// Hex color for non-numeric or under-determined values
    pub nan_color: String,
    /// Palette used when a caller asks for discrete coloring without an id
    pub default_discrete_palette: String,
    /// Palette used when a caller asks for continuous coloring without an id
    pub default_continuous_palette: String,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            nan_color: DEFAULT_NAN_COLOR.to_string(),
            default_discrete_palette: CLASSIC_PALETTE_ID.to_string(),
            default_continuous_palette: DEFAULT_CONTINUOUS_PALETTE.to_string(),
        }
    }
}

impl ColoringConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: ColoringConfig =
            serde_yaml::from_str(content).context("Failed to parse coloring config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        info!("Loading coloring config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Load from the file named by `EMPRESS_COLORING_CONFIG`, or defaults when
    /// the variable is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Check the sentinel color parses and the default palettes resolve to
    /// the right family.
    pub fn validate(&self) -> Result<()> {
        self.nan_rgb()?;

        let discrete = resolve_palette(&self.default_discrete_palette)?;
        if discrete.palette_type != PaletteType::Discrete {
            return Err(EncodingError::invalid(format!(
                "default_discrete_palette '{}' is not a discrete palette",
                self.default_discrete_palette
            )));
        }

        let continuous = resolve_palette(&self.default_continuous_palette)?;
        if !continuous.palette_type.is_continuous() {
            return Err(EncodingError::invalid(format!(
                "default_continuous_palette '{}' is not a sequential or diverging palette",
                self.default_continuous_palette
            )));
        }
        Ok(())
    }

    /// The sentinel color, parsed.
    pub fn nan_rgb(&self) -> Result<Rgb> {
        Rgb::from_hex(&self.nan_color)
    }

    /// Default palette id for the requested family.
    pub fn default_palette(&self, continuous: bool) -> &str {
        if continuous {
            &self.default_continuous_palette
        } else {
            &self.default_discrete_palette
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ColoringConfig::default();
        config.validate().unwrap();
        assert_eq!(config.nan_rgb().unwrap(), Rgb::from_u32(0x64655d));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ColoringConfig::from_yaml_str("nan_color: \"#aaaaaa\"\n").unwrap();
        assert_eq!(config.nan_color, "#aaaaaa");
        assert_eq!(config.default_discrete_palette, CLASSIC_PALETTE_ID);
        assert_eq!(config.default_palette(true), "Viridis");
    }

    #[test]
    fn test_rejects_wrong_family() {
        let err = ColoringConfig::from_yaml_str("default_discrete_palette: Reds\n").unwrap_err();
        assert!(format!("{:#}", err).contains("not a discrete palette"));

        assert!(ColoringConfig::from_yaml_str("default_continuous_palette: Set1\n").is_err());
        assert!(ColoringConfig::from_yaml_str("nan_color: grey\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_continuous_palette: RdBu").unwrap();
        let config = ColoringConfig::load(file.path()).unwrap();
        assert_eq!(config.default_continuous_palette, "RdBu");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ColoringConfig::load("/nonexistent/coloring.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
