//! Value-to-color mapping
//!
//! A [`ColorMapper`] is built once per "color by column X with palette Y"
//! action and never changes afterwards. Construction:
//!
//! 1. deduplicate the values and sort them naturally
//! 2. resolve the palette id
//! 3. discrete palettes cycle their colors over the sorted values;
//!    sequential/diverging palettes interpolate numeric values over
//!    `[min, max]` and give everything else the sentinel color
//!
//! Fewer than two numeric values make a continuous ramp impossible; every
//! value then gets the sentinel color and a [`ColoringWarning`] is recorded.

use super::palette::{palette_catalog, resolve_palette, PaletteDescriptor, PaletteType};
use super::ramp::{ColorRamp, GradientLegend};
use super::rgb::Rgb;
use crate::config::ColoringConfig;
use crate::error::{EncodingError, Result};
use crate::natural_sort::{natural_sort, parse_numeric};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, warn};

/// Severity of a non-fatal coloring issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WarningSeverity {
    /// Low priority notice
    Info,
    /// Should be surfaced to the user
    Warning,
}

/// Non-fatal issue raised while building a mapping. The mapping is still
/// complete and displayable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColoringWarning {
    #[error(
        "Palette '{palette}' requires at least 2 numeric values, found {numeric}; \
         all values use the sentinel color"
    )]
    TooFewNumericValues { palette: String, numeric: usize },
}

impl ColoringWarning {
    pub fn severity(&self) -> WarningSeverity {
        match self {
            Self::TooFewNumericValues { .. } => WarningSeverity::Warning,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorMapper {
    palette: &'static PaletteDescriptor,
    sorted_values: Vec<String>,
    colors: HashMap<String, Rgb>,
    gradient: Option<GradientLegend>,
    warnings: Vec<ColoringWarning>,
}

impl ColorMapper {
    /// Build a mapping with the default configuration.
    pub fn new<I, S>(palette_id: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(palette_id, values, &ColoringConfig::default())
    }

    /// Build a mapping using the configured default palette of one family.
    pub fn with_default_palette<I, S>(
        continuous: bool,
        values: I,
        config: &ColoringConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(config.default_palette(continuous), values, config)
    }

    /// Build a mapping; fails `UnknownPalette` for ids not in the catalog
    /// (header entries included).
    pub fn with_config<I, S>(palette_id: &str, values: I, config: &ColoringConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut sorted_values: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|v| seen.insert(v.clone()))
            .collect();
        natural_sort(&mut sorted_values);

        let palette = resolve_palette(palette_id)?;

        let mut mapper = Self {
            palette,
            sorted_values,
            colors: HashMap::new(),
            gradient: None,
            warnings: Vec::new(),
        };

        match palette.palette_type {
            PaletteType::Discrete => mapper.assign_discrete(),
            PaletteType::Sequential | PaletteType::Diverging => {
                mapper.assign_continuous(config.nan_rgb()?)?
            }
            // Headers have no id, so resolve_palette never returns one.
            PaletteType::Header => return Err(EncodingError::UnknownPalette(palette_id.into())),
        }

        debug!(
            palette = palette_id,
            values = mapper.sorted_values.len(),
            continuous = mapper.is_continuous(),
            "Built color mapping"
        );

        Ok(mapper)
    }

    fn assign_discrete(&mut self) {
        let colors = self.palette.colors();
        self.colors = self
            .sorted_values
            .iter()
            .enumerate()
            .map(|(i, value)| (value.clone(), colors[i % colors.len()]))
            .collect();
    }

    fn assign_continuous(&mut self, nan_color: Rgb) -> Result<()> {
        let numeric: Vec<(&String, f64)> = self
            .sorted_values
            .iter()
            .filter_map(|v| parse_numeric(v).map(|n| (v, n)))
            .collect();

        if numeric.len() < 2 {
            let warning = ColoringWarning::TooFewNumericValues {
                palette: self.palette.id.unwrap_or(self.palette.name).to_string(),
                numeric: numeric.len(),
            };
            warn!("{}", warning);
            self.warnings.push(warning);
            self.colors = self
                .sorted_values
                .iter()
                .map(|v| (v.clone(), nan_color))
                .collect();
            return Ok(());
        }

        let (min, max) = numeric
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, n)| {
                (lo.min(*n), hi.max(*n))
            });
        let ramp = ColorRamp::new(self.palette.colors(), min, max)?;

        let mut colors: HashMap<String, Rgb> = self
            .sorted_values
            .iter()
            .map(|v| (v.clone(), nan_color))
            .collect();
        for (value, n) in &numeric {
            colors.insert((*value).clone(), ramp.color_at(*n));
        }

        let has_non_numeric = numeric.len() < self.sorted_values.len();
        self.gradient = Some(GradientLegend::from_ramp(&ramp, has_non_numeric));
        self.colors = colors;
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Full palette catalog, headers included, in display order.
    pub fn palette_catalog() -> &'static [PaletteDescriptor] {
        palette_catalog()
    }

    pub fn palette(&self) -> &'static PaletteDescriptor {
        self.palette
    }

    pub fn is_continuous(&self) -> bool {
        self.palette.palette_type.is_continuous()
    }

    /// Distinct construction values in natural order.
    pub fn sorted_values(&self) -> &[String] {
        &self.sorted_values
    }

    pub fn rgb_for_value(&self, value: &str) -> Result<Rgb> {
        self.colors
            .get(value)
            .copied()
            .ok_or_else(|| EncodingError::ValueNotFound {
                value: value.to_string(),
            })
    }

    /// Normalized `[r, g, b]` for a construction value.
    pub fn color_for_value(&self, value: &str) -> Result<[f32; 3]> {
        self.rgb_for_value(value).map(|c| c.to_unit())
    }

    /// `#rrggbb` for a construction value.
    pub fn color_hex_for_value(&self, value: &str) -> Result<String> {
        self.rgb_for_value(value).map(|c| c.to_hex())
    }

    pub fn rgb_map(&self) -> HashMap<String, [f32; 3]> {
        self.colors
            .iter()
            .map(|(v, c)| (v.clone(), c.to_unit()))
            .collect()
    }

    pub fn hex_map(&self) -> HashMap<String, String> {
        self.colors
            .iter()
            .map(|(v, c)| (v.clone(), c.to_hex()))
            .collect()
    }

    /// `(value, hex)` pairs in natural order, for a legend.
    pub fn legend(&self) -> Vec<(&str, String)> {
        self.sorted_values
            .iter()
            .map(|v| (v.as_str(), self.colors[v].to_hex()))
            .collect()
    }

    /// Ramp description for continuous mappings that could be scaled.
    pub fn gradient(&self) -> Option<&GradientLegend> {
        self.gradient.as_ref()
    }

    /// Non-fatal issues raised during construction.
    pub fn warnings(&self) -> &[ColoringWarning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CLASSIC_PALETTE_ID;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_discrete_assigns_in_sorted_order() {
        let mapper = ColorMapper::new("Set1", ["b", "a10", "a2", "b"]).unwrap();
        assert_eq!(mapper.sorted_values(), &["a2", "a10", "b"]);
        assert_eq!(mapper.color_hex_for_value("a2").unwrap(), "#e41a1c");
        assert_eq!(mapper.color_hex_for_value("a10").unwrap(), "#377eb8");
        assert_eq!(mapper.color_hex_for_value("b").unwrap(), "#4daf4a");
        assert!(mapper.warnings().is_empty());
        assert!(mapper.gradient().is_none());
    }

    #[test]
    fn test_discrete_wraps_around() {
        let values: Vec<String> = (0..30).map(|i| format!("v{}", i)).collect();
        let mapper = ColorMapper::new(CLASSIC_PALETTE_ID, values).unwrap();
        let palette = mapper.palette().colors();
        for (i, value) in mapper.sorted_values().iter().enumerate() {
            assert_eq!(mapper.rgb_for_value(value).unwrap(), palette[i % 24]);
        }
        assert_eq!(
            mapper.rgb_for_value("v24").unwrap(),
            mapper.rgb_for_value("v0").unwrap()
        );
    }

    #[test]
    fn test_unknown_value_is_not_found() {
        let mapper = ColorMapper::new("Paired", ["x"]).unwrap();
        let err = mapper.color_for_value("y").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_header_and_unknown_ids_rejected() {
        for id in ["-- Discrete --", "viridis", ""] {
            let err = ColorMapper::new(id, ["1", "2"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{id}");
        }
    }

    #[test]
    fn test_continuous_mixed_values() {
        let mapper = ColorMapper::new("Reds", ["0", "10", "abc", "5"]).unwrap();
        assert_eq!(mapper.color_hex_for_value("0").unwrap(), "#fff5f0");
        assert_eq!(mapper.color_hex_for_value("10").unwrap(), "#67000d");
        assert_eq!(mapper.color_hex_for_value("abc").unwrap(), "#64655d");
        // 5 is the midpoint of a 9-stop ramp: exactly stop 4
        assert_eq!(mapper.color_hex_for_value("5").unwrap(), "#fb6a4a");

        let gradient = mapper.gradient().unwrap();
        assert_eq!((gradient.min, gradient.mid, gradient.max), (0.0, 5.0, 10.0));
        assert!(gradient.has_non_numeric);
    }

    #[test]
    fn test_continuous_fallback_warns() {
        let mapper = ColorMapper::new("Viridis", ["1", "a", "b"]).unwrap();
        for value in ["1", "a", "b"] {
            assert_eq!(mapper.color_hex_for_value(value).unwrap(), "#64655d");
        }
        assert_eq!(
            mapper.warnings(),
            &[ColoringWarning::TooFewNumericValues {
                palette: "Viridis".into(),
                numeric: 1,
            }]
        );
        assert_eq!(mapper.warnings()[0].severity(), WarningSeverity::Warning);
        assert!(mapper.gradient().is_none());
    }

    #[test]
    fn test_configured_sentinel() {
        let config = ColoringConfig {
            nan_color: "#000000".into(),
            ..ColoringConfig::default()
        };
        let mapper = ColorMapper::with_config("RdBu", ["x"], &config).unwrap();
        assert_eq!(mapper.color_for_value("x").unwrap(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_default_palette_selection() {
        let config = ColoringConfig::default();
        let mapper = ColorMapper::with_default_palette(false, ["a"], &config).unwrap();
        assert_eq!(mapper.palette().id, Some(CLASSIC_PALETTE_ID));
        let mapper = ColorMapper::with_default_palette(true, ["1", "2"], &config).unwrap();
        assert_eq!(mapper.palette().id, Some("Viridis"));
    }

    #[test]
    fn test_legend_follows_natural_order() {
        let mapper = ColorMapper::new("Dark2", ["sample10", "sample2", "sample1"]).unwrap();
        let legend = mapper.legend();
        let labels: Vec<&str> = legend.iter().map(|(v, _)| *v).collect();
        assert_eq!(labels, vec!["sample1", "sample2", "sample10"]);
        assert_eq!(legend[0].1, "#1b9e77");
        assert_eq!(mapper.hex_map().len(), 3);
    }
}
