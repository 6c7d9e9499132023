//! Continuous color ramps
//!
//! Palette colors are treated as evenly spaced stops over `[min, max]` and
//! interpolated linearly in RGB space. Values outside the domain clamp to the
//! nearest end.

use super::rgb::Rgb;
use crate::error::{EncodingError, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<Rgb>,
    min: f64,
    max: f64,
}

impl ColorRamp {
    /// Fails `InvalidArgument` with fewer than two stops or a non-finite or
    /// inverted domain.
    pub fn new(stops: Vec<Rgb>, min: f64, max: f64) -> Result<Self> {
        if stops.len() < 2 {
            return Err(EncodingError::invalid(format!(
                "a color ramp needs at least 2 stops, got {}",
                stops.len()
            )));
        }
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(EncodingError::invalid(format!(
                "invalid ramp domain [{}, {}]",
                min, max
            )));
        }
        Ok(Self { stops, min, max })
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Where `value` falls on the ramp, in `[0, 1]`.
    ///
    /// A degenerate domain (`min == max`) maps everything to 0.
    pub fn position(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Color at relative position `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> Rgb {
        let last = self.stops.len() - 1;
        let scaled = t.clamp(0.0, 1.0) * last as f64;
        let lower = (scaled.floor() as usize).min(last - 1);
        self.stops[lower].lerp(self.stops[lower + 1], scaled - lower as f64)
    }

    /// Color for a domain value.
    pub fn color_at(&self, value: f64) -> Rgb {
        self.sample(self.position(value))
    }
}

/// Legend description of a continuous mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientLegend {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
    /// `(offset in [0, 1], hex color)` per ramp stop
    pub stops: Vec<(f64, String)>,
    /// Whether some values fell back to the sentinel color
    pub has_non_numeric: bool,
}

impl GradientLegend {
    pub(crate) fn from_ramp(ramp: &ColorRamp, has_non_numeric: bool) -> Self {
        let (min, max) = ramp.domain();
        let last = (ramp.stops().len() - 1) as f64;
        let stops = ramp
            .stops()
            .iter()
            .enumerate()
            .map(|(i, c)| (i as f64 / last, c.to_hex()))
            .collect();
        Self {
            min,
            mid: (min + max) / 2.0,
            max,
            stops,
            has_non_numeric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> ColorRamp {
        ColorRamp::new(
            vec![Rgb::new(0, 0, 0), Rgb::new(100, 0, 0), Rgb::new(100, 200, 0)],
            0.0,
            10.0,
        )
        .unwrap()
    }

    #[test]
    fn test_endpoints() {
        let ramp = ramp();
        assert_eq!(ramp.color_at(0.0), Rgb::new(0, 0, 0));
        assert_eq!(ramp.color_at(10.0), Rgb::new(100, 200, 0));
        assert_eq!(ramp.color_at(5.0), Rgb::new(100, 0, 0));
    }

    #[test]
    fn test_interpolates_within_segment() {
        let ramp = ramp();
        assert_eq!(ramp.color_at(2.5), Rgb::new(50, 0, 0));
        assert_eq!(ramp.color_at(7.5), Rgb::new(100, 100, 0));
    }

    #[test]
    fn test_clamps_outside_domain() {
        let ramp = ramp();
        assert_eq!(ramp.color_at(-4.0), ramp.color_at(0.0));
        assert_eq!(ramp.color_at(40.0), ramp.color_at(10.0));
    }

    #[test]
    fn test_rejects_bad_construction() {
        assert!(ColorRamp::new(vec![Rgb::new(0, 0, 0)], 0.0, 1.0).is_err());
        assert!(ColorRamp::new(vec![Rgb::new(0, 0, 0); 2], 2.0, 1.0).is_err());
        assert!(ColorRamp::new(vec![Rgb::new(0, 0, 0); 2], f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_gradient_legend() {
        let legend = GradientLegend::from_ramp(&ramp(), true);
        assert_eq!(legend.mid, 5.0);
        assert_eq!(
            legend.stops,
            vec![
                (0.0, "#000000".to_string()),
                (0.5, "#640000".to_string()),
                (1.0, "#64c800".to_string()),
            ]
        );
        assert!(legend.has_non_numeric);
    }
}
