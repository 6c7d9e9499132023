//! Value-to-color mapping
//!
//! - `rgb` - 8-bit colors, hex conversion
//! - `palette` - the fixed palette catalog
//! - `ramp` - continuous interpolation over a numeric domain
//! - `mapper` - [`ColorMapper`], the immutable value-to-color mapping

mod mapper;
pub mod palette;
mod ramp;
mod rgb;

pub use mapper::{ColorMapper, ColoringWarning, WarningSeverity};
pub use palette::{
    palette_catalog, palettes_of_type, resolve_palette, selectable_palettes, PaletteDescriptor,
    PaletteType, CLASSIC_PALETTE_ID,
};
pub use ramp::{ColorRamp, GradientLegend};
pub use rgb::Rgb;
