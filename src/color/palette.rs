//! Palette catalog
//!
//! A fixed, ordered list of palettes grouped under non-selectable header
//! entries. Discrete palettes are cycled over sorted category values;
//! sequential and diverging palettes are interpolated as continuous ramps.

use super::rgb::Rgb;
use crate::error::{EncodingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Id of the built-in 24-color discrete palette.
pub const CLASSIC_PALETTE_ID: &str = "discrete-coloring-qiime";

/// Palette family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Discrete,
    Sequential,
    Diverging,
    /// Catalog separator, never selectable
    Header,
}

impl PaletteType {
    /// Sequential and diverging palettes are interpolated.
    pub fn is_continuous(&self) -> bool {
        matches!(self, PaletteType::Sequential | PaletteType::Diverging)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteDescriptor {
    /// `None` for header entries
    pub id: Option<&'static str>,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub palette_type: PaletteType,
    #[serde(skip)]
    colors: &'static [u32],
}

impl PaletteDescriptor {
    const fn header(name: &'static str) -> Self {
        Self {
            id: None,
            name,
            palette_type: PaletteType::Header,
            colors: &[],
        }
    }

    const fn palette(
        id: &'static str,
        name: &'static str,
        palette_type: PaletteType,
        colors: &'static [u32],
    ) -> Self {
        Self {
            id: Some(id),
            name,
            palette_type,
            colors,
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.palette_type != PaletteType::Header
    }

    /// Palette colors in order (discrete) or as evenly spaced ramp stops
    /// (continuous). Empty for headers.
    pub fn colors(&self) -> Vec<Rgb> {
        self.colors.iter().map(|c| Rgb::from_u32(*c)).collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

// =============================================================================
// DISCRETE
// =============================================================================

const CLASSIC: &[u32] = &[
    0xff0000, 0x0000ff, 0xf27304, 0x008000, 0x91278d, 0xffff00, 0x7cecf4, 0xf49ac2, 0x5da09e,
    0x6b440b, 0x808080, 0xf79679, 0x7da9d8, 0xfcc688, 0x80c99b, 0xa287bf, 0xfff899, 0xc49c6b,
    0xc0c0c0, 0xed008a, 0x00b6ff, 0xa54700, 0x808000, 0x008080,
];

const PAIRED: &[u32] = &[
    0xa6cee3, 0x1f78b4, 0xb2df8a, 0x33a02c, 0xfb9a99, 0xe31a1c, 0xfdbf6f, 0xff7f00, 0xcab2d6,
    0x6a3d9a, 0xffff99, 0xb15928,
];
const ACCENT: &[u32] = &[
    0x7fc97f, 0xbeaed4, 0xfdc086, 0xffff99, 0x386cb0, 0xf0027f, 0xbf5b17, 0x666666,
];
const DARK2: &[u32] = &[
    0x1b9e77, 0xd95f02, 0x7570b3, 0xe7298a, 0x66a61e, 0xe6ab02, 0xa6761d, 0x666666,
];
const SET1: &[u32] = &[
    0xe41a1c, 0x377eb8, 0x4daf4a, 0x984ea3, 0xff7f00, 0xffff33, 0xa65628, 0xf781bf, 0x999999,
];
const SET2: &[u32] = &[
    0x66c2a5, 0xfc8d62, 0x8da0cb, 0xe78ac3, 0xa6d854, 0xffd92f, 0xe5c494, 0xb3b3b3,
];
const SET3: &[u32] = &[
    0x8dd3c7, 0xffffb3, 0xbebada, 0xfb8072, 0x80b1d3, 0xfdb462, 0xb3de69, 0xfccde5, 0xd9d9d9,
    0xbc80bd, 0xccebc5, 0xffed6f,
];
const PASTEL1: &[u32] = &[
    0xfbb4ae, 0xb3cde3, 0xccebc5, 0xdecbe4, 0xfed9a6, 0xffffcc, 0xe5d8bd, 0xfddaec, 0xf2f2f2,
];
const PASTEL2: &[u32] = &[
    0xb3e2cd, 0xfdcdac, 0xcbd5e8, 0xf4cae4, 0xe6f5c9, 0xfff2ae, 0xf1e2cc, 0xcccccc,
];

// =============================================================================
// SEQUENTIAL
// =============================================================================

const VIRIDIS: &[u32] = &[
    0x440154, 0x482777, 0x3f4a8a, 0x31678e, 0x26838f, 0x1f9d8a, 0x6cce5a, 0xb6de2b, 0xfee825,
];
const REDS: &[u32] = &[
    0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
];
const RDPU: &[u32] = &[
    0xfff7f3, 0xfde0dd, 0xfcc5c0, 0xfa9fb5, 0xf768a1, 0xdd3497, 0xae017e, 0x7a0177, 0x49006a,
];
const ORANGES: &[u32] = &[
    0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704,
];
const ORRD: &[u32] = &[
    0xfff7ec, 0xfee8c8, 0xfdd49e, 0xfdbb84, 0xfc8d59, 0xef6548, 0xd7301f, 0xb30000, 0x7f0000,
];
const YLORBR: &[u32] = &[
    0xffffe5, 0xfff7bc, 0xfee391, 0xfec44f, 0xfe9929, 0xec7014, 0xcc4c02, 0x993404, 0x662506,
];
const YLORRD: &[u32] = &[
    0xffffcc, 0xffeda0, 0xfed976, 0xfeb24c, 0xfd8d3c, 0xfc4e2a, 0xe31a1c, 0xbd0026, 0x800026,
];
const YLGN: &[u32] = &[
    0xffffe5, 0xf7fcb9, 0xd9f0a3, 0xaddd8e, 0x78c679, 0x41ab5d, 0x238443, 0x006837, 0x004529,
];
const YLGNBU: &[u32] = &[
    0xffffd9, 0xedf8b1, 0xc7e9b4, 0x7fcdbb, 0x41b6c4, 0x1d91c0, 0x225ea8, 0x253494, 0x081d58,
];
const GREENS: &[u32] = &[
    0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
];
const GNBU: &[u32] = &[
    0xf7fcf0, 0xe0f3db, 0xccebc5, 0xa8ddb5, 0x7bccc4, 0x4eb3d3, 0x2b8cbe, 0x0868ac, 0x084081,
];
const BLUES: &[u32] = &[
    0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
];
const BUGN: &[u32] = &[
    0xf7fcfd, 0xe5f5f9, 0xccece6, 0x99d8c9, 0x66c2a4, 0x41ae76, 0x238b45, 0x006d2c, 0x00441b,
];
const BUPU: &[u32] = &[
    0xf7fcfd, 0xe0ecf4, 0xbfd3e6, 0x9ebcda, 0x8c96c6, 0x8c6bb1, 0x88419d, 0x810f7c, 0x4d004b,
];
const PURPLES: &[u32] = &[
    0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d,
];
const PURD: &[u32] = &[
    0xf7f4f9, 0xe7e1ef, 0xd4b9da, 0xc994c7, 0xdf65b0, 0xe7298a, 0xce1256, 0x980043, 0x67001f,
];
const PUBUGN: &[u32] = &[
    0xfff7fb, 0xece2f0, 0xd0d1e6, 0xa6bddb, 0x67a9cf, 0x3690c0, 0x02818a, 0x016c59, 0x014636,
];
const GREYS: &[u32] = &[
    0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525, 0x000000,
];

// =============================================================================
// DIVERGING
// =============================================================================

const SPECTRAL: &[u32] = &[
    0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xe6f598, 0xabdda4, 0x66c2a5,
    0x3288bd, 0x5e4fa2,
];
const RDBU: &[u32] = &[
    0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7, 0xd1e5f0, 0x92c5de, 0x4393c3,
    0x2166ac, 0x053061,
];
const RDYLGN: &[u32] = &[
    0xa50026, 0xd73027, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xd9ef8b, 0xa6d96a, 0x66bd63,
    0x1a9850, 0x006837,
];
const RDYLBU: &[u32] = &[
    0xa50026, 0xd73027, 0xf46d43, 0xfdae61, 0xfee090, 0xffffbf, 0xe0f3f8, 0xabd9e9, 0x74add1,
    0x4575b4, 0x313695,
];
const RDGY: &[u32] = &[
    0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xffffff, 0xe0e0e0, 0xbababa, 0x878787,
    0x4d4d4d, 0x1a1a1a,
];
const PIYG: &[u32] = &[
    0x8e0152, 0xc51b7d, 0xde77ae, 0xf1b6da, 0xfde0ef, 0xf7f7f7, 0xe6f5d0, 0xb8e186, 0x7fbc41,
    0x4d9221, 0x276419,
];
const PRGN: &[u32] = &[
    0x40004b, 0x762a83, 0x9970ab, 0xc2a5cf, 0xe7d4e8, 0xf7f7f7, 0xd9f0d3, 0xa6dba0, 0x5aae61,
    0x1b7837, 0x00441b,
];
const PUOR: &[u32] = &[
    0x7f3b08, 0xb35806, 0xe08214, 0xfdb863, 0xfee0b6, 0xf7f7f7, 0xd8daeb, 0xb2abd2, 0x8073ac,
    0x542788, 0x2d004b,
];
const BRBG: &[u32] = &[
    0x543005, 0x8c510a, 0xbf812d, 0xdfc27d, 0xf6e8c3, 0xf5f5f5, 0xc7eae5, 0x80cdc1, 0x35978f,
    0x01665e, 0x003c30,
];

use PaletteType::{Discrete, Diverging, Sequential};

static CATALOG: &[PaletteDescriptor] = &[
    PaletteDescriptor::header("-- Discrete --"),
    PaletteDescriptor::palette(CLASSIC_PALETTE_ID, "Classic QIIME Colors", Discrete, CLASSIC),
    PaletteDescriptor::palette("Paired", "Paired", Discrete, PAIRED),
    PaletteDescriptor::palette("Accent", "Accent", Discrete, ACCENT),
    PaletteDescriptor::palette("Dark2", "Dark", Discrete, DARK2),
    PaletteDescriptor::palette("Set1", "Set1", Discrete, SET1),
    PaletteDescriptor::palette("Set2", "Set2", Discrete, SET2),
    PaletteDescriptor::palette("Set3", "Set3", Discrete, SET3),
    PaletteDescriptor::palette("Pastel1", "Pastel1", Discrete, PASTEL1),
    PaletteDescriptor::palette("Pastel2", "Pastel2", Discrete, PASTEL2),
    PaletteDescriptor::header("-- Sequential --"),
    PaletteDescriptor::palette("Viridis", "Viridis", Sequential, VIRIDIS),
    PaletteDescriptor::palette("Reds", "Reds", Sequential, REDS),
    PaletteDescriptor::palette("RdPu", "Red-Purple", Sequential, RDPU),
    PaletteDescriptor::palette("Oranges", "Oranges", Sequential, ORANGES),
    PaletteDescriptor::palette("OrRd", "Orange-Red", Sequential, ORRD),
    PaletteDescriptor::palette("YlOrBr", "Yellow-Orange-Brown", Sequential, YLORBR),
    PaletteDescriptor::palette("YlOrRd", "Yellow-Orange-Red", Sequential, YLORRD),
    PaletteDescriptor::palette("YlGn", "Yellow-Green", Sequential, YLGN),
    PaletteDescriptor::palette("YlGnBu", "Yellow-Green-Blue", Sequential, YLGNBU),
    PaletteDescriptor::palette("Greens", "Greens", Sequential, GREENS),
    PaletteDescriptor::palette("GnBu", "Green-Blue", Sequential, GNBU),
    PaletteDescriptor::palette("Blues", "Blues", Sequential, BLUES),
    PaletteDescriptor::palette("BuGn", "Blue-Green", Sequential, BUGN),
    PaletteDescriptor::palette("BuPu", "Blue-Purple", Sequential, BUPU),
    PaletteDescriptor::palette("Purples", "Purples", Sequential, PURPLES),
    PaletteDescriptor::palette("PuRd", "Purple-Red", Sequential, PURD),
    PaletteDescriptor::palette("PuBuGn", "Purple-Blue-Green", Sequential, PUBUGN),
    PaletteDescriptor::palette("Greys", "Greys", Sequential, GREYS),
    PaletteDescriptor::header("-- Diverging --"),
    PaletteDescriptor::palette("Spectral", "Spectral", Diverging, SPECTRAL),
    PaletteDescriptor::palette("RdBu", "Red-Blue", Diverging, RDBU),
    PaletteDescriptor::palette("RdYlGn", "Red-Yellow-Green", Diverging, RDYLGN),
    PaletteDescriptor::palette("RdYlBu", "Red-Yellow-Blue", Diverging, RDYLBU),
    PaletteDescriptor::palette("RdGy", "Red-Grey", Diverging, RDGY),
    PaletteDescriptor::palette("PiYG", "Pink-Yellow-Green", Diverging, PIYG),
    PaletteDescriptor::palette("PRGn", "Purple-Green", Diverging, PRGN),
    PaletteDescriptor::palette("PuOr", "Purple-Orange", Diverging, PUOR),
    PaletteDescriptor::palette("BrBG", "Brown-Blue-Green", Diverging, BRBG),
];

static PALETTES_BY_ID: LazyLock<HashMap<&'static str, &'static PaletteDescriptor>> =
    LazyLock::new(|| {
        CATALOG
            .iter()
            .filter_map(|p| p.id.map(|id| (id, p)))
            .collect()
    });

/// Full ordered catalog, headers included.
pub fn palette_catalog() -> &'static [PaletteDescriptor] {
    CATALOG
}

/// Look up a selectable palette by id.
pub fn resolve_palette(id: &str) -> Result<&'static PaletteDescriptor> {
    PALETTES_BY_ID
        .get(id)
        .copied()
        .ok_or_else(|| EncodingError::UnknownPalette(id.to_string()))
}

/// Catalog without header entries, in catalog order.
pub fn selectable_palettes() -> impl Iterator<Item = &'static PaletteDescriptor> {
    CATALOG.iter().filter(|p| p.is_selectable())
}

/// Palettes of one family, in catalog order.
pub fn palettes_of_type(palette_type: PaletteType) -> impl Iterator<Item = &'static PaletteDescriptor> {
    CATALOG
        .iter()
        .filter(move |p| p.palette_type == palette_type)
}
