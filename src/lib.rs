//! empress-encoding: visual encoding of per-node tree metadata
//!
//! Two read-only components feed node coloring in a tree visualization:
//!
//! - [`MetadataStore`] - compressed categorical metadata for tip and internal
//!   nodes, decoded lazily, with column lookup and natural-sorted
//!   unique-value grouping
//! - [`ColorMapper`] - an immutable value-to-color mapping built from a
//!   palette id and a list of values (discrete cycling or continuous
//!   interpolation with a sentinel fallback)
//!
//! Neither component mutates after construction, so both are `Send + Sync`
//! and can be shared freely between readers.
//!
//! # Example
//!
//! ```
//! use empress_encoding::{ColorMapper, MetadataPayload, MetadataStore, Scope};
//! use serde_json::json;
//!
//! let payload: MetadataPayload = serde_json::from_value(json!({
//!     "columns": ["body site"],
//!     "recurring_values": ["gut"],
//!     "tip_rows": { "1": [0], "2": ["tongue"], "3": [0] }
//! }))
//! .unwrap();
//! let store = MetadataStore::try_from(payload).unwrap();
//!
//! let unique = store.unique_values_for_column("body site", Scope::TipOnly).unwrap();
//! assert_eq!(unique.sorted_values, vec!["gut", "tongue"]);
//!
//! let mapper = ColorMapper::new("discrete-coloring-qiime", unique.sorted_values.clone()).unwrap();
//! assert_eq!(mapper.color_hex_for_value("gut").unwrap(), "#ff0000");
//! ```

pub mod color;
pub mod config;
mod error;
pub mod metadata;
pub mod natural_sort;

// Re-exports
pub use color::{
    palette_catalog, ColorMapper, ColoringWarning, GradientLegend, PaletteDescriptor, PaletteType,
    Rgb, WarningSeverity,
};
pub use config::ColoringConfig;
pub use error::{EncodingError, ErrorKind, Result};
pub use metadata::{
    CompressedValue, MetadataPayload, MetadataStore, NodeId, NodeKind, NodeRef, Scope,
    UniqueValues,
};
