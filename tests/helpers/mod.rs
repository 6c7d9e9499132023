//! Shared fixtures for integration tests

#![allow(dead_code)]

use empress_encoding::{MetadataPayload, MetadataStore};
use serde_json::json;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Taxonomy-style feature metadata: four tips and two internal nodes, with
/// internal id 3 colliding with tip id 3.
pub fn taxonomy_payload() -> MetadataPayload {
    serde_json::from_value(json!({
        "columns": ["Level 1", "Level 2", "Level 7", "Confidence"],
        "recurring_values": ["k__Bacteria", "p__Bacteroidetes", "s__", "Unspecified"],
        "tip_rows": {
            "1": [0, 1, 2, "0.95"],
            "3": [0, 1, "s__uniformis", "0"],
            "5": [0, "p__Firmicutes", 2, "0.7"],
            "7": ["k__Archaea", 3, 3, "1"]
        },
        "internal_rows": {
            "3": [0, "p__Proteobacteria", 2, "0.8"],
            "9": ["k__Archaea", 3, 3, "1"]
        }
    }))
    .expect("fixture payload deserializes")
}

pub fn taxonomy_store() -> MetadataStore {
    MetadataStore::try_from(taxonomy_payload()).expect("fixture store builds")
}
