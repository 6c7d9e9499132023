//! Compressed per-node metadata
//!
//! - `value` - node identifiers, identifier spaces, tagged compressed cells
//! - `store` - the read-only [`MetadataStore`] and its loader payload
//! - `compress` - building a store from uncompressed rows

pub mod compress;
mod store;
mod value;

pub use compress::{compress, compress_plain, PlainRows};
pub use store::{CompressedRows, MetadataPayload, MetadataStore, UniqueValues};
pub use value::{CompressedValue, NodeId, NodeKind, NodeRef, Scope};
