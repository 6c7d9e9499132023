//! Metadata compression
//!
//! Turns plain string rows into a [`MetadataStore`]. Every value used at
//! least twice across all rows goes into the recurring table, most frequent
//! first (ties keep first-occurrence order); cells holding such a value are
//! stored as an index, all others as the literal string.

use super::store::{CompressedRows, MetadataStore};
use super::value::{CompressedValue, NodeId};
use crate::error::{EncodingError, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Uncompressed rows for one identifier space.
pub type PlainRows = BTreeMap<NodeId, Vec<String>>;

/// Compress tip and internal rows sharing one column catalog.
pub fn compress(
    columns: Vec<String>,
    tip_rows: PlainRows,
    internal_rows: PlainRows,
) -> Result<MetadataStore> {
    for (node, row) in tip_rows.iter().chain(internal_rows.iter()) {
        if row.len() != columns.len() {
            return Err(EncodingError::invalid(format!(
                "node {} has {} values but there are {} columns",
                node,
                row.len(),
                columns.len()
            )));
        }
    }

    // Count occurrences, remembering first-occurrence order for ties.
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let cells = tip_rows
        .values()
        .chain(internal_rows.values())
        .flat_map(|row| row.iter());
    for (position, value) in cells.enumerate() {
        counts
            .entry(value.as_str())
            .or_insert((0, position))
            .0 += 1;
    }

    let mut recurring: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .filter(|(_, (count, _))| *count > 1)
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    recurring.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let index_of: HashMap<&str, u64> = recurring
        .iter()
        .enumerate()
        .map(|(idx, (value, _, _))| (*value, idx as u64))
        .collect();

    let encode = |rows: &PlainRows| -> CompressedRows {
        rows.iter()
            .map(|(node, row)| {
                let cells: Vec<CompressedValue> = row
                    .iter()
                    .map(|value| match index_of.get(value.as_str()) {
                        Some(idx) => CompressedValue::Recurring(*idx),
                        None => CompressedValue::Literal(value.clone()),
                    })
                    .collect();
                (*node, cells)
            })
            .collect()
    };

    let compressed_tips = encode(&tip_rows);
    let compressed_internal = encode(&internal_rows);
    let recurring_values: Vec<String> = recurring
        .iter()
        .map(|(value, _, _)| value.to_string())
        .collect();

    debug!(
        recurring = recurring_values.len(),
        "Compressed metadata rows"
    );

    MetadataStore::new(
        columns,
        recurring_values,
        compressed_tips,
        compressed_internal,
    )
}

/// Compress rows for a single identifier space (stored as tips).
pub fn compress_plain(columns: Vec<String>, rows: PlainRows) -> Result<MetadataStore> {
    compress(columns, rows, PlainRows::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::NodeKind;
    use pretty_assertions::assert_eq;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_recurring_values_by_frequency() {
        let columns = row(&["Metadata1", "Metadata2", "Metadata3", "Metadata4"]);
        let mut rows = PlainRows::new();
        rows.insert(NodeId(0), row(&["0", "0", "1", "abc"]));
        rows.insert(NodeId(1), row(&["0", "0", "2", "def"]));
        rows.insert(NodeId(2), row(&["0", "0", "3", "ghi"]));
        rows.insert(NodeId(3), row(&["1", "0", "4", "jkl"]));

        let store = compress_plain(columns, rows).unwrap();

        // "0" occurs 7 times, "1" twice; everything else once.
        assert_eq!(store.recurring_values(), &["0".to_string(), "1".to_string()]);
        assert_eq!(
            store.row(NodeId(3), NodeKind::Tip).unwrap(),
            vec!["1", "0", "4", "jkl"]
        );
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let columns = row(&["a"]);
        let mut tips = PlainRows::new();
        tips.insert(NodeId(0), row(&["y"]));
        tips.insert(NodeId(1), row(&["x"]));
        let mut internal = PlainRows::new();
        internal.insert(NodeId(0), row(&["x"]));
        internal.insert(NodeId(1), row(&["y"]));

        let store = compress(columns, tips, internal).unwrap();
        assert_eq!(store.recurring_values(), &["y".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_row_length_mismatch() {
        let mut rows = PlainRows::new();
        rows.insert(NodeId(0), row(&["only one"]));
        let err = compress_plain(row(&["a", "b"]), rows).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }
}
