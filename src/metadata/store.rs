//! Read-only store of compressed per-node metadata
//!
//! Rows are kept in their compressed form and decoded on read, so memory
//! stays proportional to the number of distinct values rather than to
//! rows times average string length.

use super::value::{CompressedValue, NodeId, NodeKind, NodeRef, Scope};
use crate::error::{EncodingError, Result};
use crate::natural_sort::natural_sort;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Rows for one identifier space, iterated in ascending id order.
pub type CompressedRows = BTreeMap<NodeId, Vec<CompressedValue>>;

/// Loader hand-off format: rows hold raw JSON `string | integer` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataPayload {
    pub columns: Vec<String>,
    #[serde(default)]
    pub recurring_values: Vec<String>,
    #[serde(default)]
    pub tip_rows: BTreeMap<NodeId, Vec<Value>>,
    #[serde(default)]
    pub internal_rows: BTreeMap<NodeId, Vec<Value>>,
}

/// Distinct values of one column plus the nodes carrying each value.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueValues {
    /// Distinct values in natural order
    pub sorted_values: Vec<String>,
    /// Nodes per value, in the order they were encountered
    pub value_to_nodes: HashMap<String, Vec<NodeRef>>,
}

impl UniqueValues {
    /// Nodes carrying `value`, or an empty slice.
    pub fn nodes_for(&self, value: &str) -> &[NodeRef] {
        self.value_to_nodes
            .get(value)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Compressed categorical metadata for tip and internal nodes.
///
/// Built once per session; every accessor takes `&self`, so a store can be
/// shared across readers freely.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    recurring_values: Vec<String>,
    tip_rows: CompressedRows,
    internal_rows: CompressedRows,
}

impl MetadataStore {
    /// Build a store from already-tagged rows.
    ///
    /// Fails `InvalidArgument` on duplicate column names or a row whose
    /// length differs from the column count, and `IndexOutOfRange` on any
    /// recurring index outside the table.
    pub fn new(
        columns: Vec<String>,
        recurring_values: Vec<String>,
        tip_rows: CompressedRows,
        internal_rows: CompressedRows,
    ) -> Result<Self> {
        let mut column_index = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            if column_index.insert(name.clone(), idx).is_some() {
                return Err(EncodingError::invalid(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }

        for (kind, rows) in [(NodeKind::Tip, &tip_rows), (NodeKind::Internal, &internal_rows)] {
            for (node, row) in rows {
                if row.len() != columns.len() {
                    return Err(EncodingError::invalid(format!(
                        "{} node {} has {} values but there are {} columns",
                        kind,
                        node,
                        row.len(),
                        columns.len()
                    )));
                }
                for cell in row {
                    if let CompressedValue::Recurring(index) = cell {
                        if *index >= recurring_values.len() as u64 {
                            return Err(EncodingError::IndexOutOfRange {
                                index: *index,
                                len: recurring_values.len(),
                            });
                        }
                    }
                }
            }
        }

        debug!(
            columns = columns.len(),
            recurring = recurring_values.len(),
            tips = tip_rows.len(),
            internal = internal_rows.len(),
            "Built metadata store"
        );

        Ok(Self {
            columns,
            column_index,
            recurring_values,
            tip_rows,
            internal_rows,
        })
    }

    /// Store with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            column_index: HashMap::new(),
            recurring_values: Vec::new(),
            tip_rows: BTreeMap::new(),
            internal_rows: BTreeMap::new(),
        }
    }

    // =========================================================================
    // COLUMNS
    // =========================================================================

    /// Copy of the ordered column names.
    pub fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of `name` in the column catalog.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.column_index
            .get(name)
            .copied()
            .ok_or_else(|| EncodingError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    // =========================================================================
    // ROWS
    // =========================================================================

    fn rows(&self, kind: NodeKind) -> &CompressedRows {
        match kind {
            NodeKind::Tip => &self.tip_rows,
            NodeKind::Internal => &self.internal_rows,
        }
    }

    pub fn has_row(&self, node: NodeId, kind: NodeKind) -> bool {
        self.rows(kind).contains_key(&node)
    }

    /// Number of rows stored for `kind`.
    pub fn row_count(&self, kind: NodeKind) -> usize {
        self.rows(kind).len()
    }

    /// Ids with a row for `kind`, ascending.
    pub fn node_ids(&self, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.rows(kind).keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.tip_rows.is_empty() && self.internal_rows.is_empty()
    }

    /// Decompressed value of one cell.
    ///
    /// Fails `RowNotFound` if the node has no row for `kind`, and
    /// `CellNotFound` if `column` is past the end of the row.
    pub fn value(&self, node: NodeId, column: usize, kind: NodeKind) -> Result<&str> {
        let row = self
            .rows(kind)
            .get(&node)
            .ok_or(EncodingError::RowNotFound { node, kind })?;
        let cell = row.get(column).ok_or(EncodingError::CellNotFound {
            node,
            kind,
            column,
            len: row.len(),
        })?;
        self.decompress(cell)
    }

    /// All decompressed values for a node, or `None` when the node has no row
    /// of this kind. Unlike [`value`](Self::value), a missing row is not an
    /// error here.
    pub fn row(&self, node: NodeId, kind: NodeKind) -> Option<Vec<&str>> {
        // Indices were range-checked at construction, so every cell resolves.
        self.rows(kind)
            .get(&node)?
            .iter()
            .map(|cell| self.decompress(cell).ok())
            .collect()
    }

    // =========================================================================
    // DECOMPRESSION
    // =========================================================================

    /// The write-once recurring-value table.
    pub fn recurring_values(&self) -> &[String] {
        &self.recurring_values
    }

    /// Resolve a compressed cell to its string value.
    pub fn decompress<'a>(&'a self, raw: &'a CompressedValue) -> Result<&'a str> {
        match raw {
            CompressedValue::Literal(s) => Ok(s.as_str()),
            CompressedValue::Recurring(index) => usize::try_from(*index)
                .ok()
                .and_then(|i| self.recurring_values.get(i))
                .map(String::as_str)
                .ok_or(EncodingError::IndexOutOfRange {
                    index: *index,
                    len: self.recurring_values.len(),
                }),
        }
    }

    /// Resolve a raw loader cell (`string | integer`) to its string value.
    pub fn decompress_json(&self, raw: &Value) -> Result<String> {
        let tagged = CompressedValue::from_json(raw)?;
        self.decompress(&tagged).map(str::to_string)
    }

    // =========================================================================
    // COLUMN QUERIES
    // =========================================================================

    /// `(node, value)` pairs of one column for one kind, ascending by id.
    pub fn column_values(&self, column: &str, kind: NodeKind) -> Result<Vec<(NodeId, &str)>> {
        let idx = self.column_index(column)?;
        self.rows(kind)
            .iter()
            .map(|(node, row)| Ok((*node, self.decompress(&row[idx])?)))
            .collect()
    }

    /// Distinct values of `column` over `scope`, naturally sorted, with the
    /// nodes carrying each value.
    ///
    /// Tip rows are visited before internal rows, each in ascending id order;
    /// per-value node lists keep that encounter order and are never re-sorted.
    pub fn unique_values_for_column(&self, column: &str, scope: Scope) -> Result<UniqueValues> {
        let idx = self.column_index(column)?;

        let mut first_seen: Vec<String> = Vec::new();
        let mut value_to_nodes: HashMap<String, Vec<NodeRef>> = HashMap::new();

        for &kind in scope.kinds() {
            for (node, row) in self.rows(kind) {
                let value = self.decompress(&row[idx])?;
                let node_ref = NodeRef { kind, id: *node };
                match value_to_nodes.get_mut(value) {
                    Some(nodes) => nodes.push(node_ref),
                    None => {
                        first_seen.push(value.to_string());
                        value_to_nodes.insert(value.to_string(), vec![node_ref]);
                    }
                }
            }
        }

        natural_sort(&mut first_seen);

        Ok(UniqueValues {
            sorted_values: first_seen,
            value_to_nodes,
        })
    }

    /// [`unique_values_for_column`](Self::unique_values_for_column) with the
    /// scope given by name (`"tip"` or `"all"`).
    pub fn unique_values_by_method(&self, column: &str, method: &str) -> Result<UniqueValues> {
        let scope: Scope = method.parse()?;
        self.unique_values_for_column(column, scope)
    }
}

impl TryFrom<MetadataPayload> for MetadataStore {
    type Error = EncodingError;

    fn try_from(payload: MetadataPayload) -> Result<Self> {
        fn decode(rows: BTreeMap<NodeId, Vec<Value>>) -> Result<CompressedRows> {
            rows.into_iter()
                .map(|(node, cells)| {
                    let row = cells
                        .iter()
                        .map(CompressedValue::from_json)
                        .collect::<Result<Vec<_>>>()?;
                    Ok((node, row))
                })
                .collect()
        }

        let tip_rows = decode(payload.tip_rows)?;
        let internal_rows = decode(payload.internal_rows)?;
        Self::new(
            payload.columns,
            payload.recurring_values,
            tip_rows,
            internal_rows,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn store() -> MetadataStore {
        let payload: MetadataPayload = serde_json::from_value(json!({
            "columns": ["Level 1", "Level 2", "Confidence"],
            "recurring_values": ["k__Bacteria", "Unspecified"],
            "tip_rows": {
                "1": [0, "p__Bacteroidetes", "0.95"],
                "2": [0, "p__Firmicutes", "0"]
            },
            "internal_rows": {
                "2": ["k__Archaea", 1, "1"]
            }
        }))
        .unwrap();
        MetadataStore::try_from(payload).unwrap()
    }

    #[test]
    fn test_column_index() {
        let store = store();
        assert_eq!(store.column_index("Level 2").unwrap(), 1);
        let err = store.column_index("Level 9").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_ids_collide_across_kinds() {
        let store = store();
        assert_eq!(store.value(NodeId(2), 0, NodeKind::Tip).unwrap(), "k__Bacteria");
        assert_eq!(store.value(NodeId(2), 0, NodeKind::Internal).unwrap(), "k__Archaea");
        assert!(!store.has_row(NodeId(1), NodeKind::Internal));
    }

    #[test]
    fn test_value_cell_out_of_range() {
        let store = store();
        let err = store.value(NodeId(1), 3, NodeKind::Tip).unwrap_err();
        assert!(matches!(err, EncodingError::CellNotFound { column: 3, len: 3, .. }));
    }

    #[test]
    fn test_decompress_literal_passthrough() {
        let store = store();
        let raw = CompressedValue::Literal("7".into());
        assert_eq!(store.decompress(&raw).unwrap(), "7");
        assert_eq!(store.decompress_json(&json!(1)).unwrap(), "Unspecified");
        let err = store.decompress_json(&json!(2)).unwrap_err();
        assert_eq!(err, EncodingError::IndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn test_construction_rejects_bad_rows() {
        let mut tips = CompressedRows::new();
        tips.insert(NodeId(0), vec!["a".into()]);
        let err = MetadataStore::new(
            vec!["x".into(), "y".into()],
            vec![],
            tips,
            CompressedRows::new(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut tips = CompressedRows::new();
        tips.insert(NodeId(0), vec![CompressedValue::Recurring(4)]);
        let err = MetadataStore::new(vec!["x".into()], vec!["a".into()], tips, CompressedRows::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCompression);
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = MetadataStore::new(
            vec!["x".into(), "x".into()],
            vec![],
            CompressedRows::new(),
            CompressedRows::new(),
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_column_values_in_id_order() {
        let store = store();
        assert_eq!(
            store.column_values("Level 2", NodeKind::Tip).unwrap(),
            vec![(NodeId(1), "p__Bacteroidetes"), (NodeId(2), "p__Firmicutes")]
        );
    }
}
