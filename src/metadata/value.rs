//! Node identifiers and compressed cell values

use crate::error::{EncodingError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Node identifier within one identifier space (tip or internal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Which identifier space a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Tip,
    Internal,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Tip => "tip",
            NodeKind::Internal => "internal",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node id tagged with its identifier space.
///
/// Tip and internal ids may collide numerically, so aggregated results
/// always carry the kind alongside the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub kind: NodeKind,
    pub id: NodeId,
}

impl NodeRef {
    pub fn tip(id: impl Into<NodeId>) -> Self {
        Self {
            kind: NodeKind::Tip,
            id: id.into(),
        }
    }

    pub fn internal(id: impl Into<NodeId>) -> Self {
        Self {
            kind: NodeKind::Internal,
            id: id.into(),
        }
    }
}

/// Which rows participate in a unique-value query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Tip rows only
    TipOnly,
    /// Tip rows followed by internal rows
    TipAndInternal,
}

impl Scope {
    /// Node kinds visited by this scope, in visiting order.
    pub fn kinds(&self) -> &'static [NodeKind] {
        match self {
            Scope::TipOnly => &[NodeKind::Tip],
            Scope::TipAndInternal => &[NodeKind::Tip, NodeKind::Internal],
        }
    }
}

impl FromStr for Scope {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tip" | "tipOnly" => Ok(Scope::TipOnly),
            "all" | "tipAndInternal" => Ok(Scope::TipAndInternal),
            other => Err(EncodingError::UnknownScope(other.to_string())),
        }
    }
}

/// One stored metadata cell: either the literal string or an index into the
/// store's recurring-value table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompressedValue {
    Literal(String),
    Recurring(u64),
}

impl CompressedValue {
    /// Decode a raw loader value (`string | integer`) into its tagged form.
    ///
    /// Integers must be non-negative and integral; anything else that is not a
    /// string fails with `MalformedCompressedValue`. Range checking against the
    /// recurring table happens in the store.
    pub fn from_json(raw: &Value) -> Result<Self> {
        match raw {
            Value::String(s) => Ok(CompressedValue::Literal(s.clone())),
            Value::Number(n) => n
                .as_u64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
                        .map(|f| f as u64)
                })
                .map(CompressedValue::Recurring)
                .ok_or_else(|| EncodingError::MalformedCompressedValue { raw: n.to_string() }),
            other => Err(EncodingError::MalformedCompressedValue {
                raw: other.to_string(),
            }),
        }
    }
}

impl From<&str> for CompressedValue {
    fn from(s: &str) -> Self {
        CompressedValue::Literal(s.to_string())
    }
}

impl From<String> for CompressedValue {
    fn from(s: String) -> Self {
        CompressedValue::Literal(s)
    }
}

impl From<u64> for CompressedValue {
    fn from(index: u64) -> Self {
        CompressedValue::Recurring(index)
    }
}

impl Serialize for CompressedValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CompressedValue::Literal(s) => serializer.serialize_str(s),
            CompressedValue::Recurring(i) => serializer.serialize_u64(*i),
        }
    }
}
