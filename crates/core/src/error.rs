//! Core error types for graph operations.
//!
//! All errors are explicit, typed, and recoverable - no panics allowed.

use thiserror::Error;

/// Core error type for mind map graph operations.
#[derive(Debug, Error)]
pub enum Error {
    // Graph contract violations
    #[error("node '{node_id}' already exists")]
    DuplicateNode { node_id: String },

    #[error("edge '{edge_id}' already exists")]
    DuplicateEdge { edge_id: String },

    #[error("edge '{edge_id}' references missing node '{missing}'")]
    DanglingEdge { edge_id: String, missing: String },

    #[error("node not found: {node_id}")]
    NodeNotFound { node_id: String },

    // Node data patches
    #[error("unknown node data field '{field}'")]
    UnknownField { field: String },

    #[error("invalid value for node data field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    // Parsing errors
    #[error("JSON parse error: {reason}")]
    JsonParseFailed { reason: String },

    // Generic errors
    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },
}

impl Error {
    /// Create a duplicate node error.
    pub fn duplicate_node(node_id: impl Into<String>) -> Self {
        Self::DuplicateNode {
            node_id: node_id.into(),
        }
    }

    /// Create a duplicate edge error.
    pub fn duplicate_edge(edge_id: impl Into<String>) -> Self {
        Self::DuplicateEdge {
            edge_id: edge_id.into(),
        }
    }

    /// Create a dangling edge error.
    pub fn dangling_edge(edge_id: impl Into<String>, missing: impl Into<String>) -> Self {
        Self::DanglingEdge {
            edge_id: edge_id.into(),
            missing: missing.into(),
        }
    }

    /// Create a node not found error.
    pub fn node_not_found(node_id: impl Into<String>) -> Self {
        Self::NodeNotFound {
            node_id: node_id.into(),
        }
    }

    /// Create an unknown field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse_failed(reason: impl Into<String>) -> Self {
        Self::JsonParseFailed {
            reason: reason.into(),
        }
    }

    /// Create an invalid record error.
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// True for violations of the graph's structural contract.
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateNode { .. } | Self::DuplicateEdge { .. } | Self::DanglingEdge { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::json_parse_failed(err.to_string())
    }
}
