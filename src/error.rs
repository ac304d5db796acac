//! # Compiler Errors
//!
//! Errors that abort work on a single node (or a single configuration load).
//! Stale references are never errors: they become warnings on the node.

use crate::model::NodeId;
use thiserror::Error;

/// Errors raised while decoding, rendering or emitting call nodes.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A persisted call kind that no variant matches. This is a missing
    /// variant case, not a user mistake.
    #[error("call kind has unexpected value: '{0}'")]
    UnknownCallKind(String),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node {node} has no value for field '{field}'")]
    MissingField { node: NodeId, field: &'static str },

    #[error("invalid extra state: {0}")]
    InvalidExtraState(#[from] serde_json::Error),

    #[error("unknown device profile: '{0}'")]
    UnknownProfile(String),

    #[error("device profile registered twice: '{0}'")]
    DuplicateProfile(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CompileError>;
