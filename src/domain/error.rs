//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::tree::NodeId;

/// Domain errors represent violations of the pricing tree rules.
/// These are independent of I/O and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("node cannot hold children: {name}")]
    NotAContainer { id: NodeId, name: String },

    #[error("order cannot be nested inside another node: {number}")]
    OrderNotNestable { id: NodeId, number: String },

    #[error("node already attached to another container: {name}")]
    AlreadyAttached { id: NodeId, name: String },

    #[error("cycle detected: {child} would contain itself via {parent}")]
    CycleDetected { parent: String, child: String },

    #[error("invalid order document: {message}")]
    InvalidDocument { message: String },
}

impl DomainError {
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
