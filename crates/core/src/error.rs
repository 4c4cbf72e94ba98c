//! Domain error model.

use thiserror::Error;

use crate::id::{ProductId, WarehouseId};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Every variant
/// is detected before or during the atomic validate unit and aborts it with no
/// partial mutation; none are silently recovered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing/malformed input at create/update time (e.g. no lines,
    /// non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced document, product, or warehouse does not exist.
    #[error("not found")]
    NotFound,

    /// A product/warehouse reference is structurally invalid or unresolvable.
    #[error("malformed reference: {0}")]
    MalformedReference(String),

    /// Validate (or update/delete) called on a document already done.
    #[error("document already validated")]
    AlreadyValidated,

    /// Validate called on a document with zero lines.
    #[error("document has no lines")]
    EmptyDocument,

    /// A movement would drive the on-hand quantity negative.
    #[error(
        "insufficient stock for product {product} in warehouse {warehouse}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product: ProductId,
        warehouse: WarehouseId,
        requested: i64,
        available: i64,
    },

    /// The atomic unit could not be committed (e.g. poisoned lock, stale
    /// store state). Not produced on the normal path under pessimistic locking.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn malformed_reference(msg: impl Into<String>) -> Self {
        Self::MalformedReference(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
