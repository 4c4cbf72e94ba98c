//! Repository seams for documents, balances, and the ledger.

mod in_memory;
mod traits;

pub use in_memory::{InMemoryBalanceStore, InMemoryDocumentStore, InMemoryLedgerStore};
pub use traits::{BalanceStore, DocumentStore, LedgerStore};

use thiserror::Error;

use stockmaster_core::DomainError;

/// Store operation error.
///
/// Infrastructure failures only (lock poisoning, stale state); domain
/// failures never originate here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store's internal state could not be accessed or updated
    /// consistently (e.g. a poisoned lock, a duplicate insert).
    #[error("store conflict: {0}")]
    Conflict(String),

    /// The targeted record does not exist.
    #[error("record missing")]
    Missing,
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(msg) => DomainError::Conflict(msg),
            StoreError::Missing => DomainError::NotFound,
        }
    }
}
