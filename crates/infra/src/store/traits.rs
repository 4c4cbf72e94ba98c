//! Store traits: the only seams through which the core touches persistence.

use stockmaster_core::{DocumentId, ProductId, WarehouseId};
use stockmaster_documents::{Document, DocumentKind};
use stockmaster_ledger::{BalanceRecord, LedgerEntry, LedgerFilter};

use super::StoreError;

/// Document persistence.
///
/// The store holds documents by id and owns the per-kind number sequences.
/// It does not enforce lifecycle rules; those live on `Document` and in the
/// service, which serializes access per document.
pub trait DocumentStore: Send + Sync {
    /// Insert a new document; fails if the id is already present.
    fn insert(&self, document: Document) -> Result<(), StoreError>;

    fn get(&self, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// Replace the stored document; fails with `Missing` if absent.
    fn update(&self, document: Document) -> Result<(), StoreError>;

    /// Remove a document, returning it if present.
    fn remove(&self, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// Next value of the per-kind document-number sequence (1-based).
    fn next_sequence(&self, kind: DocumentKind) -> Result<u64, StoreError>;

    fn list(&self) -> Result<Vec<Document>, StoreError>;
}

/// Materialized balance persistence, one row per (product, warehouse) pair.
///
/// Only the movement applier may call `upsert`; everything else reads.
pub trait BalanceStore: Send + Sync {
    fn get(
        &self,
        product: ProductId,
        warehouse: WarehouseId,
    ) -> Result<Option<BalanceRecord>, StoreError>;

    fn upsert(&self, record: BalanceRecord) -> Result<(), StoreError>;

    fn list(&self) -> Result<Vec<BalanceRecord>, StoreError>;
}

/// Append-only ledger persistence.
///
/// Entries are never updated or deleted; only the movement applier appends.
pub trait LedgerStore: Send + Sync {
    fn append(&self, entries: Vec<LedgerEntry>) -> Result<(), StoreError>;

    /// Entries matching the filter, newest first, capped by `filter.limit`.
    fn query(&self, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>, StoreError>;

    /// All entries in append order (replay, audits, tests).
    fn all(&self) -> Result<Vec<LedgerEntry>, StoreError>;
}
