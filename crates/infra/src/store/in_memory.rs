//! In-memory store implementations.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use stockmaster_core::{DocumentId, ProductId, WarehouseId};
use stockmaster_documents::{Document, DocumentKind};
use stockmaster_ledger::{BalanceRecord, LedgerEntry, LedgerFilter};

use super::traits::{BalanceStore, DocumentStore, LedgerStore};
use super::StoreError;

fn poisoned() -> StoreError {
    StoreError::Conflict("lock poisoned".to_string())
}

/// In-memory document store with per-kind number sequences.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<DocumentId, Document>>,
    sequences: Mutex<HashMap<DocumentKind, u64>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert(&self, document: Document) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        if documents.contains_key(&document.id()) {
            return Err(StoreError::Conflict(format!(
                "document {} already exists",
                document.id()
            )));
        }
        documents.insert(document.id(), document);
        Ok(())
    }

    fn get(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let documents = self.documents.read().map_err(|_| poisoned())?;
        Ok(documents.get(&id).cloned())
    }

    fn update(&self, document: Document) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        match documents.get_mut(&document.id()) {
            Some(slot) => {
                *slot = document;
                Ok(())
            }
            None => Err(StoreError::Missing),
        }
    }

    fn remove(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        Ok(documents.remove(&id))
    }

    fn next_sequence(&self, kind: DocumentKind) -> Result<u64, StoreError> {
        let mut sequences = self.sequences.lock().map_err(|_| poisoned())?;
        let counter = sequences.entry(kind).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    fn list(&self) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.read().map_err(|_| poisoned())?;
        let mut all: Vec<Document> = documents.values().cloned().collect();
        all.sort_by_key(|d| d.created_at());
        Ok(all)
    }
}

/// In-memory balance store keyed by (product, warehouse).
#[derive(Debug, Default)]
pub struct InMemoryBalanceStore {
    balances: RwLock<HashMap<(ProductId, WarehouseId), BalanceRecord>>,
}

impl InMemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn get(
        &self,
        product: ProductId,
        warehouse: WarehouseId,
    ) -> Result<Option<BalanceRecord>, StoreError> {
        let balances = self.balances.read().map_err(|_| poisoned())?;
        Ok(balances.get(&(product, warehouse)).cloned())
    }

    fn upsert(&self, record: BalanceRecord) -> Result<(), StoreError> {
        let mut balances = self.balances.write().map_err(|_| poisoned())?;
        balances.insert((record.product, record.warehouse), record);
        Ok(())
    }

    fn list(&self) -> Result<Vec<BalanceRecord>, StoreError> {
        let balances = self.balances.read().map_err(|_| poisoned())?;
        let mut all: Vec<BalanceRecord> = balances.values().cloned().collect();
        all.sort_by_key(|r| (r.product, r.warehouse));
        Ok(all)
    }
}

/// In-memory append-only ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    entries: RwLock<Vec<LedgerEntry>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn append(&self, mut new_entries: Vec<LedgerEntry>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.append(&mut new_entries);
        Ok(())
    }

    fn query(&self, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        let mut matching: Vec<LedgerEntry> = entries
            .iter()
            .rev()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    fn all(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockmaster_core::UserId;
    use stockmaster_documents::{DocumentBody, DocumentNumber, ReceiptLine};
    use stockmaster_ledger::EntryKind;
    use uuid::Uuid;

    fn sample_document() -> Document {
        Document::new(
            DocumentId::new(),
            DocumentNumber::generate("REC", 1, Utc::now()),
            DocumentBody::Receipt {
                supplier: "Acme".to_string(),
                warehouse: WarehouseId::new(),
                lines: vec![ReceiptLine {
                    product: ProductId::new(),
                    quantity: 1,
                    unit_price: 0,
                }],
            },
            None,
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    fn sample_entry(change: i64, balance_after: i64) -> LedgerEntry {
        LedgerEntry {
            entry_id: Uuid::now_v7(),
            product: ProductId::new(),
            warehouse: WarehouseId::new(),
            quantity_change: change,
            balance_after,
            kind: EntryKind::Receipt,
            document_id: DocumentId::new(),
            document_number: "REC-202601-000001".to_string(),
            note: None,
            created_by: UserId::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_insert_is_a_conflict() {
        let store = InMemoryDocumentStore::new();
        let doc = sample_document();
        store.insert(doc.clone()).unwrap();
        assert!(matches!(store.insert(doc), Err(StoreError::Conflict(_))));
    }

    #[test]
    fn update_of_unknown_document_is_missing() {
        let store = InMemoryDocumentStore::new();
        assert!(matches!(
            store.update(sample_document()),
            Err(StoreError::Missing)
        ));
    }

    #[test]
    fn sequences_are_per_kind_and_monotonic() {
        let store = InMemoryDocumentStore::new();
        assert_eq!(store.next_sequence(DocumentKind::Receipt).unwrap(), 1);
        assert_eq!(store.next_sequence(DocumentKind::Receipt).unwrap(), 2);
        assert_eq!(store.next_sequence(DocumentKind::Delivery).unwrap(), 1);
    }

    #[test]
    fn ledger_query_is_newest_first_with_limit() {
        let store = InMemoryLedgerStore::new();
        store
            .append(vec![sample_entry(1, 1), sample_entry(2, 3), sample_entry(3, 6)])
            .unwrap();

        let filter = LedgerFilter {
            limit: Some(2),
            ..LedgerFilter::default()
        };
        let result = store.query(&filter).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].quantity_change, 3);
        assert_eq!(result[1].quantity_change, 2);
    }

    #[test]
    fn balance_upsert_replaces_by_pair() {
        let store = InMemoryBalanceStore::new();
        let mut record = BalanceRecord::empty(ProductId::new(), WarehouseId::new(), Utc::now());
        store.upsert(record.clone()).unwrap();
        record.quantity = 9;
        store.upsert(record.clone()).unwrap();

        let fetched = store.get(record.product, record.warehouse).unwrap().unwrap();
        assert_eq!(fetched.quantity, 9);
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
