//! Append-only ledger entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockmaster_core::{DocumentId, ProductId, Quantity, UserId, WarehouseId};

/// What kind of movement produced a ledger entry.
///
/// A transfer document produces two entries, one per leg, so the ledger keeps
/// the legs distinct while both carry the same document reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Receipt,
    Delivery,
    TransferOut,
    TransferIn,
    Adjustment,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Receipt => "receipt",
            EntryKind::Delivery => "delivery",
            EntryKind::TransferOut => "transfer_out",
            EntryKind::TransferIn => "transfer_in",
            EntryKind::Adjustment => "adjustment",
        }
    }
}

/// One immutable, signed quantity change for a (product, warehouse) pair,
/// tied to the document that caused it.
///
/// Entries for a pair, in order, form a running sum: `balance_after` at each
/// step equals the sum of `quantity_change` up to and including that entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub entry_id: Uuid,
    pub product: ProductId,
    pub warehouse: WarehouseId,
    pub quantity_change: Quantity,
    /// On-hand quantity for the pair immediately after this entry.
    pub balance_after: Quantity,
    pub kind: EntryKind,
    pub document_id: DocumentId,
    pub document_number: String,
    pub note: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}
