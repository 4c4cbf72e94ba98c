//! Read-side ledger filtering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockmaster_core::{ProductId, WarehouseId};

use crate::entry::{EntryKind, LedgerEntry};

/// Filter for ledger listings (stock card views, audits, exports).
///
/// All criteria are optional and combined with AND. Results are returned
/// newest first; `limit` caps the result count after ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFilter {
    pub product: Option<ProductId>,
    pub warehouse: Option<WarehouseId>,
    pub kind: Option<EntryKind>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl LedgerFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(product) = self.product {
            if entry.product != product {
                return false;
            }
        }
        if let Some(warehouse) = self.warehouse {
            if entry.warehouse != warehouse {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entry.kind != kind {
                return false;
            }
        }
        if let Some(from) = self.from {
            if entry.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if entry.created_at > to {
                return false;
            }
        }
        true
    }
}
