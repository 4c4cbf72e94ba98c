//! Materialized balance records (cache over the ledger).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockmaster_core::{ProductId, Quantity, WarehouseId};

/// Current on-hand quantity for one (product, warehouse) pair.
///
/// A pure cache: `quantity` must at all times equal the sum of ledger entry
/// `quantity_change` values for the pair, and the record must be
/// reconstructable by replaying the ledger. Rows are created lazily on first
/// movement and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub product: ProductId,
    pub warehouse: WarehouseId,
    /// Never negative; the applier rejects movements that would make it so.
    pub quantity: Quantity,
    /// Quantity earmarked for not-yet-validated deliveries. Always in
    /// `0..=quantity`. No operation in the core takes a hold; see DESIGN.md.
    pub reserved_quantity: Quantity,
    pub last_updated: DateTime<Utc>,
}

impl BalanceRecord {
    /// Fresh zero-quantity record for a pair that has no movements yet.
    pub fn empty(product: ProductId, warehouse: WarehouseId, at: DateTime<Utc>) -> Self {
        Self {
            product,
            warehouse,
            quantity: 0,
            reserved_quantity: 0,
            last_updated: at,
        }
    }

    /// Quantity available when composing delivery/transfer documents.
    ///
    /// Point-in-time read; not enforced atomically against future validation.
    pub fn free_to_use(&self) -> Quantity {
        self.quantity - self.reserved_quantity
    }
}
